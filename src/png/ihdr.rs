use super::*;

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  ///
  /// The palette will have RGB8 data. There may optionally be a transparency
  /// chunk.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// The number of samples (channels) in one pixel of this color type.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y => 1,
      Self::RGB => 3,
      Self::Index => 1,
      Self::YA => 2,
      Self::RGBA => 4,
    }
  }

  /// If the given bit depth is legal for this color type.
  #[inline]
  #[must_use]
  pub const fn allows_bit_depth(self, bit_depth: u8) -> bool {
    match self {
      Self::Y => matches!(bit_depth, 1 | 2 | 4 | 8 | 16),
      Self::Index => matches!(bit_depth, 1 | 2 | 4 | 8),
      Self::RGB | Self::YA | Self::RGBA => matches!(bit_depth, 8 | 16),
    }
  }

  #[inline]
  #[must_use]
  pub const fn has_alpha(self) -> bool {
    matches!(self, Self::YA | Self::RGBA)
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      _ => return Err(PngError::IllegalHeader),
    })
  }
}

/// `IHDR`: Image header
///
/// Spec: [IHDR](https://www.w3.org/TR/png/#11IHDR)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per sample
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// if the image data is stored as seven Adam7 passes.
  pub is_interlaced: bool,
}
impl IHDR {
  /// Largest width or height a PNG may declare.
  pub const MAX_DIMENSION: u32 = (1 << 31) - 1;

  /// Parses the 13 data bytes of an `IHDR` chunk.
  ///
  /// Every field is checked: zero or oversized dimensions, illegal bit depth
  /// and color type combinations, and unknown compression, filter, or interlace
  /// methods are all [`PngError::IllegalHeader`].
  pub fn from_data(data: &[u8]) -> PngResult<Self> {
    match *data {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] =>
      {
        let width = u32::from_be_bytes([w0, w1, w2, w3]);
        let height = u32::from_be_bytes([h0, h1, h2, h3]);
        if width == 0 || height == 0 || width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION {
          return Err(PngError::IllegalHeader);
        }
        let color_type = PngColorType::try_from(color_type)?;
        if !color_type.allows_bit_depth(bit_depth) {
          return Err(PngError::IllegalHeader);
        }
        if compression_method != 0 || filter_method != 0 {
          return Err(PngError::IllegalHeader);
        }
        let is_interlaced = match interlace_method {
          0 => false,
          1 => true,
          _ => return Err(PngError::IllegalHeader),
        };
        Ok(Self { width, height, bit_depth, color_type, is_interlaced })
      }
      _ => Err(PngError::BadChunkLength { ty: ChunkTy::IHDR, len: data.len() }),
    }
  }

  /// Samples per pixel, from the color type.
  #[inline]
  #[must_use]
  pub const fn samples_per_pixel(&self) -> usize {
    self.color_type.channel_count()
  }

  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// Bytes per sample, fractional for bit depths under 8.
  #[inline]
  #[must_use]
  pub fn byte_width(&self) -> f32 {
    f32::from(self.bit_depth) / 8.0
  }

  /// Distance in bytes to the "previous pixel" used by the filters.
  ///
  /// This is the pixel size rounded up to a whole byte, with a minimum of 1.
  #[inline]
  #[must_use]
  pub const fn filter_stride(&self) -> usize {
    let bytes = (self.bits_per_pixel() + 7) / 8;
    if bytes == 0 {
      1
    } else {
      bytes
    }
  }

  /// Bytes of sample data in one scanline of the given pixel width, not
  /// counting the filter type byte.
  ///
  /// Sub-byte pixels are packed and the last byte is padded, so this rounds up.
  #[inline]
  #[must_use]
  pub const fn bytes_per_scanline(&self, width: u32) -> usize {
    ((self.bits_per_pixel() * (width as usize)) + 7) / 8
  }

  /// Total decompressed bytes that the image data must contain, including one
  /// filter byte per scanline of every non-empty pass.
  pub fn filtered_data_len(&self) -> PngResult<usize> {
    let mut total = 0_usize;
    for pass in image_passes(self.width, self.height, self.is_interlaced) {
      if pass.is_empty() {
        continue;
      }
      let line = self.bytes_per_scanline(pass.width).checked_add(1).ok_or(PngError::CheckedMath)?;
      let this_pass = line.checked_mul(pass.height as usize).ok_or(PngError::CheckedMath)?;
      total = total.checked_add(this_pass).ok_or(PngError::CheckedMath)?;
    }
    Ok(total)
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = PngError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    Self::from_data(data)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ihdr_bytes(w: u32, h: u32, depth: u8, color: u8, interlace: u8) -> [u8; 13] {
    let mut out = [0; 13];
    out[0..4].copy_from_slice(&w.to_be_bytes());
    out[4..8].copy_from_slice(&h.to_be_bytes());
    out[8] = depth;
    out[9] = color;
    out[12] = interlace;
    out
  }

  #[test]
  fn test_ihdr_parse() {
    let ihdr = IHDR::from_data(&ihdr_bytes(7, 3, 16, 6, 1)).unwrap();
    assert_eq!(ihdr.width, 7);
    assert_eq!(ihdr.height, 3);
    assert_eq!(ihdr.color_type, PngColorType::RGBA);
    assert!(ihdr.is_interlaced);
    assert_eq!(ihdr.samples_per_pixel(), 4);
    assert_eq!(ihdr.filter_stride(), 8);
    assert_eq!(ihdr.bytes_per_scanline(7), 56);
  }

  #[test]
  fn test_ihdr_rejects_bad_fields() {
    assert_eq!(IHDR::from_data(&ihdr_bytes(0, 3, 8, 0, 0)), Err(PngError::IllegalHeader));
    assert_eq!(IHDR::from_data(&ihdr_bytes(3, 0, 8, 0, 0)), Err(PngError::IllegalHeader));
    assert_eq!(IHDR::from_data(&ihdr_bytes(1 << 31, 1, 8, 0, 0)), Err(PngError::IllegalHeader));
    assert_eq!(IHDR::from_data(&ihdr_bytes(1, 1, 16, 3, 0)), Err(PngError::IllegalHeader));
    assert_eq!(IHDR::from_data(&ihdr_bytes(1, 1, 4, 2, 0)), Err(PngError::IllegalHeader));
    assert_eq!(IHDR::from_data(&ihdr_bytes(1, 1, 8, 5, 0)), Err(PngError::IllegalHeader));
    assert_eq!(IHDR::from_data(&ihdr_bytes(1, 1, 8, 0, 2)), Err(PngError::IllegalHeader));
    let mut bad_method = ihdr_bytes(1, 1, 8, 0, 0);
    bad_method[10] = 1;
    assert_eq!(IHDR::from_data(&bad_method), Err(PngError::IllegalHeader));
    assert_eq!(
      IHDR::from_data(&[0; 12]),
      Err(PngError::BadChunkLength { ty: ChunkTy::IHDR, len: 12 })
    );
  }

  #[test]
  fn test_sub_byte_geometry() {
    let ihdr = IHDR::from_data(&ihdr_bytes(10, 2, 1, 0, 0)).unwrap();
    assert_eq!(ihdr.filter_stride(), 1);
    assert_eq!(ihdr.bytes_per_scanline(10), 2);
    assert_eq!(ihdr.byte_width(), 0.125);
    assert_eq!(ihdr.filtered_data_len().unwrap(), 2 * (1 + 2));

    let ihdr = IHDR::from_data(&ihdr_bytes(3, 1, 4, 3, 0)).unwrap();
    assert_eq!(ihdr.bytes_per_scanline(3), 2);
  }

  #[test]
  fn test_interlaced_data_len() {
    // 8x8 RGB8: pass sizes (1,1) (1,1) (2,1) (2,2) (4,2) (4,4) (8,4)
    let ihdr = IHDR::from_data(&ihdr_bytes(8, 8, 8, 2, 1)).unwrap();
    let expected = (1 + 3) + (1 + 3) + (1 + 6) + 2 * (1 + 6) + 2 * (1 + 12) + 4 * (1 + 12) + 4 * (1 + 24);
    assert_eq!(ihdr.filtered_data_len().unwrap(), expected);
    // a 1x1 interlaced image only has data in the first pass
    let ihdr = IHDR::from_data(&ihdr_bytes(1, 1, 8, 0, 1)).unwrap();
    assert_eq!(ihdr.filtered_data_len().unwrap(), 2);
  }
}
