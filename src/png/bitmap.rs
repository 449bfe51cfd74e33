use super::*;

/// The sample buffer of a [`RawBitmap`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawSamples {
  /// Bit depths 1, 2, 4, and 8. Rows are packed exactly as in the file, so
  /// sub-byte rows end with padding bits.
  U8(Vec<u8>),
  /// Bit depth 16, one native-endian `u16` per sample.
  U16(Vec<u16>),
}
impl RawSamples {
  /// Number of elements (bytes or `u16` samples).
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    match self {
      Self::U8(v) => v.len(),
      Self::U16(v) => v.len(),
    }
  }
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
  #[inline]
  #[must_use]
  pub fn as_u8(&self) -> Option<&[u8]> {
    match self {
      Self::U8(v) => Some(v),
      Self::U16(_) => None,
    }
  }
  #[inline]
  #[must_use]
  pub fn as_u16(&self) -> Option<&[u16]> {
    match self {
      Self::U8(_) => None,
      Self::U16(v) => Some(v),
    }
  }
  /// The buffer as bytes. For `U16` this is native-endian.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      Self::U8(v) => v,
      Self::U16(v) => bytemuck::cast_slice(v),
    }
  }
}

/// A defiltered, de-interlaced image, before any color conversion.
///
/// Palette images hold their indexes, and no gamma or transparency has been
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawBitmap {
  pub width: u32,
  pub height: u32,
  pub bit_depth: u8,
  pub color_type: PngColorType,
  /// Bytes per row in the file's packed layout (no filter byte).
  pub bytes_per_scanline: usize,
  pub samples: RawSamples,
}
impl RawBitmap {
  /// Wraps a full, unfiltered raster in the file's packed layout.
  ///
  /// 16-bit images have their big-endian byte pairs turned into `u16` values.
  pub(crate) fn from_raster(header: &IHDR, raster: Vec<u8>) -> Self {
    let samples = if header.bit_depth == 16 {
      RawSamples::U16(raster.chunks_exact(2).map(|pair| u16_be([pair[0], pair[1]])).collect())
    } else {
      RawSamples::U8(raster)
    };
    Self {
      width: header.width,
      height: header.height,
      bit_depth: header.bit_depth,
      color_type: header.color_type,
      bytes_per_scanline: header.bytes_per_scanline(header.width),
      samples,
    }
  }

  /// Bytes per sample, fractional for bit depths under 8.
  #[inline]
  #[must_use]
  pub fn byte_width(&self) -> f32 {
    f32::from(self.bit_depth) / 8.0
  }

  #[inline]
  #[must_use]
  pub const fn samples_per_pixel(&self) -> usize {
    self.color_type.channel_count()
  }

  /// Reads one sample, or `None` if the position is out of bounds.
  ///
  /// Sub-byte samples are returned unscaled, so a 2-bit sample is `0..=3`.
  #[must_use]
  pub fn sample(&self, x: u32, y: u32, channel: usize) -> Option<u16> {
    let spp = self.samples_per_pixel();
    if x >= self.width || y >= self.height || channel >= spp {
      return None;
    }
    let sample_index = (x as usize) * spp + channel;
    match &self.samples {
      RawSamples::U16(v) => v.get((y as usize) * (self.width as usize) * spp + sample_index).copied(),
      RawSamples::U8(v) => {
        let row = v.get((y as usize) * self.bytes_per_scanline..)?;
        match self.bit_depth {
          8 => row.get(sample_index).map(|&b| u16::from(b)),
          depth @ (1 | 2 | 4) => {
            let depth = usize::from(depth);
            let bit = sample_index * depth;
            let byte = *row.get(bit / 8)?;
            let shift = 8 - depth - (bit % 8);
            let mask = (1_u8 << depth) - 1;
            Some(u16::from((byte >> shift) & mask))
          }
          _ => None,
        }
      }
    }
  }
}
