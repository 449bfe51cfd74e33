use super::*;

/// `tRNS`: Transparency
///
/// Stores additional transparency data.
///
/// * `Y` and `RGB` each store a single color. All samples of that color in the
///   image are fully transparent (alpha 0), while the rest are fully opaque
///   (alpha maximum). The `tRNS` chunk always uses a `u16` to store the value,
///   even if the image's bit depth is less than 16.
/// * `Index` has an alpha value that goes along with the rest of the palette
///   data. The transparency slice length should be less than or equal to the
///   palette length. If the transparency slice is shorter, all missing entries
///   should be assumed to have an alpha value of 255.
///
/// The form is picked by the image's color type, not by the data length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum tRNS<'b> {
  Y { y: u16 },
  RGB { r: u16, g: u16, b: u16 },
  Index { alphas: &'b [u8] },
}
impl<'b> tRNS<'b> {
  pub fn from_data(data: &'b [u8], ctx: &ChunkContext) -> PngResult<Self> {
    let bad_len = PngError::BadChunkLength { ty: ChunkTy::tRNS, len: data.len() };
    Ok(match ctx.header()?.color_type {
      PngColorType::Y => match *data {
        [y0, y1] => Self::Y { y: u16_be([y0, y1]) },
        _ => return Err(bad_len),
      },
      PngColorType::RGB => match *data {
        [r0, r1, g0, g1, b0, b1] => {
          Self::RGB { r: u16_be([r0, r1]), g: u16_be([g0, g1]), b: u16_be([b0, b1]) }
        }
        _ => return Err(bad_len),
      },
      PngColorType::Index => {
        if data.len() > ctx.palette_len {
          ctx.options.tolerate(bad_len)?;
          Self::Index { alphas: &data[..ctx.palette_len] }
        } else {
          Self::Index { alphas: data }
        }
      }
      PngColorType::YA | PngColorType::RGBA => return Err(PngError::UnexpectedTransparency),
    })
  }

  /// Alpha for the given palette index, 255 when the chunk doesn't cover it.
  #[inline]
  #[must_use]
  pub fn index_alpha(&self, index: u8) -> Option<u8> {
    match self {
      Self::Index { alphas } => Some(alphas.get(usize::from(index)).copied().unwrap_or(u8::MAX)),
      _ => None,
    }
  }
}
