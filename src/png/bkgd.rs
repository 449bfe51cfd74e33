use super::*;

/// `bKGD`: Background colour
///
/// Gives an intended background color for the image.
///
/// The form matches the color type of the image, with an implied alpha value
/// of "fully opaque" (eg: 255 for 8-bit alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum bKGD {
  Y { y: u16 },
  RGB { r: u16, g: u16, b: u16 },
  Index { i: u8 },
}
impl bKGD {
  pub fn from_data(data: &[u8], ctx: &ChunkContext) -> PngResult<Self> {
    use PngColorType::*;
    let out = match (ctx.header()?.color_type, data) {
      (Y | YA, &[y0, y1]) => Self::Y { y: u16_be([y0, y1]) },
      (RGB | RGBA, &[r0, r1, g0, g1, b0, b1]) => {
        Self::RGB { r: u16_be([r0, r1]), g: u16_be([g0, g1]), b: u16_be([b0, b1]) }
      }
      (Index, &[i]) => {
        if usize::from(i) >= ctx.palette_len {
          ctx.options.tolerate(PngError::IllegalFieldValue(ChunkTy::bKGD))?;
        }
        Self::Index { i }
      }
      _ => return Err(PngError::BadChunkLength { ty: ChunkTy::bKGD, len: data.len() }),
    };
    Ok(out)
  }
}
