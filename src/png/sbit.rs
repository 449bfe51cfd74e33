use super::*;

/// `sBIT`: Significant bits
///
/// Gives the original number of significant bits per channel in the image.
///
/// * Each value here should be more than 0 and no more than the full bit depth
///   of this PNG.
/// * Indexed color uses the `RGB` variant, and the values must be 8 or less.
/// * The variant used matches the color type of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum sBIT {
  Y { y: u8 },
  RGB { r: u8, g: u8, b: u8 },
  YA { y: u8, a: u8 },
  RGBA { r: u8, g: u8, b: u8, a: u8 },
}
impl sBIT {
  pub fn from_data(data: &[u8], ctx: &ChunkContext) -> PngResult<Self> {
    let header = ctx.header()?;
    let out = match (header.color_type, data) {
      (PngColorType::Y, &[y]) => Self::Y { y },
      (PngColorType::RGB | PngColorType::Index, &[r, g, b]) => Self::RGB { r, g, b },
      (PngColorType::YA, &[y, a]) => Self::YA { y, a },
      (PngColorType::RGBA, &[r, g, b, a]) => Self::RGBA { r, g, b, a },
      _ => return Err(PngError::BadChunkLength { ty: ChunkTy::sBIT, len: data.len() }),
    };
    let max = if header.color_type == PngColorType::Index { 8 } else { header.bit_depth };
    if data.iter().any(|&bits| bits == 0 || bits > max) {
      ctx.options.tolerate(PngError::IllegalFieldValue(ChunkTy::sBIT))?;
    }
    Ok(out)
  }
}
