use super::*;

/// `gAMA`: Image gamma
///
/// Values are stored as an integer 100,000 times the floating point value.
///
/// **Example:** A gamma of 1/2.2 would be stored as the integer 45,455.
///
/// An `sRGB` chunk or `iCCP` chunk, when present and recognized, overrides the
/// `gAMA` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct gAMA {
  pub gamma: u32,
}
impl gAMA {
  pub fn from_data(data: &[u8], options: &DecodeOptions) -> PngResult<Self> {
    let gamma = match *data {
      [a, b, c, d] => u32::from_be_bytes([a, b, c, d]),
      _ => return Err(PngError::BadChunkLength { ty: ChunkTy::gAMA, len: data.len() }),
    };
    if gamma == 0 {
      options.tolerate(PngError::IllegalFieldValue(ChunkTy::gAMA))?;
    }
    Ok(Self { gamma })
  }

  /// The gamma as a float.
  #[inline]
  #[must_use]
  pub fn to_f64(self) -> f64 {
    f64::from(self.gamma) / 100_000.0
  }
}

#[test]
fn test_gama() {
  let g = gAMA::from_data(&45_455_u32.to_be_bytes(), &DecodeOptions::strict()).unwrap();
  assert_eq!(g.gamma, 45_455);
  assert!((g.to_f64() - 0.45455).abs() < 1e-12);
  assert_eq!(
    gAMA::from_data(&[0, 1], &DecodeOptions::permissive()),
    Err(PngError::BadChunkLength { ty: ChunkTy::gAMA, len: 2 })
  );
  assert_eq!(
    gAMA::from_data(&[0; 4], &DecodeOptions::strict()),
    Err(PngError::IllegalFieldValue(ChunkTy::gAMA))
  );
}
