use super::*;

/// `cHRM`: Primary chromaticities and white point
///
/// Values are stored as an integer 100,000 times the floating point value.
///
/// **Example:** A value of 0.3127 would be stored as the integer 31270.
///
/// An `sRGB` chunk or `iCCP` chunk, when present and recognized, overrides the
/// `cHRM` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct cHRM {
  pub white_x: u32,
  pub white_y: u32,
  pub red_x: u32,
  pub red_y: u32,
  pub green_x: u32,
  pub green_y: u32,
  pub blue_x: u32,
  pub blue_y: u32,
}
impl cHRM {
  pub fn from_data(data: &[u8]) -> PngResult<Self> {
    if data.len() != 32 {
      return Err(PngError::BadChunkLength { ty: ChunkTy::cHRM, len: data.len() });
    }
    let at = |i: usize| u32_be_at(data, i * 4).unwrap_or_default();
    Ok(Self {
      white_x: at(0),
      white_y: at(1),
      red_x: at(2),
      red_y: at(3),
      green_x: at(4),
      green_y: at(5),
      blue_x: at(6),
      blue_y: at(7),
    })
  }

  #[inline]
  #[must_use]
  pub fn white_point(&self) -> (f64, f64) {
    (scaled(self.white_x), scaled(self.white_y))
  }
  #[inline]
  #[must_use]
  pub fn red(&self) -> (f64, f64) {
    (scaled(self.red_x), scaled(self.red_y))
  }
  #[inline]
  #[must_use]
  pub fn green(&self) -> (f64, f64) {
    (scaled(self.green_x), scaled(self.green_y))
  }
  #[inline]
  #[must_use]
  pub fn blue(&self) -> (f64, f64) {
    (scaled(self.blue_x), scaled(self.blue_y))
  }
}

#[inline]
fn scaled(v: u32) -> f64 {
  f64::from(v) / 100_000.0
}

#[test]
fn test_chrm() {
  // the sRGB primaries
  let values: [u32; 8] = [31270, 32900, 64000, 33000, 30000, 60000, 15000, 6000];
  let data: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
  let chrm = cHRM::from_data(&data).unwrap();
  assert_eq!(chrm.white_x, 31270);
  assert_eq!(chrm.blue_y, 6000);
  assert!((chrm.white_point().0 - 0.3127).abs() < 1e-12);
  assert!((chrm.green().1 - 0.6).abs() < 1e-12);
  assert_eq!(
    cHRM::from_data(&data[..31]),
    Err(PngError::BadChunkLength { ty: ChunkTy::cHRM, len: 31 })
  );
}
