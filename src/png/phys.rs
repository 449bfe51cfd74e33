use super::*;

/// `pHYs`: Physical pixel dimensions
///
/// Specifies the intended pixel size or aspect ratio for display of the image.
///
/// When `is_meters` is set then `ppu_x` and `ppu_y` are in pixels per meter.
/// Otherwise they have no unit and define an aspect ratio only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct pHYs {
  pub ppu_x: u32,
  pub ppu_y: u32,
  pub is_meters: bool,
}
impl pHYs {
  pub fn from_data(data: &[u8], options: &DecodeOptions) -> PngResult<Self> {
    match *data {
      [x0, x1, x2, x3, y0, y1, y2, y3, unit] => {
        if unit > 1 {
          options.tolerate(PngError::IllegalFieldValue(ChunkTy::pHYs))?;
        }
        Ok(Self {
          ppu_x: u32::from_be_bytes([x0, x1, x2, x3]),
          ppu_y: u32::from_be_bytes([y0, y1, y2, y3]),
          is_meters: unit == 1,
        })
      }
      _ => Err(PngError::BadChunkLength { ty: ChunkTy::pHYs, len: data.len() }),
    }
  }

  /// Dots per inch, if the unit is meters.
  #[inline]
  #[must_use]
  pub fn dpi(&self) -> Option<(f64, f64)> {
    const INCHES_PER_METER: f64 = 39.370_078_740_157_48;
    self
      .is_meters
      .then(|| (f64::from(self.ppu_x) / INCHES_PER_METER, f64::from(self.ppu_y) / INCHES_PER_METER))
  }
}

#[test]
fn test_phys() {
  let data = [0, 0, 0x0B, 0x13, 0, 0, 0x0B, 0x13, 1];
  let phys = pHYs::from_data(&data, &DecodeOptions::strict()).unwrap();
  assert_eq!(phys, pHYs { ppu_x: 2835, ppu_y: 2835, is_meters: true });
  let (dpi_x, _) = phys.dpi().unwrap();
  assert!((dpi_x - 72.0).abs() < 0.01);

  let mut odd_unit = data;
  odd_unit[8] = 9;
  assert!(pHYs::from_data(&odd_unit, &DecodeOptions::strict()).is_err());
  assert_eq!(pHYs::from_data(&odd_unit, &DecodeOptions::permissive()).unwrap().dpi(), None);
  assert!(pHYs::from_data(&data[..8], &DecodeOptions::permissive()).is_err());
}
