use super::*;

/// `oFFs`: Image offset
///
/// Gives the position of the image on a printed page or within a larger
/// screen, from the page's top left corner.
///
/// When `is_micrometers` is set the offsets are in micrometres, otherwise they
/// are in pixels. Both may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct oFFs {
  pub x: i32,
  pub y: i32,
  pub is_micrometers: bool,
}
impl oFFs {
  pub fn from_data(data: &[u8], options: &DecodeOptions) -> PngResult<Self> {
    match *data {
      [x0, x1, x2, x3, y0, y1, y2, y3, unit] => {
        if unit > 1 {
          options.tolerate(PngError::IllegalFieldValue(ChunkTy::oFFs))?;
        }
        Ok(Self {
          x: i32::from_be_bytes([x0, x1, x2, x3]),
          y: i32::from_be_bytes([y0, y1, y2, y3]),
          is_micrometers: unit == 1,
        })
      }
      _ => Err(PngError::BadChunkLength { ty: ChunkTy::oFFs, len: data.len() }),
    }
  }
}

#[test]
fn test_offs() {
  let data = [0xFF, 0xFF, 0xFF, 0xF6, 0, 0, 0x01, 0x00, 1];
  let offs = oFFs::from_data(&data, &DecodeOptions::strict()).unwrap();
  assert_eq!(offs, oFFs { x: -10, y: 256, is_micrometers: true });

  let mut pixels = data;
  pixels[8] = 0;
  assert!(!oFFs::from_data(&pixels, &DecodeOptions::strict()).unwrap().is_micrometers);

  let mut odd_unit = data;
  odd_unit[8] = 2;
  assert_eq!(
    oFFs::from_data(&odd_unit, &DecodeOptions::strict()),
    Err(PngError::IllegalFieldValue(ChunkTy::oFFs))
  );
  assert!(oFFs::from_data(&odd_unit, &DecodeOptions::permissive()).is_ok());
  assert_eq!(
    oFFs::from_data(&data[..8], &DecodeOptions::permissive()),
    Err(PngError::BadChunkLength { ty: ChunkTy::oFFs, len: 8 })
  );
}
