use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngSrgbIntent {
  /// for images preferring good adaptation to the output device gamut at the
  /// expense of colorimetric accuracy, such as photographs.
  Perceptual = 0,
  /// for images requiring colour appearance matching (relative to the output
  /// device white point), such as logos.
  RelativeColorimetric = 1,
  /// for images preferring preservation of saturation at the expense of hue and
  /// lightness, such as charts and graphs.
  Saturation = 2,
  /// for images requiring preservation of absolute colorimetry, such as
  /// previews of images destined for a different output device (proofs).
  AbsoluteColorimetric = 3,
}

/// `sRGB`: Standard RGB colour space
///
/// If the `sRGB` chunk is present, the image samples conform to the
/// [sRGB](https://en.wikipedia.org/wiki/SRGB) colour space.
///
/// The image should be displayed using the specified rendering `intent`, as
/// defined by the International Color Consortium.
///
/// If `sRGB` is present it overrides any `gAMA` and/or `cHRM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct sRGB {
  pub intent: PngSrgbIntent,
}
impl sRGB {
  pub fn from_data(data: &[u8]) -> PngResult<Self> {
    let intent = match *data {
      [0] => PngSrgbIntent::Perceptual,
      [1] => PngSrgbIntent::RelativeColorimetric,
      [2] => PngSrgbIntent::Saturation,
      [3] => PngSrgbIntent::AbsoluteColorimetric,
      [_] => return Err(PngError::IllegalFieldValue(ChunkTy::sRGB)),
      _ => return Err(PngError::BadChunkLength { ty: ChunkTy::sRGB, len: data.len() }),
    };
    Ok(Self { intent })
  }
}

#[test]
fn test_srgb() {
  assert_eq!(sRGB::from_data(&[0]).unwrap().intent, PngSrgbIntent::Perceptual);
  assert_eq!(sRGB::from_data(&[3]).unwrap().intent, PngSrgbIntent::AbsoluteColorimetric);
  assert_eq!(sRGB::from_data(&[4]), Err(PngError::IllegalFieldValue(ChunkTy::sRGB)));
  assert_eq!(sRGB::from_data(&[]), Err(PngError::BadChunkLength { ty: ChunkTy::sRGB, len: 0 }));
}
