use super::*;

/// How the two halves of a stereo image are meant to be viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngStereoMode {
  /// The right-eye image is on the left.
  CrossFuse = 0,
  /// The left-eye image is on the left.
  DivergingFuse = 1,
}

/// `sTER`: Indicator of stereo image
///
/// The image holds a left-eye and a right-eye image side by side, separated
/// by padding columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct sTER {
  pub mode: PngStereoMode,
}
impl sTER {
  pub fn from_data(data: &[u8]) -> PngResult<Self> {
    let mode = match *data {
      [0] => PngStereoMode::CrossFuse,
      [1] => PngStereoMode::DivergingFuse,
      [_] => return Err(PngError::IllegalFieldValue(ChunkTy::sTER)),
      _ => return Err(PngError::BadChunkLength { ty: ChunkTy::sTER, len: data.len() }),
    };
    Ok(Self { mode })
  }
}

#[test]
fn test_ster() {
  assert_eq!(sTER::from_data(&[0]).unwrap().mode, PngStereoMode::CrossFuse);
  assert_eq!(sTER::from_data(&[1]).unwrap().mode, PngStereoMode::DivergingFuse);
  assert_eq!(sTER::from_data(&[2]), Err(PngError::IllegalFieldValue(ChunkTy::sTER)));
  assert_eq!(sTER::from_data(&[0, 0]), Err(PngError::BadChunkLength { ty: ChunkTy::sTER, len: 2 }));
}
