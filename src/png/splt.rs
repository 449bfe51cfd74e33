use super::*;

/// One entry of a suggested palette.
///
/// For an 8-bit palette the color and alpha are all in `0..=255`, for a 16-bit
/// palette they use the full `u16` range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuggestedColor {
  pub r: u16,
  pub g: u16,
  pub b: u16,
  pub a: u16,
  pub frequency: u16,
}

/// `sPLT`: Suggested palette
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct sPLT {
  pub name: String,
  /// 8 or 16
  pub sample_depth: u8,
  pub entries: Vec<SuggestedColor>,
}
impl sPLT {
  pub fn from_data(data: &[u8], options: &DecodeOptions) -> PngResult<Self> {
    let ty = ChunkTy::sPLT;
    let bad_len = PngError::BadChunkLength { ty, len: data.len() };
    let (name, rest, _warning) = split_keyword(data, ty, options)?;
    let (sample_depth, entry_bytes) = match rest {
      [depth @ (8 | 16), entry_bytes @ ..] => (*depth, entry_bytes),
      [_, ..] => return Err(PngError::IllegalFieldValue(ty)),
      [] => return Err(bad_len),
    };
    let entry_size = if sample_depth == 8 { 6 } else { 10 };
    if entry_bytes.len() % entry_size != 0 {
      options.tolerate(bad_len)?;
    }
    let entries = entry_bytes
      .chunks_exact(entry_size)
      .map(|e| match *e {
        [r, g, b, a, f0, f1] => SuggestedColor {
          r: r.into(),
          g: g.into(),
          b: b.into(),
          a: a.into(),
          frequency: u16_be([f0, f1]),
        },
        [r0, r1, g0, g1, b0, b1, a0, a1, f0, f1] => SuggestedColor {
          r: u16_be([r0, r1]),
          g: u16_be([g0, g1]),
          b: u16_be([b0, b1]),
          a: u16_be([a0, a1]),
          frequency: u16_be([f0, f1]),
        },
        _ => SuggestedColor::default(),
      })
      .collect();
    Ok(Self { name, sample_depth, entries })
  }
}
