use super::*;

/// `tIME`: Image last-modification time, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct tIME {
  /// 4-digit year.
  pub year: u16,
  /// 1-12
  pub month: u8,
  /// 1-31
  pub day: u8,
  /// 0-23
  pub hour: u8,
  /// 0-59
  pub minute: u8,
  /// 0-60 (use 60 for leap seconds)
  pub second: u8,
}
impl tIME {
  pub fn from_data(data: &[u8], options: &DecodeOptions) -> PngResult<Self> {
    let out = match *data {
      [y0, y1, month, day, hour, minute, second] => {
        Self { year: u16_be([y0, y1]), month, day, hour, minute, second }
      }
      _ => return Err(PngError::BadChunkLength { ty: ChunkTy::tIME, len: data.len() }),
    };
    let in_range = (1..=12).contains(&out.month)
      && (1..=31).contains(&out.day)
      && out.hour <= 23
      && out.minute <= 59
      && out.second <= 60;
    if !in_range {
      options.tolerate(PngError::IllegalFieldValue(ChunkTy::tIME))?;
    }
    Ok(out)
  }
}
impl core::fmt::Display for tIME {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(
      f,
      "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
      self.year, self.month, self.day, self.hour, self.minute, self.second
    )
  }
}

#[test]
fn test_time() {
  let strict = DecodeOptions::strict();
  let t = tIME::from_data(&[0x07, 0xE8, 2, 29, 23, 59, 60], &strict).unwrap();
  assert_eq!(t.year, 2024);
  assert_eq!(alloc::format!("{t}"), "2024-02-29T23:59:60Z");
  assert_eq!(
    tIME::from_data(&[0x07, 0xE8, 13, 1, 0, 0, 0], &strict),
    Err(PngError::IllegalFieldValue(ChunkTy::tIME))
  );
  assert!(tIME::from_data(&[0x07, 0xE8, 0, 1, 0, 0, 0], &DecodeOptions::permissive()).is_ok());
  assert!(tIME::from_data(&[0x07, 0xE8, 1, 1, 0, 0], &strict).is_err());
}
