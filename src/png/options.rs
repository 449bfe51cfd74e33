use super::*;

/// Knobs for a decode session.
///
/// ```
/// use rawpng::png::DecodeOptions;
/// let opts = DecodeOptions::default().set_check_integrity(false).set_slice_budget(64 * 1024);
/// assert!(!opts.check_integrity());
/// assert!(!opts.is_permissive());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
  pub(crate) check_integrity: bool,
  pub(crate) permissive: bool,
  pub(crate) slice_budget: usize,
  pub(crate) max_width: u32,
  pub(crate) max_height: u32,
  pub(crate) max_ancillary_inflate: usize,
}
impl Default for DecodeOptions {
  #[inline]
  fn default() -> Self {
    Self::strict()
  }
}
impl DecodeOptions {
  /// Bytes of scanline data processed per [`DecodeTask::step`] by default.
  pub const DEFAULT_SLICE_BUDGET: usize = 3_000_000;

  /// Most bytes a `zTXt`, `iTXt`, or `iCCP` payload may inflate to by
  /// default.
  pub const DEFAULT_MAX_ANCILLARY_INFLATE: usize = 8 << 20;

  /// CRC checks on, every violation is an error.
  #[inline]
  #[must_use]
  pub const fn strict() -> Self {
    Self {
      check_integrity: true,
      permissive: false,
      slice_budget: Self::DEFAULT_SLICE_BUDGET,
      max_width: 1 << 14,
      max_height: 1 << 14,
      max_ancillary_inflate: Self::DEFAULT_MAX_ANCILLARY_INFLATE,
    }
  }

  /// CRC checks on, but structural and integrity violations only log a
  /// warning and decoding continues on a best-effort basis.
  #[inline]
  #[must_use]
  pub const fn permissive() -> Self {
    Self::strict().set_permissive(true)
  }

  #[inline]
  #[must_use]
  pub const fn set_check_integrity(mut self, check: bool) -> Self {
    self.check_integrity = check;
    self
  }
  #[inline]
  #[must_use]
  pub const fn set_permissive(mut self, permissive: bool) -> Self {
    self.permissive = permissive;
    self
  }
  /// Zero is treated as one, so every step still makes progress.
  #[inline]
  #[must_use]
  pub const fn set_slice_budget(mut self, bytes: usize) -> Self {
    self.slice_budget = if bytes == 0 { 1 } else { bytes };
    self
  }
  #[inline]
  #[must_use]
  pub const fn set_max_dimensions(mut self, width: u32, height: u32) -> Self {
    self.max_width = width;
    self.max_height = height;
    self
  }
  /// Going over this is [`PngError::InflateLimitExceeded`] in either mode.
  #[inline]
  #[must_use]
  pub const fn set_max_ancillary_inflate(mut self, bytes: usize) -> Self {
    self.max_ancillary_inflate = bytes;
    self
  }

  #[inline]
  #[must_use]
  pub const fn check_integrity(&self) -> bool {
    self.check_integrity
  }
  #[inline]
  #[must_use]
  pub const fn is_permissive(&self) -> bool {
    self.permissive
  }
  #[inline]
  #[must_use]
  pub const fn is_strict(&self) -> bool {
    !self.permissive
  }
  #[inline]
  #[must_use]
  pub const fn slice_budget(&self) -> usize {
    self.slice_budget
  }
  #[inline]
  #[must_use]
  pub const fn max_ancillary_inflate(&self) -> usize {
    self.max_ancillary_inflate
  }

  /// Strict mode returns `err`; permissive mode logs it and returns `Ok`.
  #[inline]
  pub(crate) fn tolerate(&self, err: PngError) -> PngResult<()> {
    if self.permissive {
      warn!("ignoring in permissive mode: {err}");
      Ok(())
    } else {
      Err(err)
    }
  }
}

#[test]
fn test_decode_options_defaults() {
  let opts = DecodeOptions::default();
  assert!(opts.check_integrity());
  assert!(opts.is_strict());
  assert_eq!(opts.slice_budget(), DecodeOptions::DEFAULT_SLICE_BUDGET);
  assert!(DecodeOptions::permissive().is_permissive());
  assert_eq!(DecodeOptions::strict().set_slice_budget(0).slice_budget(), 1);
  assert_eq!(opts.max_ancillary_inflate(), 8 * 1024 * 1024);
  assert_eq!(opts.set_max_ancillary_inflate(10).max_ancillary_inflate(), 10);
}

#[test]
fn test_tolerate() {
  assert_eq!(DecodeOptions::strict().tolerate(PngError::MissingEnd), Err(PngError::MissingEnd));
  assert_eq!(DecodeOptions::permissive().tolerate(PngError::MissingEnd), Ok(()));
}
