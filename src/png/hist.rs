use super::*;

/// `hIST`: Image Histogram
///
/// Gives the approximate usage frequency of each color in the palette.
///
/// Can appear only when a `PLTE` chunk appears. If a viewer is unable to
/// provide all the colours listed in the palette, the histogram may help it
/// decide how to choose a subset of the colours for display.
///
/// * There shall be exactly one entry for each entry in the `PLTE` chunk.
/// * A zero entry specifies that the corresponding palette entry is not used at
///   all in the image.
///
/// Histogram data in this struct is stored as 2-byte big-endian values. It's
/// given as a slice to avoid allocation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct hIST<'b>(&'b [[u8; 2]]);
impl<'b> hIST<'b> {
  pub fn from_data(data: &'b [u8], ctx: &ChunkContext) -> PngResult<Self> {
    let bad_len = PngError::BadChunkLength { ty: ChunkTy::hIST, len: data.len() };
    let entries: &[[u8; 2]] = bytemuck::try_cast_slice(data).map_err(|_| bad_len)?;
    if entries.len() != ctx.palette_len {
      ctx.options.tolerate(bad_len)?;
    }
    Ok(Self(entries))
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// The frequency of each palette entry, in palette order.
  #[inline]
  pub fn frequencies(&self) -> impl Iterator<Item = u16> + 'b {
    let entries: &'b [[u8; 2]] = self.0;
    entries.iter().map(|&pair| u16_be(pair))
  }
}
impl Debug for hIST<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_list().entries(self.frequencies()).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_hist() {
    let ctx = ChunkContext::for_tests(PngColorType::Index, 3);
    let hist = hIST::from_data(&[0, 1, 1, 0, 0, 0], &ctx).unwrap();
    assert_eq!(hist.frequencies().collect::<Vec<_>>(), [1, 256, 0]);
    assert!(hIST::from_data(&[0, 1, 1], &ctx).is_err());
    assert!(hIST::from_data(&[0, 1], &ctx).is_err());
    let permissive = ChunkContext { options: DecodeOptions::permissive(), ..ctx };
    assert_eq!(hIST::from_data(&[0, 1], &permissive).unwrap().len(), 1);
  }
}
