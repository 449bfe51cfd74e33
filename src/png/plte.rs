use super::*;

/// `PLTE`: Palette
///
/// Palette entries are always RGB8, regardless of the image's bit depth.
///
/// If you want to have a paletted image with transparency then the
/// transparency info goes in a separate [`tRNS`] chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PLTE<'b>(&'b [[u8; 3]]);
impl<'b> PLTE<'b> {
  /// Most entries a palette may hold.
  pub const MAX_ENTRIES: usize = 256;

  /// Strict mode requires a length that's a multiple of 3 and 1 to 256
  /// entries. Permissive mode drops a trailing partial entry and allows any
  /// count.
  pub fn from_data(data: &'b [u8], options: &DecodeOptions) -> PngResult<Self> {
    let whole = data.len() - (data.len() % 3);
    if whole != data.len() {
      options.tolerate(PngError::BadChunkLength { ty: ChunkTy::PLTE, len: data.len() })?;
    }
    let entries: &[[u8; 3]] = bytemuck::cast_slice(&data[..whole]);
    if entries.is_empty() || entries.len() > Self::MAX_ENTRIES {
      options.tolerate(PngError::IllegalPaletteEntryCount(entries.len()))?;
    }
    Ok(Self(entries))
  }

  /// Gets the entries as a slice.
  #[inline]
  #[must_use]
  pub fn entries(&self) -> &'b [[u8; 3]] {
    self.0
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
}
impl Debug for PLTE<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // currently prints no more than 4 palette entries
    f.debug_tuple("PLTE").field(&&self.0[..self.0.len().min(4)]).field(&self.0.len()).finish()
  }
}

#[test]
fn test_plte_from_data() {
  let strict = DecodeOptions::strict();
  let data = [1, 2, 3, 4, 5, 6];
  let plte = PLTE::from_data(&data, &strict).unwrap();
  assert_eq!(plte.entries(), &[[1, 2, 3], [4, 5, 6]]);

  let short = [1, 2, 3, 4];
  assert_eq!(
    PLTE::from_data(&short, &strict),
    Err(PngError::BadChunkLength { ty: ChunkTy::PLTE, len: 4 })
  );
  assert_eq!(PLTE::from_data(&short, &DecodeOptions::permissive()).unwrap().len(), 1);

  assert_eq!(PLTE::from_data(&[], &strict), Err(PngError::IllegalPaletteEntryCount(0)));
  let huge = [0_u8; 3 * 257];
  assert_eq!(PLTE::from_data(&huge, &strict), Err(PngError::IllegalPaletteEntryCount(257)));
  assert_eq!(PLTE::from_data(&huge, &DecodeOptions::permissive()).unwrap().len(), 257);
}
