use super::*;

/// A four byte chunk type code, such as `IHDR`.
///
/// Bit 5 of each byte is a property bit (the "lowercase" bit for ASCII
/// letters):
/// * byte 0: clear means critical, set means ancillary.
/// * byte 1: clear means public, set means private.
/// * byte 2: reserved, must be clear.
/// * byte 3: clear means unsafe to copy, set means safe to copy.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkTy {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const cHRM: Self = Self(*b"cHRM");
  pub const gAMA: Self = Self(*b"gAMA");
  pub const iCCP: Self = Self(*b"iCCP");
  pub const sBIT: Self = Self(*b"sBIT");
  pub const sRGB: Self = Self(*b"sRGB");
  pub const tEXt: Self = Self(*b"tEXt");
  pub const zTXt: Self = Self(*b"zTXt");
  pub const iTXt: Self = Self(*b"iTXt");
  pub const bKGD: Self = Self(*b"bKGD");
  pub const hIST: Self = Self(*b"hIST");
  pub const pHYs: Self = Self(*b"pHYs");
  pub const sPLT: Self = Self(*b"sPLT");
  pub const tIME: Self = Self(*b"tIME");
  pub const oFFs: Self = Self(*b"oFFs");
  pub const sTER: Self = Self(*b"sTER");

  const PROPERTY_BIT: u8 = 1 << 5;

  /// Critical chunks must be understood to display the image.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & Self::PROPERTY_BIT) == 0
  }
  #[inline]
  #[must_use]
  pub const fn is_public(self) -> bool {
    (self.0[1] & Self::PROPERTY_BIT) == 0
  }
  /// The reserved bit must be clear in this version of PNG.
  #[inline]
  #[must_use]
  pub const fn is_reserved_bit_valid(self) -> bool {
    (self.0[2] & Self::PROPERTY_BIT) == 0
  }
  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    (self.0[3] & Self::PROPERTY_BIT) != 0
  }
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }
}
impl Debug for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    core::fmt::Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl core::fmt::Display for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // not enforced to be ascii, so just `as` cast each byte.
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}
impl From<[u8; 4]> for ChunkTy {
  #[inline]
  fn from(array: [u8; 4]) -> Self {
    Self(array)
  }
}

/// A chunk located within the source bytes.
///
/// This stores positions, not a borrow, so a [`ChunkList`] can outlive the
/// decode of the bitmap. Use [`Chunk::data`] with the same source bytes the
/// chunk was scanned from.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk {
  pub ty: ChunkTy,
  /// Offset of the first data byte within the full PNG bytes.
  pub data_offset: usize,
  pub data_len: u32,
  pub declared_crc: u32,
}
impl Debug for Chunk {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Chunk")
      .field("ty", &self.ty)
      .field("data_offset", &self.data_offset)
      .field("data_len", &self.data_len)
      .field("declared_crc", &format_args!("{:#010X}", self.declared_crc))
      .finish()
  }
}
impl Chunk {
  /// The chunk's data bytes.
  ///
  /// Returns an empty slice if `src` isn't long enough, which only happens
  /// when it's not the buffer the chunk was scanned from.
  #[inline]
  #[must_use]
  pub fn data<'b>(&self, src: &'b [u8]) -> &'b [u8] {
    let end = self.data_offset.saturating_add(self.data_len as usize);
    src.get(self.data_offset..end).unwrap_or(&[])
  }

  /// Computes the CRC32 over the type code followed by the data.
  #[inline]
  #[must_use]
  pub fn compute_crc(&self, src: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(self.ty.as_bytes());
    crc.update(self.data(src));
    crc.finish()
  }

  #[inline]
  #[must_use]
  pub const fn is_critical(&self) -> bool {
    self.ty.is_critical()
  }
}

/// The ordered chunks of a PNG datastream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkList(pub(crate) Vec<Chunk>);
impl ChunkList {
  /// The first chunk of the given type.
  #[inline]
  #[must_use]
  pub fn find(&self, ty: ChunkTy) -> Option<&Chunk> {
    self.0.iter().find(|c| c.ty == ty)
  }

  /// All chunks of the given type, in datastream order.
  #[inline]
  pub fn find_all(&self, ty: ChunkTy) -> impl Iterator<Item = &Chunk> + '_ {
    self.0.iter().filter(move |c| c.ty == ty)
  }

  #[inline]
  #[must_use]
  pub fn count(&self, ty: ChunkTy) -> usize {
    self.find_all(ty).count()
  }

  /// Index of the first chunk of the given type.
  #[inline]
  #[must_use]
  pub fn position(&self, ty: ChunkTy) -> Option<usize> {
    self.0.iter().position(|c| c.ty == ty)
  }

  /// Index of the last chunk of the given type.
  #[inline]
  #[must_use]
  pub fn last_position(&self, ty: ChunkTy) -> Option<usize> {
    self.0.iter().rposition(|c| c.ty == ty)
  }

  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[Chunk] {
    &self.0
  }
}
impl core::ops::Deref for ChunkList {
  type Target = [Chunk];
  #[inline]
  fn deref(&self) -> &[Chunk] {
    &self.0
  }
}
impl<'a> IntoIterator for &'a ChunkList {
  type Item = &'a Chunk;
  type IntoIter = core::slice::Iter<'a, Chunk>;
  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

#[test]
fn test_chunk_ty_property_bits() {
  assert!(ChunkTy::IHDR.is_critical());
  assert!(ChunkTy::IHDR.is_public());
  assert!(ChunkTy::IHDR.is_reserved_bit_valid());
  assert!(!ChunkTy::IHDR.is_safe_to_copy());

  assert!(!ChunkTy::tEXt.is_critical());
  assert!(ChunkTy::tEXt.is_safe_to_copy());

  let private = ChunkTy(*b"ruSt");
  assert!(!private.is_critical());
  assert!(!private.is_public());
  assert!(private.is_reserved_bit_valid());
  assert!(private.is_safe_to_copy());

  assert!(!ChunkTy(*b"Rust").is_reserved_bit_valid());
}

#[test]
fn test_chunk_data_and_crc() {
  // a complete IEND chunk: len, type, no data, crc
  let src = [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82];
  let chunk = Chunk { ty: ChunkTy::IEND, data_offset: 8, data_len: 0, declared_crc: 0xAE42_6082 };
  assert!(chunk.data(&src).is_empty());
  assert_eq!(chunk.compute_crc(&src), chunk.declared_crc);
  // a bogus source doesn't panic
  let far = Chunk { data_offset: 100, data_len: 5, ..chunk };
  assert!(far.data(&src).is_empty());
}
