//! The CRC32 used by PNG chunks (ISO 3309, reflected polynomial
//! `0xEDB88320`).

/// Byte-indexed lookup table for the reflected polynomial.
pub(crate) const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      c = if (c & 1) != 0 { 0xEDB8_8320_u32 ^ (c >> 1) } else { c >> 1 };
      k += 1;
    }
    out[n] = c;
    n += 1;
  }
  out
}

/// A running CRC32 computation.
///
/// PNG computes the CRC over the chunk type followed by the chunk data, so this
/// lets you feed those in as two separate slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32 {
  state: u32,
}
impl Default for Crc32 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
impl Crc32 {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { state: u32::MAX }
  }

  #[inline]
  pub fn update(&mut self, bytes: &[u8]) {
    let mut crc = self.state;
    for &byte in bytes {
      let i = (crc ^ u32::from(byte)) as u8 as usize;
      crc = CRC_TABLE[i] ^ (crc >> 8);
    }
    self.state = crc;
  }

  #[inline]
  #[must_use]
  pub const fn finish(&self) -> u32 {
    self.state ^ u32::MAX
  }
}

/// CRC32 of a single byte slice.
#[inline]
#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
  let mut crc = Crc32::new();
  crc.update(bytes);
  crc.finish()
}
