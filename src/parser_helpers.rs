#![forbid(unsafe_code)]

//! Just has shorthands for the byte slicing that chunk parsing does over and
//! over.

/// Reads a big-endian `u16` from exactly two bytes.
#[inline]
#[must_use]
pub const fn u16_be(bytes: [u8; 2]) -> u16 {
  u16::from_be_bytes(bytes)
}

/// Reads a big-endian `u32` from the start of `bytes`, if there's enough.
#[inline]
#[must_use]
pub fn u32_be_at(bytes: &[u8], offset: usize) -> Option<u32> {
  let end = offset.checked_add(4)?;
  let b: [u8; 4] = bytes.get(offset..end)?.try_into().ok()?;
  Some(u32::from_be_bytes(b))
}

pub fn try_split_off_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let a: [u8; N] = head.try_into().ok()?;
    Some((a, tail))
  } else {
    None
  }
}

/// Splits at the first null byte, dropping the null.
///
/// Gives `None` if there's no null byte at all.
#[inline]
pub fn split_off_null_terminated(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
  let nul = bytes.iter().position(|&b| b == 0)?;
  Some((&bytes[..nul], &bytes[nul + 1..]))
}

/// Latin-1 maps each byte directly to the same code point.
#[must_use]
pub fn latin1_to_string(bytes: &[u8]) -> alloc::string::String {
  bytes.iter().map(|&b| b as char).collect()
}

#[test]
fn test_split_off_null_terminated() {
  assert_eq!(split_off_null_terminated(b"Title\0hello"), Some((&b"Title"[..], &b"hello"[..])));
  assert_eq!(split_off_null_terminated(b"\0"), Some((&b""[..], &b""[..])));
  assert_eq!(split_off_null_terminated(b"no terminator"), None);
}

#[test]
fn test_u32_be_at() {
  assert_eq!(u32_be_at(&[0, 0, 1, 0, 7], 0), Some(256));
  assert_eq!(u32_be_at(&[0, 0, 1, 0, 7], 1), Some(0x0001_0007));
  assert_eq!(u32_be_at(&[0, 0, 1, 0, 7], 2), None);
  assert_eq!(u32_be_at(&[1], usize::MAX), None);
}

#[test]
fn test_try_split_off_byte_array() {
  let (head, tail) = try_split_off_byte_array::<2>(&[1, 2, 3]).unwrap();
  assert_eq!(head, [1, 2]);
  assert_eq!(tail, &[3]);
  assert!(try_split_off_byte_array::<4>(&[1, 2, 3]).is_none());
}
