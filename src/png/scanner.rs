use super::*;

/// Largest data length a chunk may declare.
pub const MAX_CHUNK_LEN: u32 = (1 << 31) - 1;

/// An iterator that locates successive chunks in PNG bytes.
///
/// Each item is either a [`Chunk`] with all of its bytes present, or the error
/// for the point where the input ran out. After an error the iterator is
/// finished.
#[derive(Debug, Clone)]
pub struct RawChunkIter<'b> {
  src: &'b [u8],
  pos: usize,
}
impl<'b> RawChunkIter<'b> {
  /// Pass the full PNG bytes, the signature is skipped automatically.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    let pos = if bytes.len() < PNG_SIGNATURE.len() { bytes.len() } else { PNG_SIGNATURE.len() };
    Self { src: bytes, pos }
  }
}
impl<'b> Iterator for RawChunkIter<'b> {
  type Item = PngResult<Chunk>;
  fn next(&mut self) -> Option<Self::Item> {
    if self.pos >= self.src.len() {
      return None;
    }
    let start = self.pos;
    // stop after this item no matter what
    self.pos = self.src.len();

    let (len_bytes, rest) = match try_split_off_byte_array::<4>(&self.src[start..]) {
      Some(pair) => pair,
      None => return Some(Err(PngError::UnexpectedEndOfInput { offset: start })),
    };
    let (ty_bytes, rest) = match try_split_off_byte_array::<4>(rest) {
      Some(pair) => pair,
      None => return Some(Err(PngError::UnexpectedEndOfInput { offset: start })),
    };
    let data_len = u32::from_be_bytes(len_bytes);
    let ty = ChunkTy(ty_bytes);
    let declared_crc = match u32_be_at(rest, data_len as usize) {
      Some(crc) => crc,
      None if data_len > MAX_CHUNK_LEN => {
        return Some(Err(PngError::ChunkTooLong { ty, len: data_len }))
      }
      None => return Some(Err(PngError::UnexpectedEndOfInput { offset: start })),
    };
    let data_offset = start + 8;
    self.pos = data_offset + data_len as usize + 4;
    Some(Ok(Chunk { ty, data_offset, data_len, declared_crc }))
  }
}

/// Splits PNG bytes into chunks and checks every chunk-level and
/// datastream-level rule.
///
/// * A bad signature is always an error.
/// * Truncation, oversized lengths, reserved type bits and CRC mismatches are
///   errors in strict mode. Permissive mode logs them; a truncated chunk ends
///   the scan and keeps the chunks found so far.
/// * Once all chunks are found, [`validate_chunks`] runs over the list.
pub fn scan_chunks(bytes: &[u8], options: &DecodeOptions) -> PngResult<ChunkList> {
  if !is_png_header_correct(bytes) {
    return Err(PngError::NotPng);
  }
  let mut list = Vec::new();
  for result in RawChunkIter::new(bytes) {
    let chunk = match result {
      Ok(chunk) => chunk,
      Err(e) => {
        options.tolerate(e)?;
        break;
      }
    };
    trace!("{chunk:?}");
    if chunk.data_len > MAX_CHUNK_LEN {
      options.tolerate(PngError::ChunkTooLong { ty: chunk.ty, len: chunk.data_len })?;
    }
    if !chunk.ty.is_reserved_bit_valid() {
      options.tolerate(PngError::ReservedChunkType(chunk.ty))?;
    }
    if options.check_integrity {
      let actual = chunk.compute_crc(bytes);
      if actual != chunk.declared_crc {
        options.tolerate(PngError::CrcMismatch {
          ty: chunk.ty,
          declared: chunk.declared_crc,
          actual,
        })?;
      }
    }
    list.push(chunk);
  }
  if list.is_empty() {
    options.tolerate(PngError::NoChunksPresent)?;
  }
  let list = ChunkList(list);
  validate_chunks(&list, bytes, options)?;
  debug!("scanned {} chunks", list.len());
  Ok(list)
}
