use super::*;

use miniz_oxide::inflate::{
  core::{
    decompress,
    inflate_flags::{
      TINFL_FLAG_HAS_MORE_INPUT, TINFL_FLAG_PARSE_ZLIB_HEADER,
      TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF,
    },
    DecompressorOxide,
  },
  TINFLStatus,
};

const MIN_GROWTH: usize = 32 * 1024;

/// A push-style zlib decompressor.
///
/// Compressed bytes are fed in with [`push`](Self::push) as they become
/// available, and the output accumulates in a single growable buffer.
pub(crate) struct ZlibStream {
  state: Box<DecompressorOxide>,
  out: Vec<u8>,
  out_pos: usize,
  limit: usize,
  fail_past_limit: bool,
  done: bool,
}
impl ZlibStream {
  /// Output past `limit` bytes is discarded and ends the stream.
  pub(crate) fn new(limit: usize) -> Self {
    Self {
      state: Box::default(),
      out: Vec::new(),
      out_pos: 0,
      limit,
      fail_past_limit: false,
      done: false,
    }
  }

  /// Output past `max_len` bytes is [`PngError::InflateLimitExceeded`].
  pub(crate) fn bounded(max_len: usize) -> Self {
    // room for one extra byte, which proves the stream went over
    Self { limit: max_len.saturating_add(1), fail_past_limit: true, ..Self::new(0) }
  }

  #[inline]
  pub(crate) fn is_done(&self) -> bool {
    self.done
  }

  /// Decompresses `input`. Pass `is_final` when no further input will
  /// follow, then an unfinished stream is an error.
  pub(crate) fn push(&mut self, mut input: &[u8], is_final: bool) -> PngResult<()> {
    loop {
      if self.done {
        if !input.is_empty() {
          debug!("ignoring {} bytes after the end of the zlib stream", input.len());
        }
        return Ok(());
      }
      if self.out_pos == self.out.len() {
        if self.out.len() >= self.limit {
          warn!("zlib stream holds more than the {} bytes needed, ignoring the rest", self.limit);
          self.done = true;
          continue;
        }
        let new_len = self.out.len().saturating_mul(2).max(MIN_GROWTH).min(self.limit);
        self.out.resize(new_len, 0);
      }
      let flags = TINFL_FLAG_PARSE_ZLIB_HEADER
        | TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF
        | if is_final { 0 } else { TINFL_FLAG_HAS_MORE_INPUT };
      let (status, consumed, produced) =
        decompress(&mut self.state, input, &mut self.out, self.out_pos, flags);
      input = &input[consumed..];
      self.out_pos += produced;
      if self.fail_past_limit && self.out_pos >= self.limit {
        return Err(PngError::InflateLimitExceeded { limit: self.limit - 1 });
      }
      match status {
        TINFLStatus::Done => self.done = true,
        TINFLStatus::HasMoreOutput => continue,
        TINFLStatus::NeedsMoreInput if !is_final => return Ok(()),
        other => {
          debug!("zlib stream failed with {other:?} after {} bytes", self.out_pos);
          return Err(PngError::Decompression);
        }
      }
    }
  }

  /// All output produced so far.
  pub(crate) fn finish(mut self) -> Vec<u8> {
    self.out.truncate(self.out_pos);
    self.out
  }
}

/// Decompresses one complete zlib stream, as found in `zTXt`, `iTXt`, and
/// `iCCP`.
///
/// Output of more than `max_len` bytes is an error.
pub fn inflate_all(data: &[u8], max_len: usize) -> PngResult<Vec<u8>> {
  let mut stream = ZlibStream::bounded(max_len);
  stream.push(data, true)?;
  Ok(stream.finish())
}

/// Feeds every `IDAT` payload, in datastream order, through one zlib stream.
///
/// The stream is only finalized when the last `IDAT` is directly followed by
/// `IEND`. Otherwise strict mode reports [`PngError::MissingEnd`], while
/// permissive mode keeps whatever bytes could be decompressed.
///
/// `expected_len` is the filtered size of the image; output beyond it is
/// discarded.
pub fn assemble_image_data(
  chunks: &ChunkList, src: &[u8], options: &DecodeOptions, expected_len: usize,
) -> PngResult<Vec<u8>> {
  let (first, last) = match (chunks.position(ChunkTy::IDAT), chunks.last_position(ChunkTy::IDAT)) {
    (Some(first), Some(last)) => (first, last),
    _ => {
      options.tolerate(PngError::NoImageData)?;
      return Ok(Vec::new());
    }
  };
  let terminated = chunks.get(last + 1).map(|c| c.ty) == Some(ChunkTy::IEND);
  if !terminated {
    options.tolerate(PngError::MissingEnd)?;
  }

  let mut stream = ZlibStream::new(expected_len);
  let mut fed = 0_usize;
  for (i, chunk) in chunks.iter().enumerate().skip(first).take(last - first + 1) {
    if chunk.ty != ChunkTy::IDAT {
      continue;
    }
    stream.push(chunk.data(src), terminated && i == last)?;
    fed += chunk.data_len as usize;
    if stream.is_done() {
      break;
    }
  }
  let out = stream.finish();
  debug!("inflated {fed} IDAT bytes into {} bytes of filtered image data", out.len());
  Ok(out)
}
