use super::*;

/// A fully decoded PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPng {
  pub bitmap: RawBitmap,
  /// The validated chunks, for looking up ancillary data later with the
  /// same source bytes.
  pub chunks: ChunkList,
}

/// Decodes PNG bytes all the way to a [`RawBitmap`].
///
/// ```
/// use rawpng::png::{decode_png, DecodeOptions, PngError};
/// assert_eq!(decode_png(b"GIF89a", DecodeOptions::default()), Err(PngError::NotPng));
/// ```
#[inline]
pub fn decode_png(bytes: &[u8], options: DecodeOptions) -> PngResult<DecodedPng> {
  Png::new(bytes, options)?.decode()
}

/// A scanned and validated PNG datastream.
///
/// Creating this only locates and checks the chunks. Ancillary data is
/// decoded on request by the lookup methods, which can be called any number
/// of times, and the image itself is decoded by [`decode`](Self::decode) or
/// [`decode_task`](Self::decode_task).
///
/// Lookups give `Ok(None)` when the chunk isn't present, and `Err` when it is
/// present but can't be decoded. An error from one lookup doesn't affect any
/// other.
#[derive(Debug, Clone)]
pub struct Png<'b> {
  bytes: &'b [u8],
  chunks: ChunkList,
  ctx: ChunkContext,
}

macro_rules! first_chunk_lookup {
  ($(#[$attr:meta])* $name:ident, $variant:ident, $out:ty) => {
    $(#[$attr])*
    pub fn $name(&self) -> PngResult<Option<$out>> {
      Ok(match self.decode_first(ChunkTy::$variant)? {
        Some(PngChunk::$variant(x)) => Some(x),
        _ => None,
      })
    }
  };
}

impl<'b> Png<'b> {
  /// Checks the signature, then scans and validates every chunk.
  pub fn new(bytes: &'b [u8], options: DecodeOptions) -> PngResult<Self> {
    let chunks = scan_chunks(bytes, &options)?;
    let ctx = ChunkContext::new(&chunks, bytes, options);
    Ok(Self { bytes, chunks, ctx })
  }

  #[inline]
  #[must_use]
  pub fn chunks(&self) -> &ChunkList {
    &self.chunks
  }

  #[inline]
  #[must_use]
  pub fn bytes(&self) -> &'b [u8] {
    self.bytes
  }

  #[inline]
  #[must_use]
  pub fn options(&self) -> &DecodeOptions {
    &self.ctx.options
  }

  /// The first `IHDR` chunk.
  pub fn header(&self) -> PngResult<IHDR> {
    let chunk = self.chunks.find(ChunkTy::IHDR).ok_or(PngError::MissingHeader)?;
    IHDR::from_data(chunk.data(self.bytes))
  }

  /// If the last chunk is a zero-length `IEND`.
  #[must_use]
  pub fn has_end(&self) -> bool {
    matches!(self.chunks.last(), Some(c) if c.ty == ChunkTy::IEND && c.data_len == 0)
  }

  fn decode_first(&self, ty: ChunkTy) -> PngResult<Option<PngChunk<'b>>> {
    match self.chunks.find(ty) {
      Some(chunk) => PngChunk::decode(chunk, self.bytes, &self.ctx).map(Some),
      None => Ok(None),
    }
  }

  first_chunk_lookup!(palette, PLTE, PLTE<'b>);
  first_chunk_lookup!(transparency, tRNS, tRNS<'b>);
  first_chunk_lookup!(gamma, gAMA, gAMA);
  first_chunk_lookup!(chromaticities, cHRM, cHRM);
  first_chunk_lookup!(srgb, sRGB, sRGB);
  first_chunk_lookup!(
    /// The embedded ICC profile, still compressed. Use [`iCCP::profile`] to
    /// inflate it.
    icc_profile,
    iCCP,
    iCCP<'b>
  );
  first_chunk_lookup!(significant_bits, sBIT, sBIT);
  first_chunk_lookup!(background, bKGD, bKGD);
  first_chunk_lookup!(histogram, hIST, hIST<'b>);
  first_chunk_lookup!(physical_dimensions, pHYs, pHYs);
  first_chunk_lookup!(last_modified, tIME, tIME);
  first_chunk_lookup!(offset, oFFs, oFFs);
  first_chunk_lookup!(stereo, sTER, sTER);

  /// Every `sPLT` chunk, in order.
  #[must_use]
  pub fn suggested_palettes(&self) -> Vec<PngResult<sPLT>> {
    self.chunks.find_all(ChunkTy::sPLT).map(|c| sPLT::from_data(c.data(self.bytes), &self.ctx.options)).collect()
  }

  /// Every `tEXt`, `zTXt`, and `iTXt` chunk, in order.
  #[must_use]
  pub fn text_chunks(&self) -> Vec<PngResult<TextChunk>> {
    self
      .chunks
      .iter()
      .filter_map(|c| TextChunk::from_data(c.ty, c.data(self.bytes), &self.ctx.options))
      .collect()
  }

  /// Decodes every chunk, pairing each with its result.
  pub fn decoded_chunks(&self) -> impl Iterator<Item = (Chunk, PngResult<PngChunk<'b>>)> + '_ {
    self.chunks.iter().map(move |c| (*c, PngChunk::decode(c, self.bytes, &self.ctx)))
  }

  /// Inflates the image data and sets up a resumable reconstruction.
  pub fn decode_task(&self) -> PngResult<DecodeTask> {
    let header = self.header()?;
    info!(
      "{}x{} {:?} at bit depth {}, interlaced: {}",
      header.width, header.height, header.color_type, header.bit_depth, header.is_interlaced
    );
    let options = self.ctx.options;
    check_dimensions(&header, &options)?;
    let expected = header.filtered_data_len()?;
    let data = assemble_image_data(&self.chunks, self.bytes, &options, expected)?;
    DecodeTask::new(header, data, options)
  }

  /// Decodes the image in one go.
  pub fn decode(&self) -> PngResult<DecodedPng> {
    let bitmap = self.decode_task()?.run_to_completion()?;
    Ok(DecodedPng { bitmap, chunks: self.chunks.clone() })
  }
}
