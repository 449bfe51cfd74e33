use super::*;

/// What a chunk decoder may need to know about the rest of the datastream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkContext {
  /// The image header, if it could be parsed.
  pub header: Option<IHDR>,
  /// Entries in the `PLTE` chunk, 0 if there isn't one.
  pub palette_len: usize,
  pub options: DecodeOptions,
}
impl ChunkContext {
  /// Gathers the context from a scanned chunk list.
  pub fn new(chunks: &ChunkList, src: &[u8], options: DecodeOptions) -> Self {
    let header = chunks.find(ChunkTy::IHDR).and_then(|c| IHDR::from_data(c.data(src)).ok());
    let palette_len = chunks.find(ChunkTy::PLTE).map(|c| c.data_len as usize / 3).unwrap_or(0);
    Self { header, palette_len, options }
  }

  #[inline]
  pub fn header(&self) -> PngResult<IHDR> {
    self.header.ok_or(PngError::MissingHeader)
  }

  #[cfg(test)]
  pub(crate) fn for_tests(color_type: PngColorType, palette_len: usize) -> Self {
    let header = IHDR { width: 1, height: 1, bit_depth: 8, color_type, is_interlaced: false };
    Self { header: Some(header), palette_len, options: DecodeOptions::strict() }
  }
}

/// A decoded chunk.
///
/// There's one variant per chunk kind that this crate understands, and all
/// other chunk kinds are left as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub enum PngChunk<'b> {
  IHDR(IHDR),
  PLTE(PLTE<'b>),
  /// Image data is only meaningful as part of the whole `IDAT` sequence, so
  /// this is just the compressed bytes of one chunk.
  IDAT(&'b [u8]),
  IEND,
  tRNS(tRNS<'b>),
  cHRM(cHRM),
  gAMA(gAMA),
  iCCP(iCCP<'b>),
  sBIT(sBIT),
  sRGB(sRGB),
  /// `tEXt`, `zTXt`, and `iTXt` all decode to a [`TextChunk`].
  Text(TextChunk),
  bKGD(bKGD),
  hIST(hIST<'b>),
  pHYs(pHYs),
  sPLT(sPLT),
  tIME(tIME),
  oFFs(oFFs),
  sTER(sTER),
  Unknown { ty: ChunkTy, data: &'b [u8] },
}
impl<'b> PngChunk<'b> {
  /// Decodes one chunk.
  ///
  /// Errors only concern this chunk, decoding other chunks is unaffected.
  pub fn decode(chunk: &Chunk, src: &'b [u8], ctx: &ChunkContext) -> PngResult<Self> {
    let data = chunk.data(src);
    let options = &ctx.options;
    Ok(match chunk.ty {
      ChunkTy::IHDR => Self::IHDR(IHDR::from_data(data)?),
      ChunkTy::PLTE => Self::PLTE(PLTE::from_data(data, options)?),
      ChunkTy::IDAT => Self::IDAT(data),
      ChunkTy::IEND => {
        if !data.is_empty() {
          options.tolerate(PngError::BadChunkLength { ty: ChunkTy::IEND, len: data.len() })?;
        }
        Self::IEND
      }
      ChunkTy::tRNS => Self::tRNS(tRNS::from_data(data, ctx)?),
      ChunkTy::cHRM => Self::cHRM(cHRM::from_data(data)?),
      ChunkTy::gAMA => Self::gAMA(gAMA::from_data(data, options)?),
      ChunkTy::iCCP => Self::iCCP(iCCP::from_data(data, options)?),
      ChunkTy::sBIT => Self::sBIT(sBIT::from_data(data, ctx)?),
      ChunkTy::sRGB => Self::sRGB(sRGB::from_data(data)?),
      ChunkTy::bKGD => Self::bKGD(bKGD::from_data(data, ctx)?),
      ChunkTy::hIST => Self::hIST(hIST::from_data(data, ctx)?),
      ChunkTy::pHYs => Self::pHYs(pHYs::from_data(data, options)?),
      ChunkTy::sPLT => Self::sPLT(sPLT::from_data(data, options)?),
      ChunkTy::tIME => Self::tIME(tIME::from_data(data, options)?),
      ChunkTy::oFFs => Self::oFFs(oFFs::from_data(data, options)?),
      ChunkTy::sTER => Self::sTER(sTER::from_data(data)?),
      ty => match TextChunk::from_data(ty, data, options) {
        Some(text) => Self::Text(text?),
        None => Self::Unknown { ty, data },
      },
    })
  }

  /// The type code this was decoded from.
  #[must_use]
  pub fn ty(&self) -> ChunkTy {
    match self {
      Self::IHDR(_) => ChunkTy::IHDR,
      Self::PLTE(_) => ChunkTy::PLTE,
      Self::IDAT(_) => ChunkTy::IDAT,
      Self::IEND => ChunkTy::IEND,
      Self::tRNS(_) => ChunkTy::tRNS,
      Self::cHRM(_) => ChunkTy::cHRM,
      Self::gAMA(_) => ChunkTy::gAMA,
      Self::iCCP(_) => ChunkTy::iCCP,
      Self::sBIT(_) => ChunkTy::sBIT,
      Self::sRGB(_) => ChunkTy::sRGB,
      Self::Text(text) => text.ty,
      Self::bKGD(_) => ChunkTy::bKGD,
      Self::hIST(_) => ChunkTy::hIST,
      Self::pHYs(_) => ChunkTy::pHYs,
      Self::sPLT(_) => ChunkTy::sPLT,
      Self::tIME(_) => ChunkTy::tIME,
      Self::oFFs(_) => ChunkTy::oFFs,
      Self::sTER(_) => ChunkTy::sTER,
      Self::Unknown { ty, .. } => *ty,
    }
  }
}
