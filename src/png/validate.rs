use super::*;

/// How many of each chunk kind a datastream may hold, as `(min, max)`.
///
/// Kinds not listed (and unknown kinds) are unbounded.
const CARDINALITY: &[(ChunkTy, usize, usize)] = &[
  (ChunkTy::IHDR, 1, 1),
  (ChunkTy::PLTE, 0, 1),
  (ChunkTy::IEND, 1, 1),
  (ChunkTy::tRNS, 0, 1),
  (ChunkTy::cHRM, 0, 1),
  (ChunkTy::gAMA, 0, 1),
  (ChunkTy::iCCP, 0, 1),
  (ChunkTy::sBIT, 0, 1),
  (ChunkTy::sRGB, 0, 1),
  (ChunkTy::bKGD, 0, 1),
  (ChunkTy::hIST, 0, 1),
  (ChunkTy::pHYs, 0, 1),
  (ChunkTy::tIME, 0, 1),
  (ChunkTy::oFFs, 0, 1),
  (ChunkTy::sTER, 0, 1),
];

/// Chunks that must come before `PLTE` when there is one.
const BEFORE_PALETTE: &[ChunkTy] =
  &[ChunkTy::cHRM, ChunkTy::gAMA, ChunkTy::iCCP, ChunkTy::sBIT, ChunkTy::sRGB];

/// Chunks that must sit between `PLTE` and the first `IDAT` when there is a
/// `PLTE`.
const AFTER_PALETTE: &[ChunkTy] = &[ChunkTy::tRNS, ChunkTy::hIST, ChunkTy::bKGD];

/// Chunks that must come before the first `IDAT`.
const BEFORE_IMAGE_DATA: &[ChunkTy] = &[
  ChunkTy::PLTE,
  ChunkTy::cHRM,
  ChunkTy::gAMA,
  ChunkTy::iCCP,
  ChunkTy::sBIT,
  ChunkTy::sRGB,
  ChunkTy::tRNS,
  ChunkTy::hIST,
  ChunkTy::bKGD,
  ChunkTy::pHYs,
  ChunkTy::sPLT,
  ChunkTy::oFFs,
  ChunkTy::sTER,
];

/// The only chunks that may appear between the first and last `IDAT`.
const ALLOWED_IN_IDAT_RUN: &[ChunkTy] = &[ChunkTy::tEXt, ChunkTy::zTXt, ChunkTy::iTXt, ChunkTy::tIME];

/// Checks the whole-datastream rules on a scanned chunk list.
///
/// Every rule is checked in turn. In strict mode the first violation is
/// returned, in permissive mode each violation is logged and checking goes on.
pub fn validate_chunks(chunks: &ChunkList, src: &[u8], options: &DecodeOptions) -> PngResult<()> {
  // ends of the datastream
  match chunks.first() {
    Some(c) if c.ty == ChunkTy::IHDR => (),
    _ => options.tolerate(PngError::FirstChunkNotIHDR)?,
  }
  match chunks.last() {
    Some(c) if c.ty == ChunkTy::IEND => {
      if c.data_len != 0 {
        options.tolerate(PngError::BadChunkLength { ty: ChunkTy::IEND, len: c.data_len as usize })?;
      }
    }
    // an IEND that isn't last means something follows the end
    _ if chunks.position(ChunkTy::IEND).is_some() => {
      options.tolerate(PngError::ChunkOrder(ChunkTy::IEND))?
    }
    _ => options.tolerate(PngError::LastChunkNotIEND)?,
  }

  // cardinality
  for &(ty, min, max) in CARDINALITY {
    let count = chunks.count(ty);
    if count < min || count > max {
      options.tolerate(PngError::ChunkCount { ty, count })?;
    }
  }
  if chunks.position(ChunkTy::IDAT).is_none() {
    options.tolerate(PngError::NoImageData)?;
  }

  // mutual exclusion
  if chunks.position(ChunkTy::iCCP).is_some() && chunks.position(ChunkTy::sRGB).is_some() {
    options.tolerate(PngError::IccpWithSrgb)?;
  }

  // color type dependent presence
  let has_palette = chunks.position(ChunkTy::PLTE).is_some();
  if let Some(ihdr_chunk) = chunks.find(ChunkTy::IHDR) {
    match IHDR::from_data(ihdr_chunk.data(src)) {
      Ok(ihdr) => {
        use PngColorType::*;
        if ihdr.color_type == Index && !has_palette {
          options.tolerate(PngError::MissingPalette)?;
        }
        if matches!(ihdr.color_type, Y | YA) && has_palette {
          options.tolerate(PngError::UnexpectedPalette)?;
        }
        if matches!(ihdr.color_type, YA | RGBA) && chunks.position(ChunkTy::tRNS).is_some() {
          options.tolerate(PngError::UnexpectedTransparency)?;
        }
      }
      Err(e) => options.tolerate(e)?,
    }
  }
  if chunks.position(ChunkTy::hIST).is_some() && !has_palette {
    options.tolerate(PngError::HistogramWithoutPalette)?;
  }

  check_ordering(chunks, options)
}

fn check_ordering(chunks: &ChunkList, options: &DecodeOptions) -> PngResult<()> {
  let first_idat = chunks.position(ChunkTy::IDAT);
  let last_idat = chunks.last_position(ChunkTy::IDAT);
  let palette = chunks.position(ChunkTy::PLTE);

  if let Some(plte) = palette {
    for &ty in BEFORE_PALETTE {
      if chunks.last_position(ty).is_some_and(|i| i > plte) {
        options.tolerate(PngError::ChunkOrder(ty))?;
      }
    }
    for &ty in AFTER_PALETTE {
      if chunks.position(ty).is_some_and(|i| i < plte) {
        options.tolerate(PngError::ChunkOrder(ty))?;
      }
    }
  }

  if let (Some(first), Some(last)) = (first_idat, last_idat) {
    for &ty in BEFORE_IMAGE_DATA {
      if chunks.last_position(ty).is_some_and(|i| i > first) {
        options.tolerate(PngError::ChunkOrder(ty))?;
      }
    }
    for chunk in &chunks[first..=last] {
      if chunk.ty != ChunkTy::IDAT && !ALLOWED_IN_IDAT_RUN.contains(&chunk.ty) {
        options.tolerate(PngError::ChunkInsideIdatRun(chunk.ty))?;
      }
    }
  }
  Ok(())
}
