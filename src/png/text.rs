use super::*;

/// Longest keyword (or profile / palette name) PNG allows, in bytes.
pub const MAX_KEYWORD_LEN: usize = 79;

/// Longest `iTXt` language tag accepted in strict mode, in bytes.
pub const MAX_LANGUAGE_TAG_LEN: usize = 20;

/// If the byte may appear in a keyword, language tag, or translated keyword.
///
/// That's space, ASCII letters and digits, and this punctuation:
/// `` !"%&'()*+,-./:;<=>?_ ``
#[inline]
#[must_use]
pub const fn is_keyword_byte(b: u8) -> bool {
  matches!(b,
    b' ' | b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9'
    | b'!' | b'"' | b'%' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b','
    | b'-' | b'.' | b'/' | b':' | b';' | b'<' | b'=' | b'>' | b'?' | b'_'
  )
}

/// Checks a textual field's characters.
///
/// Gives `true` (a warning) when some byte is outside the allowed set. That's
/// logged, and an error in strict mode.
pub(crate) fn check_field_chars(
  field: &[u8], ty: ChunkTy, options: &DecodeOptions,
) -> PngResult<bool> {
  if field.iter().copied().all(is_keyword_byte) {
    return Ok(false);
  }
  warn!("{ty} field {:?} contains characters outside the keyword set", latin1_to_string(field));
  if options.is_strict() {
    return Err(PngError::IllegalCharacter(ty));
  }
  Ok(true)
}

/// Splits a null terminated keyword (or name) off the front of `data` and
/// checks it.
///
/// Returns the keyword, the rest of the data, and if there was a character
/// warning. Permissive mode takes a missing terminator to mean the whole data
/// is the keyword.
pub(crate) fn split_keyword<'b>(
  data: &'b [u8], ty: ChunkTy, options: &DecodeOptions,
) -> PngResult<(String, &'b [u8], bool)> {
  let (keyword, rest) = match split_off_null_terminated(data) {
    Some(pair) => pair,
    None => {
      options.tolerate(PngError::IllegalKeyword(ty))?;
      (data, &data[data.len()..])
    }
  };
  if keyword.is_empty() || keyword.len() > MAX_KEYWORD_LEN {
    options.tolerate(PngError::IllegalKeyword(ty))?;
  }
  let warning = check_field_chars(keyword, ty, options)?;
  Ok((latin1_to_string(keyword), rest, warning))
}

/// A decoded `tEXt`, `zTXt`, or `iTXt` chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextChunk {
  /// Which of the three text chunk kinds this came from.
  pub ty: ChunkTy,
  pub keyword: String,
  pub text: String,
  /// `iTXt` only: the language tag, in lowercase.
  pub language: Option<String>,
  /// `iTXt` only: the keyword translated into the language.
  pub translated_keyword: Option<String>,
  /// If the text was stored compressed.
  pub compressed: bool,
  /// Some field used characters outside the keyword set. Only possible in
  /// permissive mode, strict mode makes that an error instead.
  pub warning: bool,
}
impl TextChunk {
  /// Decodes the data of any of the three text chunk kinds.
  ///
  /// Gives `None` if `ty` isn't a text chunk type.
  pub fn from_data(ty: ChunkTy, data: &[u8], options: &DecodeOptions) -> Option<PngResult<Self>> {
    Some(match ty {
      ChunkTy::tEXt => decode_text(data, options),
      ChunkTy::zTXt => decode_ztxt(data, options),
      ChunkTy::iTXt => decode_itxt(data, options),
      _ => return None,
    })
  }
}

/// `tEXt`: keyword, null, Latin-1 text.
fn decode_text(data: &[u8], options: &DecodeOptions) -> PngResult<TextChunk> {
  let (keyword, text, warning) = split_keyword(data, ChunkTy::tEXt, options)?;
  Ok(TextChunk {
    ty: ChunkTy::tEXt,
    keyword,
    text: latin1_to_string(text),
    language: None,
    translated_keyword: None,
    compressed: false,
    warning,
  })
}

/// `zTXt`: keyword, null, compression method, zlib Latin-1 text.
fn decode_ztxt(data: &[u8], options: &DecodeOptions) -> PngResult<TextChunk> {
  let ty = ChunkTy::zTXt;
  let (keyword, rest, warning) = split_keyword(data, ty, options)?;
  let text = match rest {
    [0, zlib_data @ ..] => {
      latin1_to_string(&inflate_all(zlib_data, options.max_ancillary_inflate())?)
    }
    [method, zlib_data @ ..] => {
      options.tolerate(PngError::UnknownCompressionMethod { ty, method: *method })?;
      latin1_to_string(&inflate_all(zlib_data, options.max_ancillary_inflate())?)
    }
    [] => {
      options.tolerate(PngError::BadChunkLength { ty, len: data.len() })?;
      String::new()
    }
  };
  Ok(TextChunk {
    ty,
    keyword,
    text,
    language: None,
    translated_keyword: None,
    compressed: true,
    warning,
  })
}

/// `iTXt`: keyword, null, compression flag, compression method, language tag,
/// null, translated keyword, null, UTF-8 text (possibly zlib compressed).
fn decode_itxt(data: &[u8], options: &DecodeOptions) -> PngResult<TextChunk> {
  let ty = ChunkTy::iTXt;
  let (keyword, rest, mut warning) = split_keyword(data, ty, options)?;
  let bad_len = PngError::BadChunkLength { ty, len: data.len() };
  let ([flag, method], rest) = try_split_off_byte_array::<2>(rest).ok_or(bad_len)?;
  let (language, rest) = split_off_null_terminated(rest).ok_or(bad_len)?;
  let (translated, text) = split_off_null_terminated(rest).ok_or(bad_len)?;

  if language.len() > MAX_LANGUAGE_TAG_LEN {
    options.tolerate(PngError::IllegalFieldValue(ty))?;
  }
  warning |= check_field_chars(language, ty, options)?;
  warning |= check_field_chars(translated, ty, options)?;
  let language = latin1_to_string(language).to_ascii_lowercase();
  let translated_keyword = String::from_utf8_lossy(translated).into_owned();

  let (compressed, text) = match flag {
    0 => (false, utf8_text(text, options)?),
    1 => {
      if method != 0 {
        options.tolerate(PngError::UnknownCompressionMethod { ty, method })?;
      }
      let inflated = inflate_all(text, options.max_ancillary_inflate())?;
      (true, utf8_text(&inflated, options)?)
    }
    other => {
      options.tolerate(PngError::IllegalCompressionFlag(other))?;
      (false, String::new())
    }
  };
  Ok(TextChunk {
    ty,
    keyword,
    text,
    language: Some(language),
    translated_keyword: Some(translated_keyword),
    compressed,
    warning,
  })
}

fn utf8_text(bytes: &[u8], options: &DecodeOptions) -> PngResult<String> {
  match core::str::from_utf8(bytes) {
    Ok(s) => Ok(String::from(s)),
    Err(_) => {
      options.tolerate(PngError::IllegalFieldValue(ChunkTy::iTXt))?;
      Ok(String::from_utf8_lossy(bytes).into_owned())
    }
  }
}
