use super::*;

/// `iCCP`: Embedded ICC profile
///
/// * The profile `name` may be any convenient name for referring to the
///   profile. It is case-sensitive, and follows the keyword rules.
/// * The `zlib_data` is a zlib data stream, and decompression of this
///   datastream yields the embedded ICC profile (see [`iCCP::profile`]).
///
/// If this chunk is present, then the `sRGB` chunk *should not* be present.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct iCCP<'b> {
  pub name: String,
  pub zlib_data: &'b [u8],
}
impl<'b> iCCP<'b> {
  pub fn from_data(data: &'b [u8], options: &DecodeOptions) -> PngResult<Self> {
    let ty = ChunkTy::iCCP;
    let (name, rest, _warning) = split_keyword(data, ty, options)?;
    let zlib_data = match rest {
      [0, zlib_data @ ..] => zlib_data,
      [method, zlib_data @ ..] => {
        options.tolerate(PngError::UnknownCompressionMethod { ty, method: *method })?;
        zlib_data
      }
      [] => return Err(PngError::BadChunkLength { ty, len: data.len() }),
    };
    Ok(Self { name, zlib_data })
  }

  /// Decompresses the profile, up to the options' ancillary inflate limit.
  #[inline]
  pub fn profile(&self, options: &DecodeOptions) -> PngResult<Vec<u8>> {
    inflate_all(self.zlib_data, options.max_ancillary_inflate())
  }
}
impl Debug for iCCP<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("iCCP")
      .field("name", &self.name)
      .field("zlib_data_len", &self.zlib_data.len())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_iccp() {
    let profile = [7_u8; 300];
    let mut data = b"sRGB IEC61966-2.1\0\0".to_vec();
    data.extend(miniz_oxide::deflate::compress_to_vec_zlib(&profile, 6));
    let iccp = iCCP::from_data(&data, &DecodeOptions::strict()).unwrap();
    assert_eq!(iccp.name, "sRGB IEC61966-2.1");
    assert_eq!(iccp.profile(&DecodeOptions::strict()).unwrap(), profile);
    let tight = DecodeOptions::strict().set_max_ancillary_inflate(299);
    assert_eq!(iccp.profile(&tight), Err(PngError::InflateLimitExceeded { limit: 299 }));

    assert!(iCCP::from_data(b"name\0", &DecodeOptions::permissive()).is_err());
    assert_eq!(
      iCCP::from_data(b"name\0\x05", &DecodeOptions::strict()),
      Err(PngError::UnknownCompressionMethod { ty: ChunkTy::iCCP, method: 5 })
    );
  }
}
