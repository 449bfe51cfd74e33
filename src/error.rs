use core::fmt;

use crate::png::ChunkTy;

/// Broad classes of [`PngError`].
///
/// Strict decoding treats every class as fatal. Permissive decoding logs
/// `Structural` and `Integrity` problems and keeps going where it can, while
/// `Signature` and `Codec` problems always stop the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PngErrorKind {
  /// The bytes aren't a PNG datastream at all.
  Signature,
  /// Chunk bounds, counts, ordering, or exclusion rules were broken.
  Structural,
  /// A chunk's CRC32 didn't match its contents.
  Integrity,
  /// The zlib stream was corrupt.
  Codec,
  /// A textual field used characters outside the allowed set.
  Content,
  /// A chunk's payload (or the image data) had the wrong shape.
  Data,
}

/// An error from the `rawpng` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PngError {
  /// The first 8 bytes weren't the PNG signature.
  NotPng,

  /// The datastream held no chunks after the signature.
  NoChunksPresent,
  /// A chunk's length, type, data, or CRC ran past the end of the input.
  UnexpectedEndOfInput { offset: usize },
  /// A chunk declared a length above `2^31 - 1`.
  ChunkTooLong { ty: ChunkTy, len: u32 },
  /// A chunk type had the reserved bit set.
  ReservedChunkType(ChunkTy),
  /// A chunk kind appeared more or fewer times than allowed.
  ChunkCount { ty: ChunkTy, count: usize },
  /// The first chunk wasn't `IHDR`.
  FirstChunkNotIHDR,
  /// The last chunk wasn't `IEND`.
  LastChunkNotIEND,
  /// Both `iCCP` and `sRGB` were present.
  IccpWithSrgb,
  /// The color type requires a `PLTE` chunk but there wasn't one.
  MissingPalette,
  /// A `PLTE` chunk appeared with a grayscale color type.
  UnexpectedPalette,
  /// A `tRNS` chunk appeared with a color type that already has alpha.
  UnexpectedTransparency,
  /// A `hIST` chunk appeared without a `PLTE` chunk.
  HistogramWithoutPalette,
  /// A chunk appeared in a position its ordering rules forbid.
  ChunkOrder(ChunkTy),
  /// A chunk broke up the run of `IDAT` chunks.
  ChunkInsideIdatRun(ChunkTy),
  /// There was no `IDAT` chunk to decode.
  NoImageData,
  /// The `IDAT` run wasn't directly followed by `IEND`.
  MissingEnd,
  /// There was no `IHDR` chunk to read the geometry from.
  MissingHeader,
  /// The image is larger than the configured limits.
  DimensionsTooLarge { width: u32, height: u32 },

  /// The declared CRC32 of a chunk didn't match the computed value.
  CrcMismatch { ty: ChunkTy, declared: u32, actual: u32 },

  /// A zlib stream (image data or compressed text) was invalid.
  Decompression,
  /// A compressed ancillary chunk inflated to more than the configured
  /// number of bytes.
  InflateLimitExceeded { limit: usize },

  /// A keyword, language tag, or translated keyword used characters outside
  /// the allowed set.
  IllegalCharacter(ChunkTy),

  /// A chunk's data length was wrong for its kind.
  BadChunkLength { ty: ChunkTy, len: usize },
  /// An `IHDR` field held an illegal value.
  IllegalHeader,
  /// The palette had fewer than 1 or more than 256 entries.
  IllegalPaletteEntryCount(usize),
  /// A compressed chunk named a compression method other than zlib.
  UnknownCompressionMethod { ty: ChunkTy, method: u8 },
  /// An `iTXt` compression flag wasn't 0 or 1.
  IllegalCompressionFlag(u8),
  /// A field of a chunk held an out of range value.
  IllegalFieldValue(ChunkTy),
  /// A keyword was empty or longer than 79 bytes, or wasn't terminated.
  IllegalKeyword(ChunkTy),
  /// A scanline started with a filter type other than 0 through 4.
  IllegalFilterType { line: u32, filter: u8 },
  /// The decompressed data was shorter than the image geometry requires.
  NotEnoughImageData { expected: usize, actual: usize },
  /// A checked size computation overflowed.
  CheckedMath,
  /// The bitmap buffer couldn't be allocated.
  AllocationFailed { bytes: usize },
  /// A decode task was stepped after it had already finished.
  TaskFinished,
}
pub type PngResult<T> = Result<T, PngError>;

impl PngError {
  /// Which class of problem this is.
  #[must_use]
  pub const fn kind(&self) -> PngErrorKind {
    use PngError::*;
    match self {
      NotPng => PngErrorKind::Signature,
      NoChunksPresent
      | UnexpectedEndOfInput { .. }
      | ChunkTooLong { .. }
      | ReservedChunkType(_)
      | ChunkCount { .. }
      | FirstChunkNotIHDR
      | LastChunkNotIEND
      | IccpWithSrgb
      | MissingPalette
      | UnexpectedPalette
      | UnexpectedTransparency
      | HistogramWithoutPalette
      | ChunkOrder(_)
      | ChunkInsideIdatRun(_)
      | NoImageData
      | MissingEnd
      | MissingHeader
      | DimensionsTooLarge { .. } => PngErrorKind::Structural,
      CrcMismatch { .. } => PngErrorKind::Integrity,
      Decompression | InflateLimitExceeded { .. } => PngErrorKind::Codec,
      IllegalCharacter(_) => PngErrorKind::Content,
      BadChunkLength { .. }
      | IllegalHeader
      | IllegalPaletteEntryCount(_)
      | UnknownCompressionMethod { .. }
      | IllegalCompressionFlag(_)
      | IllegalFieldValue(_)
      | IllegalKeyword(_)
      | IllegalFilterType { .. }
      | NotEnoughImageData { .. }
      | CheckedMath
      | AllocationFailed { .. }
      | TaskFinished => PngErrorKind::Data,
    }
  }
}

impl fmt::Display for PngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    use PngError::*;
    match self {
      NotPng => write!(f, "not a PNG datastream (bad signature)"),
      NoChunksPresent => write!(f, "no chunks after the signature"),
      UnexpectedEndOfInput { offset } => write!(f, "chunk at offset {offset} is truncated"),
      ChunkTooLong { ty, len } => write!(f, "{ty} chunk length {len} exceeds 2^31-1"),
      ReservedChunkType(ty) => write!(f, "chunk type {ty} has the reserved bit set"),
      ChunkCount { ty, count } => write!(f, "invalid number of {ty} chunks: {count}"),
      FirstChunkNotIHDR => write!(f, "first chunk is not IHDR"),
      LastChunkNotIEND => write!(f, "last chunk is not IEND"),
      IccpWithSrgb => write!(f, "iCCP and sRGB cannot both be present"),
      MissingPalette => write!(f, "indexed color image is missing its PLTE chunk"),
      UnexpectedPalette => write!(f, "PLTE chunk is not allowed with this color type"),
      UnexpectedTransparency => write!(f, "tRNS chunk is not allowed with this color type"),
      HistogramWithoutPalette => write!(f, "hIST chunk requires a PLTE chunk"),
      ChunkOrder(ty) => write!(f, "invalid chunk order for {ty}"),
      ChunkInsideIdatRun(ty) => write!(f, "{ty} chunk inside the IDAT sequence"),
      NoImageData => write!(f, "no IDAT chunks"),
      MissingEnd => write!(f, "IDAT sequence is not followed by IEND"),
      MissingHeader => write!(f, "no IHDR chunk"),
      DimensionsTooLarge { width, height } => {
        write!(f, "image dimensions {width}x{height} exceed the configured limits")
      }
      CrcMismatch { ty, declared, actual } => {
        write!(f, "CRC mismatch in {ty}: declared {declared:#010X}, computed {actual:#010X}")
      }
      Decompression => write!(f, "invalid zlib stream"),
      InflateLimitExceeded { limit } => {
        write!(f, "compressed chunk inflates past the {limit} byte limit")
      }
      IllegalCharacter(ty) => write!(f, "{ty} field contains illegal characters"),
      BadChunkLength { ty, len } => write!(f, "{ty} chunk has invalid length {len}"),
      IllegalHeader => write!(f, "IHDR holds an illegal value"),
      IllegalPaletteEntryCount(n) => write!(f, "palette has {n} entries, must be 1 to 256"),
      UnknownCompressionMethod { ty, method } => {
        write!(f, "{ty} uses unknown compression method {method}")
      }
      IllegalCompressionFlag(flag) => write!(f, "iTXt compression flag {flag} is not 0 or 1"),
      IllegalFieldValue(ty) => write!(f, "{ty} holds an out of range value"),
      IllegalKeyword(ty) => write!(f, "{ty} keyword is empty, too long, or unterminated"),
      IllegalFilterType { line, filter } => write!(f, "scanline {line} has filter type {filter}"),
      NotEnoughImageData { expected, actual } => {
        write!(f, "image data holds {actual} bytes, geometry requires {expected}")
      }
      CheckedMath => write!(f, "image size computation overflowed"),
      AllocationFailed { bytes } => write!(f, "could not allocate {bytes} bytes for the bitmap"),
      TaskFinished => write!(f, "the decode task already finished"),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for PngError {}
