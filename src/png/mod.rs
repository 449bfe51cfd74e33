//! Holds all the tools for decoding PNG data.
//!
//! ## Automated PNG Decoding
//! If you just want the samples, [`decode_png`] takes the PNG bytes and gives
//! back a [`RawBitmap`] along with the validated [`ChunkList`].
//!
//! ```no_run
//! use rawpng::png::*;
//! let bytes: &[u8] = unimplemented!("data from somewhere");
//! let decoded = decode_png(bytes, DecodeOptions::default())?;
//! println!("{}x{}", decoded.bitmap.width, decoded.bitmap.height);
//! # Ok::<(), PngError>(())
//! ```
//!
//! The bitmap is "raw": the samples are exactly as stored after the filters
//! and the interlacing have been undone. Indexed images hold palette indexes,
//! and no gamma, transparency, or color space handling is applied.
//!
//! ## Decoding a PNG Yourself
//!
//! The general format of a PNG is that the information is stored in "chunks".
//! There's four "critical" chunk types:
//! * **Header** - This has all the important information about the image's
//!   dimensions, pixel format, and if the image is interlaced or not.
//! * **Palette** - If an image uses indexed color it will have a palette of
//!   what index values map to what `RGB8` values.
//! * **Image Data** - One or more chunks of compressed data. All of the
//!   compressed data forms a single zlib data stream. All of the image data
//!   chunks should appear one after the other.
//! * **End** - The last chunk, lets you know you had the full PNG and your data
//!   wasn't truncated accidentally.
//!
//! Other chunks are "ancillary". They give additional information about the
//! image, and a decoder can skip the ones it doesn't understand.
//!
//! [`Png::new`] locates every chunk and checks the rules about which chunks
//! may appear, how often, and in what order. After that, each lookup method
//! (such as [`Png::palette`] or [`Png::text_chunks`]) decodes its chunk on
//! demand. [`Png::decode_task`] inflates the image data and gives a
//! [`DecodeTask`] that undoes the filtering a slice of scanlines at a time,
//! so a single-threaded host can stay responsive during a big decode.
//!
//! When storing the PNG, the raw pixel values are first "filtered" (to try and
//! make them more compression-friendly), and then compressed into a Zlib data
//! stream. To decode the PNG info you have to reverse the operations. First
//! decompressing, and then unfiltering.
//!
//! * **Unfiltering:** The decompressed data is a series of lines with an
//!   extra byte on the front of each line which says what filter was used for
//!   that line.
//! * **De-interlacing:** If the image is interlaced then the data isn't stored
//!   as a single series of lines. Instead, the overall image is stored as a
//!   series of seven "reduced" images of varying resolutions, each filtered on
//!   its own.
//!
//! ## Strict And Permissive Decoding
//! By default every violation of the format is an error. With
//! [`DecodeOptions::permissive`] the structural and integrity problems are
//! logged with `log::warn!` and decoding carries on with its best guess.
//! Corrupt zlib data is always an error.

#![allow(non_camel_case_types)]

use core::fmt::{Debug, Write};

use alloc::{boxed::Box, string::String, vec, vec::Vec};
use log::{debug, info, trace, warn};

use crate::parser_helpers::*;
pub use crate::{PngError, PngErrorKind, PngResult};

mod bitmap;
mod bkgd;
mod chrm;
mod chunk;
mod chunks;
mod crc32;
mod gama;
mod hist;
mod iccp;
mod ihdr;
mod inflate;
mod interlace;
mod offs;
mod options;
mod phys;
mod plte;
mod reconstruct;
mod sbit;
mod scanner;
mod session;
mod splt;
mod srgb;
mod ster;
mod text;
mod time;
mod trns;
mod unfilter;
mod validate;

pub use bitmap::*;
pub use bkgd::*;
pub use chrm::*;
pub use chunk::*;
pub use chunks::*;
pub use crc32::*;
pub use gama::*;
pub use hist::*;
pub use iccp::*;
pub use ihdr::*;
pub use inflate::*;
pub use interlace::*;
pub use offs::*;
pub use options::*;
pub use phys::*;
pub use plte::*;
pub use reconstruct::*;
pub use sbit::*;
pub use scanner::*;
pub use session::*;
pub use splt::*;
pub use srgb::*;
pub use ster::*;
pub use text::*;
pub use time::*;
pub use trns::*;
pub use unfilter::*;
pub use validate::*;

/// The first eight bytes of every PNG datastream.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not*
///   PNG data.
#[inline]
#[must_use]
pub const fn is_png_header_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

#[test]
fn test_is_png_header_correct() {
  assert!(is_png_header_correct(&PNG_SIGNATURE));
  assert!(is_png_header_correct(&[137, 80, 78, 71, 13, 10, 26, 10, 0, 0]));
  assert!(!is_png_header_correct(&PNG_SIGNATURE[..7]));
  assert!(!is_png_header_correct(b"\x89PNG\r\n\x1A\x00"));
}
