#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![forbid(unsafe_code)]

//! A strict PNG decoder.
//!
//! Decoding stops at the "raw" bitmap: the samples exactly as the PNG stores
//! them, once the zlib compression, the scanline filters, and the Adam7
//! interlacing have all been undone. Converting that into some pixel format
//! for display (palette lookup, gamma, transparency) is left to the caller,
//! with all of the ancillary chunks available through [`png::Png`].
//!
//! Every rule of the format is checked. By default breaking any rule is an
//! error, but a permissive mode logs most problems and decodes what it can.
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature (on by default)
//! only adds the [`std::error::Error`] impl for [`PngError`].

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod parser_helpers;

mod error;
pub use error::*;

pub mod png;
