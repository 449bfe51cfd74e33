use miniz_oxide::deflate::compress_to_vec_zlib;
use rawpng::{png::*, PngErrorKind};
use walkdir::WalkDir;

fn push_chunk(out: &mut Vec<u8>, ty: &[u8; 4], data: &[u8]) {
  out.extend_from_slice(&(data.len() as u32).to_be_bytes());
  out.extend_from_slice(ty);
  out.extend_from_slice(data);
  let mut crc = Crc32::new();
  crc.update(ty);
  crc.update(data);
  out.extend_from_slice(&crc.finish().to_be_bytes());
}

fn ihdr(width: u32, height: u32, bit_depth: u8, color_type: u8, interlaced: bool) -> Vec<u8> {
  let mut out = Vec::new();
  out.extend_from_slice(&width.to_be_bytes());
  out.extend_from_slice(&height.to_be_bytes());
  out.extend_from_slice(&[bit_depth, color_type, 0, 0, u8::from(interlaced)]);
  out
}

/// An image to encode, samples are listed pixel by pixel, channel by channel.
struct TestImage {
  width: u32,
  height: u32,
  bit_depth: u8,
  color_type: u8,
  interlaced: bool,
  samples: Vec<u16>,
}
impl TestImage {
  fn gray(width: u32, height: u32, bit_depth: u8, interlaced: bool) -> Self {
    let max = (1_u32 << bit_depth) - 1;
    let samples = (0..width * height).map(|i| ((i * 97 + 13) % (max + 1)) as u16).collect();
    Self { width, height, bit_depth, color_type: 0, interlaced, samples }
  }

  fn channels(&self) -> usize {
    match self.color_type {
      0 | 3 => 1,
      2 => 3,
      4 => 2,
      _ => 4,
    }
  }

  fn pack(&self, row: &[u16]) -> Vec<u8> {
    match self.bit_depth {
      16 => row.iter().flat_map(|v| v.to_be_bytes()).collect(),
      8 => row.iter().map(|&v| v as u8).collect(),
      depth => {
        let depth = usize::from(depth);
        let mut out = vec![0_u8; (row.len() * depth + 7) / 8];
        for (i, &v) in row.iter().enumerate() {
          let bit = i * depth;
          out[bit / 8] |= (v as u8) << (8 - depth - bit % 8);
        }
        out
      }
    }
  }

  /// The filtered (not yet compressed) image data, every line using `filter`.
  fn filtered(&self, filter: u8) -> Vec<u8> {
    let spp = self.channels();
    let stride = ((spp * usize::from(self.bit_depth)) / 8).max(1);
    let mut out = Vec::new();
    for pass in image_passes(self.width, self.height, self.interlaced).filter(|p| !p.is_empty()) {
      let mut prev: Vec<u8> = Vec::new();
      for py in 0..pass.height {
        let mut row = Vec::new();
        for px in 0..pass.width {
          let (x, y) = pass.full_pos(px, py);
          let at = ((y * self.width + x) as usize) * spp;
          row.extend_from_slice(&self.samples[at..at + spp]);
        }
        let raw = self.pack(&row);
        if prev.is_empty() {
          prev = vec![0; raw.len()];
        }
        out.push(filter);
        out.extend(forward_filter(filter, stride, &prev, &raw));
        prev = raw;
      }
    }
    out
  }

  fn ihdr(&self) -> Vec<u8> {
    ihdr(self.width, self.height, self.bit_depth, self.color_type, self.interlaced)
  }

  fn to_png(&self, filter: u8) -> Vec<u8> {
    build_png(&self.ihdr(), &[], &compress_to_vec_zlib(&self.filtered(filter), 6), 1)
  }
}

fn forward_filter(filter: u8, stride: usize, prev: &[u8], raw: &[u8]) -> Vec<u8> {
  (0..raw.len())
    .map(|i| {
      let a = if i >= stride { raw[i - stride] } else { 0 };
      let b = prev[i];
      let c = if i >= stride { prev[i - stride] } else { 0 };
      let predicted = match filter {
        0 => 0,
        1 => a,
        2 => b,
        3 => ((u16::from(a) + u16::from(b)) / 2) as u8,
        _ => paeth_predict(a, b, c),
      };
      raw[i].wrapping_sub(predicted)
    })
    .collect()
}

/// Signature, `IHDR`, the `extra` chunks, the zlib data split over
/// `idat_pieces` chunks, and `IEND`.
fn build_png(ihdr: &[u8], extra: &[(&[u8; 4], &[u8])], zlib: &[u8], idat_pieces: usize) -> Vec<u8> {
  let mut out = Vec::from(PNG_SIGNATURE);
  push_chunk(&mut out, b"IHDR", ihdr);
  for (ty, data) in extra {
    push_chunk(&mut out, ty, data);
  }
  let piece_len = (zlib.len() + idat_pieces - 1) / idat_pieces;
  for piece in zlib.chunks(piece_len.max(1)) {
    push_chunk(&mut out, b"IDAT", piece);
  }
  push_chunk(&mut out, b"IEND", &[]);
  out
}

#[test]
fn test_single_gray_pixel() {
  let zlib = compress_to_vec_zlib(&[0, 0x7F], 6);
  let png = build_png(&ihdr(1, 1, 8, 0, false), &[], &zlib, 1);
  let decoded = decode_png(&png, DecodeOptions::strict()).unwrap();
  assert_eq!(decoded.bitmap.samples, RawSamples::U8(vec![0x7F]));
  assert_eq!(decoded.bitmap.width, 1);
  assert_eq!(decoded.bitmap.color_type, PngColorType::Y);
  assert_eq!(decoded.chunks.len(), 3);
}

#[test]
fn test_two_by_two_interlaced_matches_plain() {
  let plain = TestImage { width: 2, height: 2, bit_depth: 8, color_type: 0, interlaced: false, samples: vec![10, 20, 30, 40] };
  let interlaced = TestImage { interlaced: true, samples: plain.samples.clone(), ..plain };
  let a = decode_png(&plain.to_png(0), DecodeOptions::strict()).unwrap().bitmap;
  let b = decode_png(&interlaced.to_png(0), DecodeOptions::strict()).unwrap().bitmap;
  assert_eq!(a, b);
  assert_eq!(a.samples, RawSamples::U8(vec![10, 20, 30, 40]));
}

#[test]
fn test_interlaced_matches_plain_every_filter_and_depth() {
  for bit_depth in [1, 2, 4, 8, 16] {
    for (w, h) in [(1, 1), (3, 2), (5, 9), (8, 8), (17, 6)] {
      let plain = TestImage::gray(w, h, bit_depth, false);
      let interlaced = TestImage::gray(w, h, bit_depth, true);
      for filter in 0..=4 {
        let a = decode_png(&plain.to_png(filter), DecodeOptions::strict()).unwrap().bitmap;
        let b = decode_png(&interlaced.to_png(filter), DecodeOptions::strict()).unwrap().bitmap;
        assert_eq!(a, b, "{w}x{h} depth {bit_depth} filter {filter}");
        for y in 0..h {
          for x in 0..w {
            assert_eq!(a.sample(x, y, 0), Some(plain.samples[(y * w + x) as usize]));
          }
        }
      }
    }
  }
}

#[test]
fn test_rgba16_interlaced_paeth() {
  let samples: Vec<u16> = (0..5 * 4 * 4).map(|i| (i as u16).wrapping_mul(4099)).collect();
  let image = TestImage { width: 5, height: 4, bit_depth: 16, color_type: 6, interlaced: true, samples };
  let bitmap = decode_png(&image.to_png(4), DecodeOptions::strict()).unwrap().bitmap;
  assert_eq!(bitmap.samples, RawSamples::U16(image.samples.clone()));
  assert_eq!(bitmap.bytes_per_scanline, 5 * 8);
}

#[test]
fn test_indexed_with_transparency() {
  let image = TestImage { width: 3, height: 2, bit_depth: 2, color_type: 3, interlaced: false, samples: vec![0, 1, 2, 3, 2, 1] };
  let plte = [255, 0, 0, 0, 255, 0, 0, 0, 255, 9, 9, 9];
  let trns = [0, 128];
  let zlib = compress_to_vec_zlib(&image.filtered(1), 6);
  let bytes = build_png(&image.ihdr(), &[(b"PLTE", &plte[..]), (b"tRNS", &trns[..])], &zlib, 1);
  let png = Png::new(&bytes, DecodeOptions::strict()).unwrap();
  let palette = png.palette().unwrap().unwrap();
  assert_eq!(palette.len(), 4);
  assert_eq!(palette.entries()[3], [9, 9, 9]);
  let trns = png.transparency().unwrap().unwrap();
  assert_eq!(trns.index_alpha(1), Some(128));
  assert_eq!(trns.index_alpha(2), Some(255));
  let bitmap = png.decode().unwrap().bitmap;
  let indexes: Vec<u16> = (0..2).flat_map(|y| (0..3).map(move |x| (x, y))).map(|(x, y)| bitmap.sample(x, y, 0).unwrap()).collect();
  assert_eq!(indexes, image.samples);
}

#[test]
fn test_metadata_lookups() {
  let image = TestImage::gray(4, 4, 8, false);
  let zlib = compress_to_vec_zlib(&image.filtered(0), 6);
  let gama = 45455_u32.to_be_bytes();
  let phys = [0, 0, 0x0B, 0x13, 0, 0, 0x0B, 0x13, 1];
  let time = [0x07, 0xE8, 3, 14, 15, 9, 26];
  let offs = [0xFF, 0xFF, 0xFF, 0xFE, 0, 0, 0, 3, 0];
  let bytes = build_png(
    &image.ihdr(),
    &[
      (b"gAMA", &gama[..]),
      (b"pHYs", &phys[..]),
      (b"oFFs", &offs[..]),
      (b"sTER", &[0][..]),
      (b"tEXt", &b"Title\0Test card"[..]),
      (b"tIME", &time[..]),
    ],
    &zlib,
    1,
  );
  let png = Png::new(&bytes, DecodeOptions::strict()).unwrap();
  assert_eq!(png.gamma().unwrap(), Some(gAMA { gamma: 45455 }));
  assert_eq!(png.physical_dimensions().unwrap().map(|p| p.ppu_x), Some(2835));
  assert_eq!(png.last_modified().unwrap().map(|t| t.year), Some(2024));
  assert_eq!(png.chromaticities().unwrap(), None);
  assert_eq!(png.srgb().unwrap(), None);
  assert_eq!(png.offset().unwrap(), Some(oFFs { x: -2, y: 3, is_micrometers: false }));
  assert_eq!(png.stereo().unwrap().map(|s| s.mode), Some(PngStereoMode::CrossFuse));
  assert!(png.has_end());
  let texts = png.text_chunks();
  assert_eq!(texts.len(), 1);
  let text = texts[0].as_ref().unwrap();
  assert_eq!(text.keyword, "Title");
  assert_eq!(text.text, "Test card");
  // lookups can be repeated
  assert_eq!(png.gamma(), png.gamma());
  let kinds: Vec<ChunkTy> = png.decoded_chunks().map(|(c, r)| r.map(|d| d.ty()).unwrap_or(c.ty)).collect();
  assert_eq!(kinds.first(), Some(&ChunkTy::IHDR));
  assert_eq!(kinds.last(), Some(&ChunkTy::IEND));
}

#[test]
fn test_many_idat_chunks() {
  let image = TestImage::gray(40, 30, 8, true);
  let zlib = compress_to_vec_zlib(&image.filtered(3), 6);
  let whole = decode_png(&build_png(&image.ihdr(), &[], &zlib, 1), DecodeOptions::strict()).unwrap();
  let split = decode_png(&build_png(&image.ihdr(), &[], &zlib, 9), DecodeOptions::strict()).unwrap();
  assert_eq!(whole.bitmap, split.bitmap);
  assert!(split.chunks.count(ChunkTy::IDAT) > 1);
}

#[test]
fn test_two_headers() {
  let image = TestImage::gray(2, 2, 8, false);
  let zlib = compress_to_vec_zlib(&image.filtered(0), 6);
  let other_header = ihdr(9, 9, 16, 2, true);
  let bytes = build_png(&image.ihdr(), &[(b"IHDR", &other_header[..])], &zlib, 1);
  assert_eq!(
    decode_png(&bytes, DecodeOptions::strict()).unwrap_err(),
    PngError::ChunkCount { ty: ChunkTy::IHDR, count: 2 }
  );
  let decoded = decode_png(&bytes, DecodeOptions::permissive()).unwrap();
  assert_eq!(decoded.bitmap.width, 2);
  assert_eq!(decoded.bitmap.samples, RawSamples::U8(image.samples.iter().map(|&s| s as u8).collect()));
}

#[test]
fn test_palette_after_image_data() {
  let image = TestImage::gray(2, 2, 8, false);
  let zlib = compress_to_vec_zlib(&image.filtered(0), 6);
  let mut bytes = Vec::from(PNG_SIGNATURE);
  push_chunk(&mut bytes, b"IHDR", &ihdr(2, 2, 8, 2, false));
  push_chunk(&mut bytes, b"IDAT", &zlib);
  push_chunk(&mut bytes, b"PLTE", &[1, 2, 3]);
  push_chunk(&mut bytes, b"IEND", &[]);
  let err = Png::new(&bytes, DecodeOptions::strict()).unwrap_err();
  assert_eq!(err, PngError::ChunkOrder(ChunkTy::PLTE));
  assert_eq!(err.kind(), PngErrorKind::Structural);
  assert!(Png::new(&bytes, DecodeOptions::permissive()).is_ok());
}

#[test]
fn test_crc_bit_flip() {
  let image = TestImage::gray(3, 3, 8, false);
  let zlib = compress_to_vec_zlib(&image.filtered(2), 6);
  let good = build_png(&image.ihdr(), &[(b"tEXt", &b"Comment\0abc"[..])], &zlib, 1);
  assert!(decode_png(&good, DecodeOptions::strict()).is_ok());

  // signature + IHDR chunk + tEXt length and type, then the text data
  let text_data_at = 8 + (12 + 13) + 8;
  assert_eq!(&good[text_data_at..text_data_at + 7], b"Comment");
  let mut bad = good.clone();
  bad[text_data_at + 9] ^= 0b0000_0100;

  let err = decode_png(&bad, DecodeOptions::strict()).unwrap_err();
  assert!(matches!(err, PngError::CrcMismatch { ty: ChunkTy::tEXt, .. }));
  assert_eq!(err.kind(), PngErrorKind::Integrity);

  let expected = decode_png(&good, DecodeOptions::strict()).unwrap().bitmap;
  assert_eq!(decode_png(&bad, DecodeOptions::permissive()).unwrap().bitmap, expected);
  let unchecked = DecodeOptions::strict().set_check_integrity(false);
  assert_eq!(decode_png(&bad, unchecked).unwrap().bitmap, expected);
}

#[test]
fn test_missing_end() {
  let image = TestImage::gray(4, 3, 4, false);
  let zlib = compress_to_vec_zlib(&image.filtered(1), 6);
  let mut bytes = build_png(&image.ihdr(), &[], &zlib, 2);
  bytes.truncate(bytes.len() - 12);
  assert_eq!(decode_png(&bytes, DecodeOptions::strict()).unwrap_err(), PngError::LastChunkNotIEND);
  let png = Png::new(&bytes, DecodeOptions::permissive()).unwrap();
  assert!(!png.has_end());
  let bitmap = png.decode().unwrap().bitmap;
  assert_eq!(bitmap.sample(3, 2, 0), Some(image.samples[11]));
}

#[test]
fn test_text_between_image_data_and_end() {
  let image = TestImage::gray(3, 3, 8, false);
  let zlib = compress_to_vec_zlib(&image.filtered(2), 6);
  let mut bytes = Vec::from(PNG_SIGNATURE);
  push_chunk(&mut bytes, b"IHDR", &image.ihdr());
  push_chunk(&mut bytes, b"IDAT", &zlib);
  push_chunk(&mut bytes, b"tEXt", b"Comment\0after the data");
  push_chunk(&mut bytes, b"IEND", &[]);

  // the chunk layout itself is legal
  let png = Png::new(&bytes, DecodeOptions::strict()).unwrap();
  assert!(png.has_end());
  assert_eq!(png.decode().unwrap_err(), PngError::MissingEnd);

  let bitmap = decode_png(&bytes, DecodeOptions::permissive()).unwrap().bitmap;
  assert_eq!(bitmap.sample(2, 2, 0), Some(image.samples[8]));
}

#[test]
fn test_compressed_text_inflate_limit() {
  let image = TestImage::gray(1, 1, 8, false);
  let zlib = compress_to_vec_zlib(&image.filtered(0), 6);
  let mut ztxt = b"Comment\0\0".to_vec();
  ztxt.extend(compress_to_vec_zlib(&vec![b'z'; 9 << 20], 9));
  let bytes = build_png(&image.ihdr(), &[(b"zTXt", &ztxt[..])], &zlib, 1);

  for options in [DecodeOptions::strict(), DecodeOptions::permissive()] {
    let png = Png::new(&bytes, options).unwrap();
    let texts = png.text_chunks();
    let err = texts[0].clone().unwrap_err();
    assert_eq!(err, PngError::InflateLimitExceeded { limit: DecodeOptions::DEFAULT_MAX_ANCILLARY_INFLATE });
    assert_eq!(err.kind(), PngErrorKind::Codec);
    // the image itself is unaffected
    assert!(png.decode().is_ok());
  }

  let roomy = DecodeOptions::strict().set_max_ancillary_inflate(10 << 20);
  let png = Png::new(&bytes, roomy).unwrap();
  assert_eq!(png.text_chunks()[0].as_ref().unwrap().text.len(), 9 << 20);
}

#[test]
fn test_corrupt_zlib_is_always_fatal() {
  let image = TestImage::gray(4, 4, 8, false);
  let mut zlib = compress_to_vec_zlib(&image.filtered(0), 6);
  zlib[0] = 0xFF;
  let bytes = build_png(&image.ihdr(), &[], &zlib, 1);
  for options in [DecodeOptions::strict(), DecodeOptions::permissive()] {
    let err = decode_png(&bytes, options).unwrap_err();
    assert_eq!(err, PngError::Decompression);
    assert_eq!(err.kind(), PngErrorKind::Codec);
  }
}

#[test]
fn test_short_image_data() {
  let image = TestImage::gray(4, 4, 8, false);
  let mut filtered = image.filtered(0);
  filtered.truncate(10);
  let bytes = build_png(&image.ihdr(), &[], &compress_to_vec_zlib(&filtered, 6), 1);
  assert_eq!(
    decode_png(&bytes, DecodeOptions::strict()).unwrap_err(),
    PngError::NotEnoughImageData { expected: 20, actual: 10 }
  );
  let bitmap = decode_png(&bytes, DecodeOptions::permissive()).unwrap().bitmap;
  assert_eq!(bitmap.sample(0, 0, 0), Some(image.samples[0]));
  assert_eq!(bitmap.sample(3, 3, 0), Some(0));
}

#[test]
fn test_decode_task_budget() {
  let image = TestImage::gray(4, 4, 8, true);
  let bytes = image.to_png(4);
  let options = DecodeOptions::strict().set_slice_budget(1);
  let png = Png::new(&bytes, options).unwrap();
  let mut task = png.decode_task().unwrap();
  // passes 1, 4, 5, 6, 7 hold 1 + 1 + 1 + 2 + 2 lines
  let mut yields = Vec::new();
  let bitmap = loop {
    match task.step().unwrap() {
      Step::Yield { progress } => yields.push(progress),
      Step::Finished(bitmap) => break bitmap,
    }
  };
  assert_eq!(yields, [(1, 7), (2, 7), (3, 7), (4, 7), (5, 7), (6, 7)]);
  assert_eq!(task.step(), Err(PngError::TaskFinished));
  assert_eq!(bitmap, decode_png(&bytes, DecodeOptions::strict()).unwrap().bitmap);
}

#[test]
fn test_decode_is_deterministic() {
  let image = TestImage::gray(13, 7, 2, true);
  let bytes = image.to_png(3);
  let first = decode_png(&bytes, DecodeOptions::strict()).unwrap();
  for _ in 0..3 {
    assert_eq!(decode_png(&bytes, DecodeOptions::strict()).unwrap(), first);
  }
}

#[test]
fn test_dimension_limit() {
  let image = TestImage::gray(30, 2, 8, false);
  let bytes = image.to_png(0);
  let options = DecodeOptions::permissive().set_max_dimensions(16, 16);
  assert_eq!(decode_png(&bytes, options).unwrap_err(), PngError::DimensionsTooLarge { width: 30, height: 2 });
}

#[test]
fn test_scan_chunks_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    for options in [DecodeOptions::strict(), DecodeOptions::permissive()] {
      let _ = decode_png(&v, options);
    }
  }
  // even totally random data should never panic the decoder!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    let mut with_signature = Vec::from(PNG_SIGNATURE);
    with_signature.extend_from_slice(&v);
    for options in [DecodeOptions::strict(), DecodeOptions::permissive()] {
      let _ = decode_png(&v, options);
      let _ = decode_png(&with_signature, options);
      let _ = RawChunkIter::new(&with_signature).count();
    }
  }
}

#[test]
fn test_damaged_real_file_no_panics() {
  let image = TestImage::gray(9, 9, 4, true);
  let good = image.to_png(4);
  // flip every bit of the file in turn, which must never panic
  for i in 8..good.len() {
    for bit in 0..8 {
      let mut bad = good.clone();
      bad[i] ^= 1 << bit;
      let _ = decode_png(&bad, DecodeOptions::permissive());
      let _ = decode_png(&bad, DecodeOptions::strict().set_check_integrity(false));
    }
  }
}
