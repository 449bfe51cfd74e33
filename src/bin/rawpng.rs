use std::path::PathBuf;

use clap::Parser;
use log::Level;
use rawpng::png::{DecodeOptions, Png, PngChunk, RawSamples};

/// Prints the chunks, the metadata, and a summary of the decoded bitmap of
/// PNG files.
#[derive(Parser, Debug)]
#[command(name = "rawpng", version, about, long_about = None)]
struct Args {
  /// PNG files to read
  #[arg(value_name = "FILE", required = true)]
  files: Vec<PathBuf>,

  /// Log and keep going where the format allows it, instead of stopping at the
  /// first violation
  #[arg(short, long)]
  permissive: bool,

  /// Skip CRC checks
  #[arg(long)]
  no_crc: bool,

  /// Logging detail: -v for info, -vv for debug, -vvv for trace
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,

  /// Stop after printing the chunk list
  #[arg(long)]
  chunks_only: bool,
}

fn main() {
  let args = Args::parse();
  let level = match args.verbose {
    0 => Level::Warn,
    1 => Level::Info,
    2 => Level::Debug,
    _ => Level::Trace,
  };
  if let Err(e) = simple_logger::init_with_level(level) {
    eprintln!("couldn't set up logging: {e}");
  }
  let options =
    DecodeOptions::default().set_permissive(args.permissive).set_check_integrity(!args.no_crc);

  let mut failures = 0;
  for path in &args.files {
    print!("Reading `{}`... ", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => {
        println!("got {} bytes.", bytes.len());
        bytes
      }
      Err(e) => {
        println!("{e}");
        failures += 1;
        continue;
      }
    };
    if !print_png(&bytes, options, args.chunks_only) {
      failures += 1;
    }
  }
  if failures > 0 {
    std::process::exit(1);
  }
}

/// Gives `false` if the file couldn't be decoded.
fn print_png(bytes: &[u8], options: DecodeOptions, chunks_only: bool) -> bool {
  let png = match Png::new(bytes, options) {
    Ok(png) => png,
    Err(e) => {
      println!("  invalid: {e} ({:?})", e.kind());
      return false;
    }
  };
  for (n, (chunk, decoded)) in png.decoded_chunks().enumerate() {
    match decoded {
      Ok(PngChunk::IDAT(data)) => println!("  {n}: IDAT, {} bytes", data.len()),
      Ok(PngChunk::Unknown { ty, data }) => println!("  {n}: unknown {ty}, {} bytes", data.len()),
      Ok(decoded) => println!("  {n}: {decoded:?}"),
      Err(e) => println!("  {n}: {} chunk couldn't be decoded: {e}", chunk.ty),
    }
  }
  if chunks_only {
    return true;
  }

  if let Ok(Some(gamma)) = png.gamma() {
    println!("  gamma: {}", gamma.to_f64());
  }
  if let Ok(Some(phys)) = png.physical_dimensions() {
    if let Some((x, y)) = phys.dpi() {
      println!("  dpi: {x:.1} x {y:.1}");
    }
  }
  if let Ok(Some(offs)) = png.offset() {
    let unit = if offs.is_micrometers { "um" } else { "px" };
    println!("  offset: {}{unit}, {}{unit}", offs.x, offs.y);
  }
  if let Ok(Some(ster)) = png.stereo() {
    println!("  stereo: {:?}", ster.mode);
  }
  if let Ok(Some(time)) = png.last_modified() {
    println!("  last modified: {time}");
  }
  for text in png.text_chunks().into_iter().flatten() {
    println!("  {}: {:?}", text.keyword, text.text);
  }

  match png.decode() {
    Ok(decoded) => {
      let bitmap = &decoded.bitmap;
      let kind = match bitmap.samples {
        RawSamples::U8(_) => "bytes",
        RawSamples::U16(_) => "u16 samples",
      };
      println!(
        "  bitmap: {}x{} {:?} at {} bits, {} {kind}, {} bytes per scanline",
        bitmap.width,
        bitmap.height,
        bitmap.color_type,
        bitmap.bit_depth,
        bitmap.samples.len(),
        bitmap.bytes_per_scanline,
      );
      true
    }
    Err(e) => {
      println!("  decode failed: {e} ({:?})", e.kind());
      false
    }
  }
}
