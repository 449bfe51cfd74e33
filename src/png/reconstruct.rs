use super::*;

/// The outcome of one [`DecodeTask::step`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
  /// More scanlines remain. `progress` is `(done_lines, total_lines)`,
  /// counting the scanlines of every pass.
  Yield { progress: (usize, usize) },
  /// The raster is complete.
  Finished(RawBitmap),
}

/// A resumable scanline reconstruction.
///
/// Each [`step`](Self::step) unfilters whole scanlines until the options'
/// slice budget of bytes is used up, then hands control back. A step always
/// processes at least one scanline, so driving a task in a loop always
/// terminates. The partially built raster is never exposed: drop the task to
/// abandon the decode.
///
/// ```
/// use rawpng::png::*;
/// # fn f(task: DecodeTask) -> PngResult<RawBitmap> {
/// let mut task = task;
/// loop {
///   match task.step()? {
///     Step::Yield { progress: (done, total) } => println!("{done}/{total}"),
///     Step::Finished(bitmap) => return Ok(bitmap),
///   }
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DecodeTask {
  header: IHDR,
  options: DecodeOptions,
  /// Filtered data, unfiltered in place as the task goes.
  data: Vec<u8>,
  raster: Vec<u8>,
  passes: Vec<PassInfo>,
  zeroes: Vec<u8>,
  pass_index: usize,
  line_in_pass: u32,
  data_pos: usize,
  done_lines: usize,
  total_lines: usize,
  finished: bool,
}
impl DecodeTask {
  /// Prepares to reconstruct `header`'s image from decompressed `data`.
  ///
  /// Data shorter than the geometry requires is an error in strict mode. In
  /// permissive mode the missing bytes are zeroes, which reconstruct as
  /// unfiltered black.
  ///
  /// A header that [`IHDR::from_data`] would reject is
  /// [`PngError::IllegalHeader`].
  pub fn new(header: IHDR, mut data: Vec<u8>, options: DecodeOptions) -> PngResult<Self> {
    let legal_size = (1..=IHDR::MAX_DIMENSION).contains(&header.width)
      && (1..=IHDR::MAX_DIMENSION).contains(&header.height);
    if !legal_size || !header.color_type.allows_bit_depth(header.bit_depth) {
      return Err(PngError::IllegalHeader);
    }
    check_dimensions(&header, &options)?;
    let expected = header.filtered_data_len()?;
    if data.len() < expected {
      options.tolerate(PngError::NotEnoughImageData { expected, actual: data.len() })?;
      data
        .try_reserve_exact(expected - data.len())
        .map_err(|_| PngError::AllocationFailed { bytes: expected })?;
      data.resize(expected, 0);
    } else if data.len() > expected {
      debug!("ignoring {} bytes of image data past the end of the image", data.len() - expected);
      data.truncate(expected);
    }

    let raster_len = header
      .bytes_per_scanline(header.width)
      .checked_mul(header.height as usize)
      .ok_or(PngError::CheckedMath)?;
    let mut raster = Vec::new();
    raster.try_reserve_exact(raster_len).map_err(|_| PngError::AllocationFailed { bytes: raster_len })?;
    raster.resize(raster_len, 0);

    let passes: Vec<PassInfo> =
      image_passes(header.width, header.height, header.is_interlaced).filter(|p| !p.is_empty()).collect();
    let total_lines = passes.iter().map(|p| p.height as usize).sum();
    let widest = passes.iter().map(|p| header.bytes_per_scanline(p.width)).max().unwrap_or(0);

    Ok(Self {
      header,
      options,
      data,
      raster,
      passes,
      zeroes: vec![0; widest],
      pass_index: 0,
      line_in_pass: 0,
      data_pos: 0,
      done_lines: 0,
      total_lines,
      finished: false,
    })
  }

  #[inline]
  #[must_use]
  pub fn header(&self) -> &IHDR {
    &self.header
  }

  /// `(done_lines, total_lines)`
  #[inline]
  #[must_use]
  pub fn progress(&self) -> (usize, usize) {
    (self.done_lines, self.total_lines)
  }

  /// Does the next slice of work.
  ///
  /// ## Failure
  /// * An illegal filter type byte, in strict mode.
  /// * [`PngError::TaskFinished`] if the task already returned
  ///   [`Step::Finished`].
  pub fn step(&mut self) -> PngResult<Step> {
    if self.finished {
      return Err(PngError::TaskFinished);
    }
    let budget = self.options.slice_budget();
    let mut spent = 0_usize;
    while let Some(pass) = self.passes.get(self.pass_index).copied() {
      if spent >= budget {
        break;
      }
      spent += self.unfilter_next_line(&pass)?;
      self.done_lines += 1;
      self.line_in_pass += 1;
      if self.line_in_pass >= pass.height {
        trace!("finished pass {}", pass.level);
        self.pass_index += 1;
        self.line_in_pass = 0;
      }
    }
    if self.pass_index < self.passes.len() {
      debug!("reconstructed {}/{} scanlines", self.done_lines, self.total_lines);
      return Ok(Step::Yield { progress: self.progress() });
    }
    self.finished = true;
    let raster = core::mem::take(&mut self.raster);
    self.data = Vec::new();
    Ok(Step::Finished(RawBitmap::from_raster(&self.header, raster)))
  }

  /// Steps until the bitmap is done.
  pub fn run_to_completion(mut self) -> PngResult<RawBitmap> {
    loop {
      if let Step::Finished(bitmap) = self.step()? {
        return Ok(bitmap);
      }
    }
  }

  /// Returns the bytes consumed, filter byte included.
  fn unfilter_next_line(&mut self, pass: &PassInfo) -> PngResult<usize> {
    let header = self.header;
    let options = self.options;
    let line_number = self.done_lines;
    let bpl = header.bytes_per_scanline(pass.width);
    let start = self.data_pos;

    let (before, rest) = self.data.split_at_mut(start);
    let (filter_byte, line) = rest.split_first_mut().ok_or(PngError::CheckedMath)?;
    let line = line.get_mut(..bpl).ok_or(PngError::CheckedMath)?;
    let prev = if self.line_in_pass == 0 { &self.zeroes[..bpl] } else { &before[start - bpl..] };

    let filter = match FilterType::try_from(*filter_byte) {
      Ok(filter) => filter,
      Err(filter) => {
        options.tolerate(PngError::IllegalFilterType { line: line_number as u32, filter })?;
        FilterType::None
      }
    };
    unfilter_line(filter, header.filter_stride(), prev, line);
    scatter_line(&header, pass, self.line_in_pass, line, &mut self.raster);

    self.data_pos = start + 1 + bpl;
    Ok(1 + bpl)
  }
}

/// Dimension limits apply in both strict and permissive mode.
pub(crate) fn check_dimensions(header: &IHDR, options: &DecodeOptions) -> PngResult<()> {
  if header.width > options.max_width || header.height > options.max_height {
    Err(PngError::DimensionsTooLarge { width: header.width, height: header.height })
  } else {
    Ok(())
  }
}

/// Places one unfiltered pass scanline into the full raster.
fn scatter_line(header: &IHDR, pass: &PassInfo, pass_y: u32, line: &[u8], raster: &mut [u8]) {
  let row_len = header.bytes_per_scanline(header.width);
  if pass.level == 0 {
    let row_start = (pass_y as usize) * row_len;
    if let Some(dst) = raster.get_mut(row_start..row_start + line.len()) {
      dst.copy_from_slice(line);
    }
    return;
  }
  let bpp = header.bits_per_pixel();
  if bpp >= 8 {
    let pixel_bytes = bpp / 8;
    for (pass_x, pixel) in (0..pass.width).zip(line.chunks_exact(pixel_bytes)) {
      let (x, y) = pass.full_pos(pass_x, pass_y);
      let at = (y as usize) * row_len + (x as usize) * pixel_bytes;
      if let Some(dst) = raster.get_mut(at..at + pixel_bytes) {
        dst.copy_from_slice(pixel);
      }
    }
  } else {
    let mask = (1_u8 << bpp) - 1;
    for pass_x in 0..pass.width {
      let src_bit = (pass_x as usize) * bpp;
      let value = (line[src_bit / 8] >> (8 - bpp - src_bit % 8)) & mask;
      let (x, y) = pass.full_pos(pass_x, pass_y);
      let dst_bit = (x as usize) * bpp;
      let shift = 8 - bpp - dst_bit % 8;
      if let Some(byte) = raster.get_mut((y as usize) * row_len + dst_bit / 8) {
        *byte = (*byte & !(mask << shift)) | (value << shift);
      }
    }
  }
}
