use super::*;

/// The per-scanline filter types of PNG filter method 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  None = 0,
  Sub = 1,
  Up = 2,
  Average = 3,
  Paeth = 4,
}
impl TryFrom<u8> for FilterType {
  type Error = u8;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      other => return Err(other),
    })
  }
}

/// Picks whichever of `a` (left), `b` (up), or `c` (up-left) is closest to
/// `a + b - c`.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // ties go to `a`, then `b`
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Reverses one scanline's filter in place.
///
/// * `stride` is the filter byte distance (see [`IHDR::filter_stride`]).
/// * `prev` is the already reconstructed previous line of the same pass, or
///   all zeroes for the first line of a pass. It must be the same length as
///   `line`.
///
/// Filtering works on bytes no matter the bit depth, and all arithmetic wraps.
pub fn unfilter_line(filter: FilterType, stride: usize, prev: &[u8], line: &mut [u8]) {
  debug_assert_eq!(prev.len(), line.len());
  debug_assert!(stride > 0);
  let stride = stride.min(line.len());
  match filter {
    FilterType::None => (),
    FilterType::Sub => {
      // the first pixel has an implied `a` of zero
      for i in stride..line.len() {
        line[i] = line[i].wrapping_add(line[i - stride]);
      }
    }
    FilterType::Up => {
      line.iter_mut().zip(prev.iter().copied()).for_each(|(x, b)| *x = x.wrapping_add(b));
    }
    FilterType::Average => {
      for (x, b) in line.iter_mut().zip(prev.iter().copied()).take(stride) {
        *x = x.wrapping_add(b / 2);
      }
      for i in stride..line.len() {
        let a = u16::from(line[i - stride]);
        let b = u16::from(prev[i]);
        line[i] = line[i].wrapping_add(((a + b) / 2) as u8);
      }
    }
    FilterType::Paeth => {
      // with `a` and `c` both zero, paeth always picks `b`
      for (x, b) in line.iter_mut().zip(prev.iter().copied()).take(stride) {
        *x = x.wrapping_add(b);
      }
      for i in stride..line.len() {
        let a = line[i - stride];
        let b = prev[i];
        let c = prev[i - stride];
        line[i] = line[i].wrapping_add(paeth_predict(a, b, c));
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// The forward direction of each filter, for building test data.
  fn filter_line(filter: FilterType, stride: usize, prev: &[u8], raw: &[u8]) -> Vec<u8> {
    let a = |i: usize| if i >= stride { raw[i - stride] } else { 0 };
    let c = |i: usize| if i >= stride { prev[i - stride] } else { 0 };
    (0..raw.len())
      .map(|i| {
        let predicted = match filter {
          FilterType::None => 0,
          FilterType::Sub => a(i),
          FilterType::Up => prev[i],
          FilterType::Average => ((u16::from(a(i)) + u16::from(prev[i])) / 2) as u8,
          FilterType::Paeth => paeth_predict(a(i), prev[i], c(i)),
        };
        raw[i].wrapping_sub(predicted)
      })
      .collect()
  }

  const ALL_FILTERS: [FilterType; 5] =
    [FilterType::None, FilterType::Sub, FilterType::Up, FilterType::Average, FilterType::Paeth];

  /// A raster with plenty of wrapping: values near 0 and 255 next to each
  /// other.
  fn test_raster(width_bytes: usize, height: usize) -> Vec<Vec<u8>> {
    (0..height)
      .map(|y| {
        (0..width_bytes).map(|x| ((x * 97 + y * 61 + (x * y) % 7) as u8).wrapping_mul(37)).collect()
      })
      .collect()
  }

  #[test]
  fn test_paeth_predict_ties() {
    // all equal: the answer is `a`
    for v in [0, 1, 127, 255] {
      assert_eq!(paeth_predict(v, v, v), v);
    }
    assert_eq!(paeth_predict(20, 10, 10), 20);
    assert_eq!(paeth_predict(10, 20, 10), 20);
    assert_eq!(paeth_predict(5, 15, 10), 10);
    // a and b tie, a wins
    assert_eq!(paeth_predict(10, 10, 20), 10);
    // b and c tie, b wins
    assert_eq!(paeth_predict(0, 3, 1), 3);
  }

  #[test]
  fn test_filter_type_from_byte() {
    assert_eq!(FilterType::try_from(4), Ok(FilterType::Paeth));
    assert_eq!(FilterType::try_from(5), Err(5));
    assert_eq!(FilterType::try_from(255), Err(255));
  }

  #[test]
  fn test_each_filter_round_trips() {
    for stride in [1, 2, 3, 4, 6, 8] {
      let raster = test_raster(stride * 5, 4);
      for filter in ALL_FILTERS {
        let mut prev_raw = vec![0_u8; raster[0].len()];
        let mut prev_out = vec![0_u8; raster[0].len()];
        for (y, raw) in raster.iter().enumerate() {
          let mut line = filter_line(filter, stride, &prev_raw, raw);
          unfilter_line(filter, stride, &prev_out, &mut line);
          assert_eq!(&line, raw, "filter {filter:?} stride {stride} line {y}");
          prev_raw = raw.clone();
          prev_out = line;
        }
      }
    }
  }

  #[test]
  fn test_mixed_filters_round_trip() {
    let stride = 3;
    let raster = test_raster(stride * 7, 10);
    let mut prev = vec![0_u8; raster[0].len()];
    for (y, raw) in raster.iter().enumerate() {
      let filter = ALL_FILTERS[y % 5];
      let mut line = filter_line(filter, stride, &prev, raw);
      unfilter_line(filter, stride, &prev, &mut line);
      assert_eq!(&line, raw);
      prev = line;
    }
  }

  #[test]
  fn test_first_column_and_first_row_use_zero() {
    let zero = [0_u8; 4];
    // x < stride: `a` and `c` are zero, so Sub leaves the first pixel alone
    let mut line = [10, 20, 1, 2];
    unfilter_line(FilterType::Sub, 2, &zero, &mut line);
    assert_eq!(line, [10, 20, 11, 22]);

    // y == 0: `b` is zero, so Up does nothing
    let mut line = [10, 20, 30, 40];
    unfilter_line(FilterType::Up, 1, &zero, &mut line);
    assert_eq!(line, [10, 20, 30, 40]);

    // y == 0: Average only sees a/2
    let mut line = [10, 20, 30, 40];
    unfilter_line(FilterType::Average, 1, &zero, &mut line);
    assert_eq!(line, [10, 25, 42, 61]);

    // y == 0: Paeth degenerates into Sub
    let mut line = [10, 20, 30, 40];
    unfilter_line(FilterType::Paeth, 1, &zero, &mut line);
    assert_eq!(line, [10, 30, 60, 100]);

    // x == 0 with a real previous line: Paeth picks `b`, Average uses b/2
    let prev = [200, 0, 0, 0];
    let mut line = [100, 0, 0, 0];
    unfilter_line(FilterType::Paeth, 1, &prev, &mut line);
    assert_eq!(line[0], 44);
    let mut line = [100, 0, 0, 0];
    unfilter_line(FilterType::Average, 1, &prev, &mut line);
    assert_eq!(line[0], 200);
  }

  #[test]
  fn test_arithmetic_wraps() {
    let prev = [255_u8, 255];
    let mut line = [1_u8, 1];
    unfilter_line(FilterType::Up, 1, &prev, &mut line);
    assert_eq!(line, [0, 0]);
    // (255 + 255) / 2 must not overflow before the halving
    let mut line = [0_u8, 0];
    unfilter_line(FilterType::Average, 1, &[255, 255], &mut line);
    assert_eq!(line, [127, 191]);
  }

  #[test]
  fn test_stride_wider_than_line() {
    let mut line = [7_u8, 8];
    unfilter_line(FilterType::Sub, 8, &[0, 0], &mut line);
    assert_eq!(line, [7, 8]);
    unfilter_line(FilterType::Paeth, 8, &[1, 1], &mut line);
    assert_eq!(line, [8, 9]);
  }
}
