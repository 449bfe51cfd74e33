use super::*;

// ```
// 1 6 4 6 2 6 4 6
// 7 7 7 7 7 7 7 7
// 5 6 5 6 5 6 5 6
// 7 7 7 7 7 7 7 7
// 3 6 4 6 3 6 4 6
// 7 7 7 7 7 7 7 7
// 5 6 5 6 5 6 5 6
// 7 7 7 7 7 7 7 7
// ```
const X_OFFSETS: [u32; 7] = [0, 4, 0, 2, 0, 1, 0];
const Y_OFFSETS: [u32; 7] = [0, 0, 4, 0, 2, 0, 1];
const X_STEPS: [u32; 7] = [8, 8, 4, 4, 2, 2, 1];
const Y_STEPS: [u32; 7] = [8, 8, 8, 4, 4, 2, 2];

/// One reduced image of an interlaced PNG, or the whole image when it's not
/// interlaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PassInfo {
  /// 1 through 7 for Adam7 passes, 0 for a non-interlaced image.
  pub level: u8,
  pub width: u32,
  pub height: u32,
  pub x_offset: u32,
  pub y_offset: u32,
  pub x_step: u32,
  pub y_step: u32,
}
impl PassInfo {
  /// The "pass" that a non-interlaced image is stored as.
  #[inline]
  #[must_use]
  pub const fn full(width: u32, height: u32) -> Self {
    Self { level: 0, width, height, x_offset: 0, y_offset: 0, x_step: 1, y_step: 1 }
  }

  /// A pass with zero width or height has no scanlines at all, not even
  /// filter bytes.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.width == 0 || self.height == 0
  }

  #[inline]
  #[must_use]
  pub const fn pixel_count(&self) -> u64 {
    (self.width as u64) * (self.height as u64)
  }

  /// Converts a position within this pass into a position in the full image.
  #[inline]
  #[must_use]
  pub const fn full_pos(&self, pass_x: u32, pass_y: u32) -> (u32, u32) {
    (self.x_offset + pass_x * self.x_step, self.y_offset + pass_y * self.y_step)
  }
}

const fn reduced_len(full: u32, offset: u32, step: u32) -> u32 {
  if full <= offset {
    0
  } else {
    // written this way so that `full` near u32::MAX can't overflow
    (full - offset - 1) / step + 1
  }
}

/// The seven Adam7 passes for an image of the given size.
///
/// Small images can have passes with zero width or height.
#[must_use]
pub const fn adam7_passes(width: u32, height: u32) -> [PassInfo; 7] {
  let mut out = [PassInfo::full(0, 0); 7];
  let mut i = 0;
  while i < 7 {
    out[i] = PassInfo {
      level: (i + 1) as u8,
      width: reduced_len(width, X_OFFSETS[i], X_STEPS[i]),
      height: reduced_len(height, Y_OFFSETS[i], Y_STEPS[i]),
      x_offset: X_OFFSETS[i],
      y_offset: Y_OFFSETS[i],
      x_step: X_STEPS[i],
      y_step: Y_STEPS[i],
    };
    i += 1;
  }
  out
}

/// The passes an image's data is stored as, in order.
///
/// Non-interlaced data is re-stated as a single pass covering the full image,
/// so the rest of the decoder never has to think about the difference.
pub fn image_passes(width: u32, height: u32, interlaced: bool) -> impl Iterator<Item = PassInfo> {
  let full = core::iter::once(PassInfo::full(width, height)).filter(move |_| !interlaced);
  adam7_passes(width, height).into_iter().take(if interlaced { 7 } else { 0 }).chain(full)
}

#[test]
fn test_adam7_pass_dimensions() {
  let dims = |w, h| adam7_passes(w, h).map(|p| (p.width, p.height));
  assert_eq!(dims(8, 8), [(1, 1), (1, 1), (2, 1), (2, 2), (4, 2), (4, 4), (8, 4)]);
  assert_eq!(dims(1, 1), [(1, 1), (0, 1), (1, 0), (0, 1), (1, 0), (0, 1), (1, 0)]);
  // widths of each pass for widths 1 through 8
  let expected_w: [[u32; 8]; 7] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [0, 0, 0, 0, 1, 1, 1, 1],
    [1, 1, 1, 1, 2, 2, 2, 2],
    [0, 0, 1, 1, 1, 1, 2, 2],
    [1, 1, 2, 2, 3, 3, 4, 4],
    [0, 1, 1, 2, 2, 3, 3, 4],
    [1, 2, 3, 4, 5, 6, 7, 8],
  ];
  let expected_h: [[u32; 8]; 7] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [0, 0, 0, 0, 1, 1, 1, 1],
    [1, 1, 1, 1, 2, 2, 2, 2],
    [0, 0, 1, 1, 1, 1, 2, 2],
    [1, 1, 2, 2, 3, 3, 4, 4],
    [0, 1, 1, 2, 2, 3, 3, 4],
  ];
  for n in 1..=8_u32 {
    let passes = adam7_passes(n, n);
    for (i, pass) in passes.iter().enumerate() {
      assert_eq!(pass.width, expected_w[i][n as usize - 1], "pass {} w:{n}", i + 1);
      assert_eq!(pass.height, expected_h[i][n as usize - 1], "pass {} h:{n}", i + 1);
    }
  }
  // no overflow at the extremes
  let big = adam7_passes(u32::MAX, u32::MAX);
  assert_eq!(big[6].width, u32::MAX);
  assert_eq!(big[0].width, u32::MAX / 8 + 1);
}

#[test]
fn test_adam7_covers_every_pixel_once() {
  for w in 1..=19_u32 {
    for h in 1..=19_u32 {
      let mut hits = alloc::vec![0_u8; (w * h) as usize];
      let mut total = 0_u64;
      for pass in adam7_passes(w, h) {
        total += pass.pixel_count();
        for py in 0..pass.height {
          for px in 0..pass.width {
            let (x, y) = pass.full_pos(px, py);
            assert!(x < w && y < h, "pass {} put ({px},{py}) at ({x},{y}) in {w}x{h}", pass.level);
            hits[(y * w + x) as usize] += 1;
          }
        }
      }
      assert_eq!(total, u64::from(w * h), "{w}x{h}");
      assert!(hits.iter().all(|&n| n == 1), "{w}x{h}");
    }
  }
}

#[test]
fn test_one_by_one_has_one_nonempty_pass() {
  let nonempty: Vec<PassInfo> = adam7_passes(1, 1).into_iter().filter(|p| !p.is_empty()).collect();
  assert_eq!(nonempty.len(), 1);
  assert_eq!(nonempty[0].level, 1);
  assert_eq!(nonempty[0].full_pos(0, 0), (0, 0));
}

#[test]
fn test_image_passes() {
  let flat: Vec<PassInfo> = image_passes(5, 3, false).collect();
  assert_eq!(flat, [PassInfo::full(5, 3)]);
  let interlaced: Vec<PassInfo> = image_passes(5, 3, true).collect();
  assert_eq!(interlaced.len(), 7);
  assert_eq!(interlaced[0].level, 1);
  assert_eq!(interlaced[6].level, 7);
}
