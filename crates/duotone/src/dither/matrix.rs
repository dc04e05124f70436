//! # 8x8 Threshold Matrix
//!
//! The fixed Bayer table used by [`OrderedMatrix`](super::OrderedMatrix).
//! It tiles the whole buffer periodically: pixel `(x, y)` reads entry
//! `[y mod 8][x mod 8]`.
//!
//! ```text
//!     0   1   2   3   4   5   6   7   (x mod 8)
//!   ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! 0 │ 0 │32 │ 8 │40 │ 2 │34 │10 │42 │
//! 1 │48 │16 │56 │24 │50 │18 │58 │26 │
//! 2 │12 │44 │ 4 │36 │14 │46 │ 6 │38 │
//! 3 │60 │28 │52 │20 │62 │30 │54 │22 │
//! 4 │ 3 │35 │11 │43 │ 1 │33 │ 9 │41 │
//! 5 │51 │19 │59 │27 │49 │17 │57 │25 │
//! 6 │15 │47 │ 7 │39 │13 │45 │ 5 │37 │
//! 7 │63 │31 │55 │23 │61 │29 │53 │21 │
//!   └───┴───┴───┴───┴───┴───┴───┴───┘
//! (y mod 8)
//! ```
//!
//! Raw entries span `0..=63` and are used unnormalized; the ordered
//! strategy scales them by `strength * 4`.

/// Bayer 8x8 threshold matrix, indexed `[row][column]`.
///
/// Every value in `0..64` appears exactly once.
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Raw matrix entry for pixel `(x, y)`.
///
/// ```
/// use duotone::dither::matrix::entry;
/// assert_eq!(entry(0, 0), 0);
/// assert_eq!(entry(1, 1), 16);
/// assert_eq!(entry(9, 9), 16);
/// ```
#[inline]
pub fn entry(x: usize, y: usize) -> u8 {
    BAYER8[y & 7][x & 7]
}
