//! Ordered dithering with the 8x8 Bayer matrix.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::matrix::BAYER8;
use super::{tone, Dither, DitherParams};
use crate::buffer::{PixelBuffer, PixelLayout};

/// Ordered (Bayer) dithering.
///
/// Pixel `(x, y)` is bright when its grayscale exceeds
/// `trunc(BAYER8[y % 8][x % 8] * clamp(strength, 0, 1) * 4)`. Raw matrix
/// entries are used directly, so thresholds span `0..=252` at full
/// strength and collapse to `0` at strength zero (everything but pure
/// black turns bright).
///
/// There is no inter-pixel dependency: rows are processed in parallel
/// when the `parallel` feature is enabled, with output identical to
/// [`sequential`](Self::sequential).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedMatrix {
    parallel: bool,
}

impl Default for OrderedMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedMatrix {
    pub fn new() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Force single-threaded row processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Matrix gain for a raw strength.
#[inline]
fn matrix_scale(strength: f64) -> f32 {
    strength.clamp(0.0, 1.0) as f32 * 4.0
}

fn dither_row(
    row: &mut [u8],
    y: usize,
    scale: f32,
    layout: PixelLayout,
    dark: [u8; 3],
    bright: [u8; 3],
) {
    let thresholds = &BAYER8[y & 7];
    for (x, px) in row.chunks_exact_mut(layout.bytes_per_pixel()).enumerate() {
        let threshold = (f32::from(thresholds[x & 7]) * scale) as i32;
        let rgb = if layout.read(px).grayscale() > threshold {
            bright
        } else {
            dark
        };
        layout.write_rgb(px, rgb);
    }
}

impl Dither for OrderedMatrix {
    fn apply(&self, buf: &mut PixelBuffer<'_>, params: &DitherParams) {
        // NaN strength yields NaN thresholds, which truncate to 0.
        let scale = matrix_scale(params.strength);
        let layout = buf.layout();
        let dark = tone(false, params);
        let bright = tone(true, params);

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                buf.par_rows_mut()
                    .for_each(|(y, row)| dither_row(row, y, scale, layout, dark, bright));
                return;
            }
        }

        for (y, row) in buf.rows_mut().enumerate() {
            dither_row(row, y, scale, layout, dark, bright);
        }
    }
}
