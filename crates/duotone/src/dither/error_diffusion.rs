//! Single-tap directional error diffusion.
//!
//! Each pixel is compared against a fixed threshold derived from the
//! strength, recolored to one of the two output colors, and its
//! quantization error is pushed onto exactly one neighbor: the next pixel
//! along the traversal direction. Unlike Floyd-Steinberg there is no error
//! spread across rows, so every lane (a column for `Up`/`Down`, a row for
//! `Left`/`Right`) is independent of the others.
//!
//! # Parameters
//!
//! | Quantity | Formula | Range |
//! |----------|---------|-------|
//! | effective strength `s` | `clamp(strength, 0.05, 1.0)` | `[0.05, 1.0]` |
//! | threshold | `clamp(trunc(128 * (1 - s)), 64, 192)` | `[64, 121]` in practice |
//! | diffusion factor | `trunc(8 + 8 * s)` | `[8, 16]` |
//! | propagated error | `error * 8 / factor` | truncates toward zero |
//!
//! Strengths below `0.01` (and NaN) disable the pass entirely.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{tone, Direction, Dither, DitherParams};
use crate::buffer::{PixelBuffer, PixelLayout};
use crate::color::Pixel;

/// Strengths below this value leave the buffer untouched.
const MIN_STRENGTH: f64 = 0.01;

/// Lower bound of the effective strength once the pass is enabled.
const STRENGTH_FLOOR: f64 = 0.05;

/// Channel floor for the `Left` near-white override.
const NEAR_WHITE: u8 = 240;

/// Which pixels of each lane error diffusion visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Visit every pixel. The last pixel of a lane has no downstream
    /// neighbor and is quantized without propagating its error.
    #[default]
    Full,
    /// Classic plugin loop bounds: the last pixel of each lane is never
    /// visited, and vertical traversals also skip the first and last
    /// column.
    Legacy,
}

/// Fixed quantization threshold for an effective strength.
///
/// ```
/// use duotone::diffusion_threshold;
/// assert_eq!(diffusion_threshold(0.05), 121);
/// assert_eq!(diffusion_threshold(0.25), 96);
/// assert_eq!(diffusion_threshold(1.0), 64);
/// ```
#[inline]
pub fn diffusion_threshold(strength: f64) -> i32 {
    ((128.0 * (1.0 - strength)) as i32).clamp(64, 192)
}

/// Divisor applied (after multiplying by 8) to the propagated error.
///
/// ```
/// use duotone::diffusion_factor;
/// assert_eq!(diffusion_factor(0.05), 8);
/// assert_eq!(diffusion_factor(0.5), 12);
/// assert_eq!(diffusion_factor(1.0), 16);
/// ```
#[inline]
pub fn diffusion_factor(strength: f64) -> i32 {
    (8.0 + 8.0 * strength) as i32
}

/// Whether all three color channels exceed 240.
#[inline]
pub fn is_near_white(pixel: Pixel) -> bool {
    pixel.red > NEAR_WHITE && pixel.green > NEAR_WHITE && pixel.blue > NEAR_WHITE
}

/// Directional error diffusion ("punk dither").
///
/// # Example
///
/// ```
/// use duotone::{
///     Direction, DirectionalErrorDiffusion, Dither, DitherParams, PixelBuffer, PixelLayout,
/// };
///
/// let mut data = vec![100u8; 4 * 4 * 4];
/// let mut buf = PixelBuffer::packed(&mut data, 4, 4, PixelLayout::Rgba8).unwrap();
///
/// DirectionalErrorDiffusion::new(Direction::Right).apply(&mut buf, &DitherParams::new());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionalErrorDiffusion {
    direction: Direction,
    edge_policy: EdgePolicy,
    parallel: bool,
}

impl DirectionalErrorDiffusion {
    /// Diffusion along `direction` with the [`EdgePolicy::Full`] policy.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            edge_policy: EdgePolicy::Full,
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Select which pixels of each lane are visited.
    pub fn edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }

    /// Process rows one after another even when the `parallel` feature is
    /// enabled. Only horizontal traversals are ever parallel.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn quantizer(&self, strength: f64, params: &DitherParams, layout: PixelLayout) -> Quantizer {
        Quantizer {
            threshold: diffusion_threshold(strength),
            factor: diffusion_factor(strength),
            dark: tone(false, params),
            bright: tone(true, params),
            layout,
            force_bright: match self.direction {
                Direction::Left => Some(is_near_white),
                _ => None,
            },
            reverse: matches!(self.direction, Direction::Up | Direction::Left),
            skip_final: self.edge_policy == EdgePolicy::Legacy,
        }
    }
}

impl Dither for DirectionalErrorDiffusion {
    fn apply(&self, buf: &mut PixelBuffer<'_>, params: &DitherParams) {
        if !(params.strength >= MIN_STRENGTH) || buf.is_empty() {
            return;
        }
        let strength = params.strength.clamp(STRENGTH_FLOOR, 1.0);
        let quantizer = self.quantizer(strength, params, buf.layout());
        tracing::trace!(
            direction = ?self.direction,
            threshold = quantizer.threshold,
            factor = quantizer.factor,
            "error diffusion"
        );

        let (width, height) = (buf.width(), buf.height());
        let bpp = buf.layout().bytes_per_pixel();

        match self.direction {
            Direction::Up | Direction::Down => {
                // Columns never exchange error; sweep whole rows in lane order.
                let columns = match self.edge_policy {
                    EdgePolicy::Full => 0..width,
                    EdgePolicy::Legacy => 1..width.saturating_sub(1),
                };
                let rows = Lane {
                    base: 0,
                    step: buf.stride(),
                    len: height,
                };
                let data = buf.raw_mut();
                quantizer.for_each_step(rows, |row, next| {
                    for x in columns.clone() {
                        quantizer.visit(data, row + x * bpp, next.map(|n| n + x * bpp));
                    }
                });
            }
            Direction::Left | Direction::Right => {
                let lane = Lane {
                    base: 0,
                    step: bpp,
                    len: width,
                };

                #[cfg(feature = "parallel")]
                {
                    if self.parallel {
                        buf.par_rows_mut()
                            .for_each(|(_, row)| quantizer.run(row, lane));
                        return;
                    }
                }

                for row in buf.rows_mut() {
                    quantizer.run(row, lane);
                }
            }
        }
    }
}

/// One line of pixels: pixel `i` starts at byte `base + i * step`.
#[derive(Debug, Clone, Copy)]
struct Lane {
    base: usize,
    step: usize,
    len: usize,
}

impl Lane {
    #[inline]
    fn at(&self, i: usize) -> usize {
        self.base + i * self.step
    }
}

/// Per-call constants of one diffusion pass.
struct Quantizer {
    threshold: i32,
    factor: i32,
    dark: [u8; 3],
    bright: [u8; 3],
    layout: PixelLayout,
    force_bright: Option<fn(Pixel) -> bool>,
    /// Walk lanes from the last index to the first.
    reverse: bool,
    /// Never visit the final position of a lane.
    skip_final: bool,
}

impl Quantizer {
    fn run(&self, data: &mut [u8], lane: Lane) {
        self.for_each_step(lane, |at, next| self.visit(data, at, next));
    }

    /// Call `f(position, downstream)` with byte offsets for every visited
    /// position of `lane`, in traversal order.
    fn for_each_step(&self, lane: Lane, mut f: impl FnMut(usize, Option<usize>)) {
        let visits = if self.skip_final {
            lane.len.saturating_sub(1)
        } else {
            lane.len
        };

        for n in 0..visits {
            let (i, next) = if self.reverse {
                let i = lane.len - 1 - n;
                (i, i.checked_sub(1))
            } else {
                (n, Some(n + 1).filter(|&j| j < lane.len))
            };
            f(lane.at(i), next.map(|j| lane.at(j)));
        }
    }

    #[inline]
    fn visit(&self, data: &mut [u8], at: usize, next: Option<usize>) {
        let bpp = self.layout.bytes_per_pixel();
        let pixel = self.layout.read(&data[at..at + bpp]);
        let gray = pixel.grayscale();

        let mask = gray > self.threshold;
        let error = gray - if mask { 255 } else { 0 };

        if let Some(next) = next {
            let delta = error * 8 / self.factor;
            for offset in self.layout.rgb_offsets() {
                let channel = &mut data[next + offset];
                *channel = (i32::from(*channel) + delta).clamp(0, 255) as u8;
            }
        }

        let bright = mask || self.force_bright.is_some_and(|force| force(pixel));
        let rgb = if bright { self.bright } else { self.dark };
        self.layout.write_rgb(&mut data[at..at + bpp], rgb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK: Pixel = Pixel::rgb(10, 20, 30);
    const BRIGHT: Pixel = Pixel::rgb(200, 210, 220);

    fn params(strength: f64) -> DitherParams {
        DitherParams::new().strength(strength).colors(DARK, BRIGHT)
    }

    /// Packed RGB bytes where every pixel is the given gray level.
    fn gray_pixels(levels: &[u8]) -> Vec<u8> {
        levels.iter().flat_map(|&v| [v, v, v]).collect()
    }

    fn run(direction: Direction, data: &mut [u8], w: usize, h: usize, strength: f64) {
        let mut buf = PixelBuffer::packed(data, w, h, PixelLayout::Rgb8).unwrap();
        DirectionalErrorDiffusion::new(direction).apply(&mut buf, &params(strength));
    }

    fn colors_of(data: &[u8]) -> Vec<Pixel> {
        data.chunks_exact(3)
            .map(|c| Pixel::rgb(c[0], c[1], c[2]))
            .collect()
    }

    #[test]
    fn test_threshold_always_clamped() {
        let mut s = 0.0;
        while s <= 2.0 {
            let t = diffusion_threshold(s);
            assert!((64..=192).contains(&t), "threshold {} for strength {}", t, s);
            s += 0.01;
        }
        assert_eq!(diffusion_threshold(-1.0), 192);
    }

    #[test]
    fn test_factor_range() {
        let mut s = STRENGTH_FLOOR;
        while s <= 1.0 {
            let f = diffusion_factor(s);
            assert!((8..=16).contains(&f), "factor {} for strength {}", f, s);
            s += 0.01;
        }
    }

    #[test]
    fn test_near_white_is_strict() {
        assert!(is_near_white(Pixel::rgb(241, 241, 241)));
        assert!(!is_near_white(Pixel::rgb(240, 255, 255)));
        assert!(!is_near_white(Pixel::rgb(255, 255, 200)));
    }

    #[test]
    fn test_low_strength_is_noop() {
        for strength in [0.0, 0.009, -1.0, f64::NAN] {
            let original = gray_pixels(&[10, 100, 200, 50]);
            let mut data = original.clone();
            run(Direction::Right, &mut data, 4, 1, strength);
            assert_eq!(data, original, "strength {}", strength);
        }
    }

    #[test]
    fn test_single_row_down_is_threshold_only() {
        // No row below, so nothing propagates; threshold at 0.5 is 64.
        let mut data = gray_pixels(&[10, 100, 200, 50]);
        run(Direction::Down, &mut data, 4, 1, 0.5);
        assert_eq!(colors_of(&data), vec![DARK, BRIGHT, BRIGHT, DARK]);
    }

    #[test]
    fn test_right_pushes_error_forward() {
        // 60 -> dark, error 60 * 8 / 12 = 40 lifts 30 to 70 > 64.
        let mut data = gray_pixels(&[60, 30]);
        run(Direction::Right, &mut data, 2, 1, 0.5);
        assert_eq!(colors_of(&data), vec![DARK, BRIGHT]);
    }

    #[test]
    fn test_left_pushes_error_backward() {
        let mut data = gray_pixels(&[30, 60]);
        run(Direction::Left, &mut data, 2, 1, 0.5);
        assert_eq!(colors_of(&data), vec![BRIGHT, DARK]);
    }

    #[test]
    fn test_vertical_directions() {
        // 1x2 column: top pixel first for Down, bottom first for Up.
        let mut data = gray_pixels(&[60, 30]);
        run(Direction::Down, &mut data, 1, 2, 0.5);
        assert_eq!(colors_of(&data), vec![DARK, BRIGHT]);

        let mut data = gray_pixels(&[30, 60]);
        run(Direction::Up, &mut data, 1, 2, 0.5);
        assert_eq!(colors_of(&data), vec![BRIGHT, DARK]);
    }

    #[test]
    fn test_negative_error_truncates_toward_zero() {
        // 200 -> bright, error -55 * 8 / 12 = -36 drops 90 to 54 <= 64.
        let mut data = gray_pixels(&[200, 90]);
        run(Direction::Right, &mut data, 2, 1, 0.5);
        assert_eq!(colors_of(&data), vec![BRIGHT, DARK]);
    }

    #[test]
    fn test_neighbor_channels_saturate() {
        // Red would overflow to 290; clamping keeps it at 255 so the
        // neighbor reads (255, 40, 40) with gray 113 instead of wrapping.
        let mut data = vec![60, 60, 60, 250, 0, 0];
        run(Direction::Right, &mut data, 2, 1, 0.5);
        assert_eq!(colors_of(&data), vec![DARK, BRIGHT]);
    }

    #[test]
    fn test_strength_above_one_is_clamped() {
        let levels: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
        let mut clamped = gray_pixels(&levels);
        let mut unit = clamped.clone();
        run(Direction::Right, &mut clamped, 8, 8, 3.0);
        run(Direction::Right, &mut unit, 8, 8, 1.0);
        assert_eq!(clamped, unit);
    }

    #[test]
    fn test_full_policy_two_color_closure() {
        let levels: Vec<u8> = (0..7 * 5).map(|i| (i * 37 % 256) as u8).collect();
        for direction in Direction::ALL {
            let mut data = gray_pixels(&levels);
            run(direction, &mut data, 7, 5, 0.4);
            for pixel in colors_of(&data) {
                assert!(
                    pixel == DARK || pixel == BRIGHT,
                    "{:?} left {:?}",
                    direction,
                    pixel
                );
            }
        }
    }

    #[test]
    fn test_legacy_right_skips_last_column() {
        let mut data = gray_pixels(&[200, 200, 77]);
        let mut buf = PixelBuffer::packed(&mut data, 3, 1, PixelLayout::Rgb8).unwrap();
        DirectionalErrorDiffusion::new(Direction::Right)
            .edge_policy(EdgePolicy::Legacy)
            .apply(&mut buf, &params(0.5));

        assert_eq!(buf.pixel(0, 0), BRIGHT);
        assert_eq!(buf.pixel(1, 0), BRIGHT);
        // Received error but was never recolored.
        assert!(!buf.pixel(2, 0).same_rgb(DARK));
        assert!(!buf.pixel(2, 0).same_rgb(BRIGHT));
    }

    #[test]
    fn test_legacy_down_skips_border_columns_and_last_row() {
        let mut data = gray_pixels(&[150; 9]);
        let mut buf = PixelBuffer::packed(&mut data, 3, 3, PixelLayout::Rgb8).unwrap();
        DirectionalErrorDiffusion::new(Direction::Down)
            .edge_policy(EdgePolicy::Legacy)
            .apply(&mut buf, &params(0.5));

        for y in 0..3 {
            for x in 0..3 {
                let visited = x == 1 && y < 2;
                let pixel = buf.pixel(x, y);
                let quantized = pixel == DARK || pixel == BRIGHT;
                assert_eq!(quantized, visited, "({}, {}) = {:?}", x, y, pixel);
            }
        }
        // Untouched border columns keep the source value.
        assert_eq!(buf.pixel(0, 2), Pixel::rgb(150, 150, 150));
    }

    #[test]
    fn test_legacy_up_skips_border_columns_and_first_row() {
        let mut data = gray_pixels(&[150; 12]);
        let mut buf = PixelBuffer::packed(&mut data, 4, 3, PixelLayout::Rgb8).unwrap();
        DirectionalErrorDiffusion::new(Direction::Up)
            .edge_policy(EdgePolicy::Legacy)
            .apply(&mut buf, &params(0.5));

        for y in 0..3 {
            for x in 0..4 {
                let visited = (1..3).contains(&x) && y > 0;
                let pixel = buf.pixel(x, y);
                let quantized = pixel == DARK || pixel == BRIGHT;
                assert_eq!(quantized, visited, "({}, {}) = {:?}", x, y, pixel);
            }
        }
    }

    fn transpose(levels: &[u8], w: usize, h: usize) -> Vec<u8> {
        (0..w * h).map(|i| levels[(i % h) * w + i / h]).collect()
    }

    #[test]
    fn test_vertical_matches_horizontal_on_transpose() {
        // Below the near-white floor so Left has no override to apply.
        let (w, h) = (9, 14);
        let levels: Vec<u8> = (0..w * h).map(|i| (i * 53 % 231) as u8).collect();
        let flipped = transpose(&levels, w, h);

        for (vertical, horizontal) in [
            (Direction::Down, Direction::Right),
            (Direction::Up, Direction::Left),
        ] {
            let mut columns = gray_pixels(&levels);
            run(vertical, &mut columns, w, h, 0.35);

            let mut rows = gray_pixels(&flipped);
            run(horizontal, &mut rows, h, w, 0.35);

            let expected: Vec<Pixel> = {
                let rows = colors_of(&rows);
                (0..w * h).map(|i| rows[(i % w) * h + i / w]).collect()
            };
            assert_eq!(colors_of(&columns), expected, "{:?}", vertical);
        }
    }

    #[test]
    fn test_left_near_white_comes_out_bright() {
        let mut data = gray_pixels(&[245, 10, 250]);
        run(Direction::Left, &mut data, 3, 1, 0.05);
        let colors = colors_of(&data);
        assert_eq!(colors[2], BRIGHT);
        assert_eq!(colors[0], BRIGHT);
    }

    #[test]
    fn test_alpha_and_padding_untouched() {
        // 3x2 RGBA with 4 padding bytes per row
        let stride = 3 * 4 + 4;
        let mut data = vec![0u8; stride * 2];
        for y in 0..2 {
            for x in 0..3 {
                let at = y * stride + x * 4;
                data[at..at + 4].copy_from_slice(&[90, 140, 190, (x * 50 + y) as u8]);
            }
            data[y * stride + 12..(y + 1) * stride].fill(0xAB);
        }
        let before = data.clone();

        for direction in Direction::ALL {
            let mut work = before.clone();
            let mut buf = PixelBuffer::new(&mut work, 3, 2, stride, PixelLayout::Rgba8).unwrap();
            DirectionalErrorDiffusion::new(direction).apply(&mut buf, &params(0.7));

            for y in 0..2 {
                for x in 0..3 {
                    let at = y * stride + x * 4 + 3;
                    assert_eq!(work[at], before[at], "{:?} alpha at ({}, {})", direction, x, y);
                }
                assert!(work[y * stride + 12..(y + 1) * stride]
                    .iter()
                    .all(|&b| b == 0xAB));
            }
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_rows_match_sequential() {
        let levels: Vec<u8> = (0..33 * 17).map(|i| (i * 13 % 256) as u8).collect();
        for direction in [Direction::Left, Direction::Right] {
            let mut par = gray_pixels(&levels);
            let mut seq = par.clone();

            let mut buf = PixelBuffer::packed(&mut par, 33, 17, PixelLayout::Rgb8).unwrap();
            DirectionalErrorDiffusion::new(direction).apply(&mut buf, &params(0.3));

            let mut buf = PixelBuffer::packed(&mut seq, 33, 17, PixelLayout::Rgb8).unwrap();
            DirectionalErrorDiffusion::new(direction)
                .sequential()
                .apply(&mut buf, &params(0.3));

            assert_eq!(par, seq, "{:?}", direction);
        }
    }
}
