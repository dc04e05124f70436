//! Two-color dithering strategies.
//!
//! Every strategy rewrites each visited pixel of a [`PixelBuffer`] to one
//! of two caller-chosen colors, using the grayscale proxy
//! [`Pixel::grayscale`](crate::Pixel::grayscale) as its luminance signal.
//!
//! # Strategies
//!
//! | Strategy | Threshold | Inter-pixel dependency |
//! |----------|-----------|------------------------|
//! | [`DirectionalErrorDiffusion`] | fixed, clamped to `[64, 192]` | sequential along one axis |
//! | [`OrderedMatrix`] | 8x8 Bayer table x `strength * 4` | none |
//! | [`StochasticBlueNoise`] | uniform noise x `strength` | none after noise draw |
//!
//! All strategies implement the [`Dither`] trait. [`Strategy`] is the
//! closed sum of the three, chosen from [`DitherParams`] by
//! [`Strategy::select`].
//!
//! # Example
//!
//! ```
//! use duotone::{Dither, DitherParams, OrderedMatrix, PixelBuffer, PixelLayout};
//!
//! let mut data = vec![128u8; 8 * 8 * 3];
//! let mut buf = PixelBuffer::packed(&mut data, 8, 8, PixelLayout::Rgb8).unwrap();
//!
//! OrderedMatrix::new().apply(&mut buf, &DitherParams::new().strength(0.5));
//! ```

mod blue_noise;
mod error_diffusion;
pub mod matrix;
mod ordered;
mod params;
mod strategy;

pub use blue_noise::{NoiseSource, StochasticBlueNoise};
pub use error_diffusion::{
    diffusion_factor, diffusion_threshold, is_near_white, DirectionalErrorDiffusion, EdgePolicy,
};
pub use ordered::OrderedMatrix;
pub use params::{block_factor_from_popup, DitherParams, BLOCK_FACTOR_CHOICES};
pub use strategy::Strategy;

use crate::buffer::PixelBuffer;

/// Dithering algorithm selector.
///
/// Hosts usually expose this as a 3-way popup; [`from_popup`](Self::from_popup)
/// maps its 1-based index. Out-of-range selectors map to `None`, which the
/// engine treats as "no dithering".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherAlgorithm {
    /// Single-tap directional error diffusion.
    #[default]
    ErrorDiffusion,
    /// Ordered dithering with the 8x8 Bayer matrix.
    Ordered,
    /// Per-pixel uniform random thresholds.
    BlueNoise,
}

impl DitherAlgorithm {
    /// All algorithms in popup order.
    pub const ALL: [DitherAlgorithm; 3] = [
        DitherAlgorithm::ErrorDiffusion,
        DitherAlgorithm::Ordered,
        DitherAlgorithm::BlueNoise,
    ];

    /// Map a 1-based popup index (`1` = error diffusion, `2` = Bayer,
    /// `3` = blue noise).
    ///
    /// ```
    /// use duotone::DitherAlgorithm;
    /// assert_eq!(DitherAlgorithm::from_popup(2), Some(DitherAlgorithm::Ordered));
    /// assert_eq!(DitherAlgorithm::from_popup(4), None);
    /// ```
    pub fn from_popup(index: i32) -> Option<Self> {
        match index {
            1 => Some(DitherAlgorithm::ErrorDiffusion),
            2 => Some(DitherAlgorithm::Ordered),
            3 => Some(DitherAlgorithm::BlueNoise),
            _ => None,
        }
    }

    /// Parse a case-insensitive algorithm name or its popup index.
    ///
    /// Accepts `error-diffusion` / `punk`, `ordered` / `bayer`,
    /// `blue-noise` / `noise`, and `1`..`3`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "error-diffusion" | "error_diffusion" | "diffusion" | "punk" => {
                Some(DitherAlgorithm::ErrorDiffusion)
            }
            "ordered" | "bayer" => Some(DitherAlgorithm::Ordered),
            "blue-noise" | "blue_noise" | "noise" => Some(DitherAlgorithm::BlueNoise),
            other => other.parse::<i32>().ok().and_then(Self::from_popup),
        }
    }

    /// Canonical name, as accepted by [`from_name`](Self::from_name).
    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::ErrorDiffusion => "error-diffusion",
            DitherAlgorithm::Ordered => "ordered",
            DitherAlgorithm::BlueNoise => "blue-noise",
        }
    }
}

/// Traversal direction of [`DirectionalErrorDiffusion`].
///
/// Error always propagates to the not-yet-visited neighbor along the
/// traversal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Bottom to top; error goes to the row above.
    Up,
    /// Top to bottom; error goes to the row below.
    #[default]
    Down,
    /// Right to left; error goes to the column on the left.
    Left,
    /// Left to right; error goes to the column on the right.
    Right,
}

impl Direction {
    /// All directions in popup order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a 1-based popup index (`1` = up, `2` = down, `3` = left, `4` = right).
    pub fn from_popup(index: i32) -> Option<Self> {
        match index {
            1 => Some(Direction::Up),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            4 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Parse a case-insensitive direction name or its popup index.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            other => other.parse::<i32>().ok().and_then(Self::from_popup),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// A two-color quantizer that rewrites a buffer in place.
///
/// Implementations read the current buffer contents (typically a copy of
/// the source frame, possibly pixelated) and overwrite the red, green and
/// blue channels of every pixel they visit with either
/// [`DitherParams::color_dark`] or [`DitherParams::color_bright`]. Alpha
/// and row padding are never written.
pub trait Dither {
    /// Quantize `buf` in place according to `params`.
    ///
    /// Out-of-range numeric parameters are clamped, never rejected, so this
    /// cannot fail.
    fn apply(&self, buf: &mut PixelBuffer<'_>, params: &DitherParams);
}

/// Pick the output color for a threshold decision.
#[inline]
pub(crate) fn tone(bright: bool, params: &DitherParams) -> [u8; 3] {
    if bright {
        params.color_bright.rgb_bytes()
    } else {
        params.color_dark.rgb_bytes()
    }
}
