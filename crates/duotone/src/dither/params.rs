//! Per-render dither parameters.
//!
//! This module provides the [`DitherParams`] snapshot handed to every
//! strategy, plus the block-factor popup mapping.

use super::{DitherAlgorithm, Direction};
use crate::color::Pixel;

/// Block factors offered by the downscale popup, in popup order.
pub const BLOCK_FACTOR_CHOICES: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 16, 32];

/// Map a 1-based downscale popup index to its block factor.
///
/// ```
/// use duotone::block_factor_from_popup;
/// assert_eq!(block_factor_from_popup(1), Some(1));
/// assert_eq!(block_factor_from_popup(9), Some(16));
/// assert_eq!(block_factor_from_popup(11), None);
/// ```
pub fn block_factor_from_popup(index: i32) -> Option<u32> {
    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| BLOCK_FACTOR_CHOICES.get(i).copied())
}

/// Immutable parameter snapshot for one render call.
///
/// Created by the caller from its user-facing controls and read-only to
/// the engine. Selector fields are `Option`s: `None` stands for an
/// out-of-range selector and makes the corresponding stage a no-op.
///
/// # Defaults
///
/// - strength `0.5`
/// - dark color `#000000`, bright color `#FFFFFE`
/// - algorithm [`DitherAlgorithm::ErrorDiffusion`], direction [`Direction::Down`]
/// - block factor `1` (no pixelation)
///
/// # Example
///
/// ```
/// use duotone::{DitherAlgorithm, DitherParams, Pixel};
///
/// let params = DitherParams::new()
///     .strength(0.75)
///     .colors(Pixel::rgb(20, 0, 40), Pixel::rgb(250, 200, 0))
///     .algorithm(DitherAlgorithm::Ordered)
///     .block_factor(4);
///
/// assert_eq!(params.algorithm, Some(DitherAlgorithm::Ordered));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherParams {
    /// Dither strength, nominally `0.0..=1.0`. Strategies clamp it.
    pub strength: f64,

    /// Color written where the threshold decision is "dark".
    pub color_dark: Pixel,

    /// Color written where the threshold decision is "bright".
    pub color_bright: Pixel,

    /// Selected strategy; `None` disables dithering.
    pub algorithm: Option<DitherAlgorithm>,

    /// Error diffusion traversal; `None` disables error diffusion.
    /// Ignored by the other strategies.
    pub direction: Option<Direction>,

    /// Pixelation block size; values `<= 1` skip pixelation.
    pub block_factor: u32,
}

impl Default for DitherParams {
    fn default() -> Self {
        Self {
            strength: 0.5,
            color_dark: Pixel::rgb(0, 0, 0),
            color_bright: Pixel::rgb(255, 255, 254),
            algorithm: Some(DitherAlgorithm::ErrorDiffusion),
            direction: Some(Direction::Down),
            block_factor: 1,
        }
    }
}

impl DitherParams {
    /// Create parameters with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dither strength.
    #[inline]
    pub fn strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Set both output colors.
    #[inline]
    pub fn colors(mut self, dark: Pixel, bright: Pixel) -> Self {
        self.color_dark = dark;
        self.color_bright = bright;
        self
    }

    /// Set the dithering algorithm.
    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the algorithm from a raw 1-based popup selector.
    ///
    /// Out-of-range selectors leave the algorithm unset (no dithering).
    #[inline]
    pub fn algorithm_selector(mut self, index: i32) -> Self {
        self.algorithm = DitherAlgorithm::from_popup(index);
        self
    }

    /// Set the error diffusion direction.
    #[inline]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Set the direction from a raw 1-based popup selector.
    #[inline]
    pub fn direction_selector(mut self, index: i32) -> Self {
        self.direction = Direction::from_popup(index);
        self
    }

    /// Set the pixelation block factor.
    #[inline]
    pub fn block_factor(mut self, factor: u32) -> Self {
        self.block_factor = factor;
        self
    }
}
