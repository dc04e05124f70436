//! duotone: two-color dithering for strided 8-bit pixel buffers
//!
//! The engine turns one frame into a two-tone image: every pixel ends up as
//! either a caller-chosen dark color or a caller-chosen bright color. An
//! optional nearest-neighbor pixelation pass runs first for a lo-fi look.
//!
//! Frames are borrowed, never owned. A host hands in its own memory with a
//! width, height, row stride and [`PixelLayout`]; the engine validates the
//! geometry once and then writes in place. Alpha channels and row padding
//! are never touched by dithering.
//!
//! # Quick Start
//!
//! ```
//! use duotone::{DitherEngine, DitherParams, Direction, Pixel, PixelBuffer, PixelLayout, PixelView};
//!
//! let src_data: Vec<u8> = (0..16 * 16)
//!     .flat_map(|i| {
//!         let v = i as u8;
//!         [v, v, v, 255]
//!     })
//!     .collect();
//! let mut dst_data = src_data.clone();
//!
//! let src = PixelView::packed(&src_data, 16, 16, PixelLayout::Rgba8).unwrap();
//! let mut dst = PixelBuffer::packed(&mut dst_data, 16, 16, PixelLayout::Rgba8).unwrap();
//!
//! let params = DitherParams::new()
//!     .strength(0.6)
//!     .colors(Pixel::rgb(20, 10, 40), Pixel::rgb(255, 230, 120))
//!     .direction(Direction::Right);
//!
//! let report = DitherEngine::new().render(&src, &mut dst, &params).unwrap();
//! assert!(report.dithered.is_some());
//! ```
//!
//! # Pipeline
//!
//! ```text
//! host copies source -> destination
//!     |
//!     v
//! [Pixelate]        block_factor > 1 only; floor(W/k) x floor(H/k) samples
//!     |
//!     v
//! Strategy::select  algorithm (+ direction for error diffusion)
//!     |
//!     +---> DirectionalErrorDiffusion   fixed threshold, single-tap error
//!     +---> OrderedMatrix               8x8 Bayer, row-parallel
//!     +---> StochasticBlueNoise         one uniform draw per pixel
//!     |
//!     v
//! two-color frame
//! ```
//!
//! # Grayscale
//!
//! All strategies decide on the unweighted integer average
//! `(R + G + B) / 3`. There is no gamma decoding and no perceptual
//! weighting: the look of the effect depends on these exact integer
//! semantics, so they are part of the contract.
//!
//! # Features
//!
//! - `parallel` (default): process rows with rayon for ordered dithering
//!   and horizontal error diffusion. Output is byte-identical to the
//!   sequential path.

pub mod api;
pub mod buffer;
pub mod color;
pub mod dither;
pub mod pixelate;


pub use api::{DitherEngine, EngineError, RenderReport, RenderStage};
pub use buffer::{BufferError, PixelBuffer, PixelLayout, PixelView};
pub use color::{ParseColorError, Pixel};
pub use dither::{
    block_factor_from_popup, diffusion_factor, diffusion_threshold, is_near_white, Direction,
    DirectionalErrorDiffusion, Dither, DitherAlgorithm, DitherParams, EdgePolicy, NoiseSource,
    OrderedMatrix, StochasticBlueNoise, Strategy, BLOCK_FACTOR_CHOICES,
};
pub use pixelate::{pixelate, pixelate_in_place};
