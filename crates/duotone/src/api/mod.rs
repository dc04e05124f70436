//! Public API for the duotone crate.
//!
//! This module provides the high-level API: the [`DitherEngine`] facade,
//! its [`RenderReport`], and the [`EngineError`] unified error type.

mod engine;
mod error;

pub use engine::{DitherEngine, RenderReport, RenderStage};
pub use error::EngineError;
