//! Caller-owned pixel memory.
//!
//! [`PixelBuffer`] and [`PixelView`] wrap a byte slice with its width,
//! height, row stride and [`PixelLayout`]. Geometry is validated once at
//! construction; afterwards every access is bounds-consistent.

mod error;
mod layout;
mod pixel_buffer;

pub use error::BufferError;
pub use layout::PixelLayout;
pub use pixel_buffer::{PixelBuffer, PixelView};

pub(crate) use pixel_buffer::ensure_same_frame;
