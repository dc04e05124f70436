//! Pixel color values.
//!
//! [`Pixel`] is the 8-bit RGBA value the engine reads from buffers and
//! writes as one of the two output colors.

mod error;
mod pixel;

pub use error::ParseColorError;
pub use pixel::Pixel;
