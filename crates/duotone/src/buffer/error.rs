//! Error types for pixel buffer construction.

use std::fmt;

use super::PixelLayout;

/// Error type for pixel buffer validation.
///
/// Returned when the stride or the backing slice cannot hold the described
/// geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Row stride is smaller than one packed row
    StrideTooSmall {
        /// Stride supplied by the caller
        stride: usize,
        /// Minimum stride for the width and layout (`width * bytes_per_pixel`)
        min: usize,
    },
    /// Backing slice too short for `height` rows at `stride`
    DataTooShort {
        /// Length of the slice supplied by the caller
        len: usize,
        /// Bytes needed to address every pixel
        required: usize,
    },
    /// Geometry overflows `usize`
    Overflow,
    /// Two buffers that must describe the same frame differ in size
    SizeMismatch {
        /// Expected `(width, height)`
        expected: (usize, usize),
        /// Actual `(width, height)`
        found: (usize, usize),
    },
    /// Two buffers that must describe the same frame differ in channel layout
    LayoutMismatch {
        /// Expected layout
        expected: PixelLayout,
        /// Actual layout
        found: PixelLayout,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::StrideTooSmall { stride, min } => {
                write!(f, "stride of {} bytes is below the packed row size {}", stride, min)
            }
            BufferError::DataTooShort { len, required } => {
                write!(
                    f,
                    "buffer holds {} bytes but the geometry requires {}",
                    len, required
                )
            }
            BufferError::Overflow => write!(f, "buffer geometry overflows usize"),
            BufferError::SizeMismatch { expected, found } => {
                write!(
                    f,
                    "frame size mismatch: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            BufferError::LayoutMismatch { expected, found } => {
                write!(
                    f,
                    "channel layout mismatch: expected {:?}, found {:?}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for BufferError {}
