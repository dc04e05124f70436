//! Unified error type for the duotone public API.
//!
//! [`EngineError`] wraps the crate's error types into a single enum for
//! convenient `?` propagation in host code.

use std::fmt;

use crate::buffer::BufferError;
use crate::color::ParseColorError;

/// Unified error type for the duotone public API.
///
/// The dithering math itself cannot fail; errors come from describing the
/// frames (geometry, mismatched source and destination) or from parsing
/// user-supplied colors.
///
/// # Example
///
/// ```
/// use duotone::{DitherParams, EngineError, Pixel};
///
/// fn params_from_hex(dark: &str, bright: &str) -> Result<DitherParams, EngineError> {
///     Ok(DitherParams::new().colors(dark.parse::<Pixel>()?, bright.parse::<Pixel>()?))
/// }
///
/// assert!(params_from_hex("#000", "#FFFFFE").is_ok());
/// assert!(matches!(params_from_hex("#000", "nope"), Err(EngineError::ParseColor(_))));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Buffer geometry error (stride, length, or source/destination mismatch)
    Buffer(BufferError),
    /// Color parsing error (invalid hex string)
    ParseColor(ParseColorError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Buffer(err) => write!(f, "buffer error: {}", err),
            EngineError::ParseColor(err) => write!(f, "color parse error: {}", err),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Buffer(err) => Some(err),
            EngineError::ParseColor(err) => Some(err),
        }
    }
}

impl From<BufferError> for EngineError {
    fn from(err: BufferError) -> Self {
        EngineError::Buffer(err)
    }
}

impl From<ParseColorError> for EngineError {
    fn from(err: ParseColorError) -> Self {
        EngineError::ParseColor(err)
    }
}
