use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid {field} color {value:?}: {source}")]
    InvalidColor {
        field: &'static str,
        value: String,
        #[source]
        source: duotone::ParseColorError,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported frame format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Dither error: {0}")]
    Dither(#[from] duotone::EngineError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<duotone::BufferError> for RenderError {
    fn from(e: duotone::BufferError) -> Self {
        RenderError::Dither(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_unknown_preset() {
        let error = ConfigError::UnknownPreset("neon".to_string());
        assert_eq!(error.to_string(), "Unknown preset: neon");
    }

    #[test]
    fn test_config_error_read_includes_path() {
        let error = ConfigError::Read {
            path: PathBuf::from("/nope/config.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read config /nope/config.yaml: missing"
        );
    }

    #[test]
    fn test_config_error_invalid_color() {
        let source = "#12".parse::<duotone::Pixel>().unwrap_err();
        let error = ConfigError::InvalidColor {
            field: "color_dark",
            value: "#12".to_string(),
            source,
        };
        assert!(error
            .to_string()
            .starts_with("Invalid color_dark color \"#12\": "));
    }

    #[test]
    fn test_render_error_png_decode() {
        let error = RenderError::PngDecode("bad signature".to_string());
        assert_eq!(error.to_string(), "PNG decode error: bad signature");
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_render_error_unsupported_dimensions() {
        let error = RenderError::UnsupportedDimensions {
            width: 0,
            height: 480,
        };
        assert_eq!(error.to_string(), "Unsupported dimensions: 0x480");
    }

    #[test]
    fn test_render_error_from_buffer_error() {
        let error: RenderError = duotone::BufferError::StrideTooSmall {
            stride: 2,
            min: 12,
        }
        .into();
        match error {
            RenderError::Dither(duotone::EngineError::Buffer(_)) => {}
            other => panic!("Expected Dither variant, got {other:?}"),
        }
    }

    #[test]
    fn test_render_error_from_config_error() {
        let error: RenderError = ConfigError::UnknownPreset("x".to_string()).into();
        assert_eq!(error.to_string(), "Config error: Unknown preset: x");
    }
}
