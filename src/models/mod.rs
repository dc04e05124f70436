pub mod config;

pub use config::{
    AppConfig, ConfigSource, ParamOverrides, PresetConfig, RenderSettings, CONFIG_ENV,
    EMBEDDED_CONFIG,
};
