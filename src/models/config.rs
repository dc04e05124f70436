use duotone::{
    Direction, DitherAlgorithm, DitherEngine, DitherParams, EdgePolicy, NoiseSource, Pixel,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Presets shipped with the binary
pub const EMBEDDED_CONFIG: &str = include_str!("../../config.yaml");

/// Environment variable naming an external config file
pub const CONFIG_ENV: &str = "PUNKDITHER_CONFIG";

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Embedded,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Embedded => write!(f, "embedded"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Named parameter presets
    #[serde(default)]
    pub presets: HashMap<String, PresetConfig>,

    /// Preset used when none is requested
    #[serde(default = "default_preset")]
    pub default_preset: Option<String>,

    #[serde(skip)]
    pub source: ConfigSource,
}

fn default_preset() -> Option<String> {
    Some("default".to_string())
}

/// A partial set of dither parameters.
///
/// Unset fields fall through to the layer below: CLI flags over the
/// preset, the preset over the engine defaults.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    /// One-line summary shown by `punkdither presets`
    pub description: Option<String>,
    pub strength: Option<f64>,
    pub color_dark: Option<String>,
    pub color_bright: Option<String>,
    /// Algorithm name, see [`DitherAlgorithm::from_name`]
    pub algorithm: Option<String>,
    /// Direction name, see [`Direction::from_name`]
    pub direction: Option<String>,
    /// Pixelation block factor
    pub downscale: Option<u32>,
    /// Fixed blue-noise seed
    pub seed: Option<u64>,
    pub legacy_edges: Option<bool>,
}

/// Preset selection plus per-field overrides, as given on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamOverrides {
    pub preset: Option<String>,
    pub values: PresetConfig,
}

/// Everything needed to render frames: per-frame parameters plus the
/// engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub params: DitherParams,
    pub noise: NoiseSource,
    pub edge_policy: EdgePolicy,
}

impl RenderSettings {
    pub fn engine(&self) -> DitherEngine {
        DitherEngine::new()
            .noise_source(self.noise)
            .edge_policy(self.edge_policy)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            params: DitherParams::new(),
            noise: NoiseSource::Entropy,
            edge_policy: EdgePolicy::Full,
        }
    }
}

/// Round a strength to thousandths, the resolution of the strength slider
pub fn round_strength(strength: f64) -> f64 {
    (strength * 1000.0).round() / 1000.0
}

fn parse_color(field: &'static str, value: Option<&str>) -> Result<Option<Pixel>, ConfigError> {
    value
        .map(|v| {
            v.parse::<Pixel>().map_err(|source| ConfigError::InvalidColor {
                field,
                value: v.to_string(),
                source,
            })
        })
        .transpose()
}

impl PresetConfig {
    /// Layer `top` over `self`; fields set in `top` win.
    pub fn overlay(&self, top: &PresetConfig) -> PresetConfig {
        PresetConfig {
            description: top.description.clone().or_else(|| self.description.clone()),
            strength: top.strength.or(self.strength),
            color_dark: top.color_dark.clone().or_else(|| self.color_dark.clone()),
            color_bright: top
                .color_bright
                .clone()
                .or_else(|| self.color_bright.clone()),
            algorithm: top.algorithm.clone().or_else(|| self.algorithm.clone()),
            direction: top.direction.clone().or_else(|| self.direction.clone()),
            downscale: top.downscale.or(self.downscale),
            seed: top.seed.or(self.seed),
            legacy_edges: top.legacy_edges.or(self.legacy_edges),
        }
    }

    /// Turn the preset into render settings.
    ///
    /// Unknown algorithm or direction names are not errors: they are logged
    /// and select no dithering, the same as an out-of-range popup value.
    pub fn settings(&self) -> Result<RenderSettings, ConfigError> {
        let mut params = DitherParams::new();

        if let Some(strength) = self.strength {
            params = params.strength(round_strength(strength));
        }

        let dark = parse_color("color_dark", self.color_dark.as_deref())?;
        let bright = parse_color("color_bright", self.color_bright.as_deref())?;
        let (default_dark, default_bright) = (params.color_dark, params.color_bright);
        params = params.colors(
            dark.unwrap_or(default_dark),
            bright.unwrap_or(default_bright),
        );

        if let Some(name) = &self.algorithm {
            params.algorithm = DitherAlgorithm::from_name(name);
            if params.algorithm.is_none() {
                tracing::warn!(
                    algorithm = %name,
                    "Unknown algorithm, frames will not be dithered"
                );
            }
        }

        if let Some(name) = &self.direction {
            params.direction = Direction::from_name(name);
            if params.direction.is_none() {
                tracing::warn!(
                    direction = %name,
                    "Unknown direction, error diffusion disabled"
                );
            }
        }

        if let Some(k) = self.downscale {
            params = params.block_factor(k);
        }

        Ok(RenderSettings {
            params,
            noise: self.seed.map_or(NoiseSource::Entropy, NoiseSource::Seeded),
            edge_policy: if self.legacy_edges.unwrap_or(false) {
                EdgePolicy::Legacy
            } else {
                EdgePolicy::Full
            },
        })
    }
}

impl AppConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load a YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml_str(&content)?;
        config.source = ConfigSource::File(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            presets = config.presets.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// The presets compiled into the binary
    pub fn embedded() -> Self {
        match Self::from_yaml_str(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(%e, "Failed to parse embedded config, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration.
    ///
    /// An explicit path must load. Otherwise `PUNKDITHER_CONFIG` is tried,
    /// falling back to the embedded presets when it is unset or broken.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                match Self::from_file(&path) {
                    Ok(config) => Ok(config),
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            %e,
                            "Failed to load config, using embedded presets"
                        );
                        Ok(Self::embedded())
                    }
                }
            }
            None => Ok(Self::embedded()),
        }
    }

    /// Preset names in alphabetical order
    pub fn preset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a preset, or the default preset when `name` is `None`.
    ///
    /// A missing default preset is not an error; it resolves to the engine
    /// defaults.
    pub fn preset(&self, name: Option<&str>) -> Result<PresetConfig, ConfigError> {
        if let Some(name) = name {
            return self
                .presets
                .get(name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()));
        }

        let preset = self
            .default_preset
            .as_ref()
            .and_then(|name| self.presets.get(name))
            .cloned();
        if preset.is_none() {
            tracing::debug!(default = ?self.default_preset, "Default preset not defined");
        }
        Ok(preset.unwrap_or_default())
    }

    /// Resolve CLI overrides against the selected preset
    pub fn resolve(&self, overrides: &ParamOverrides) -> Result<RenderSettings, ConfigError> {
        let preset = self.preset(overrides.preset.as_deref())?;
        let settings = preset.overlay(&overrides.values).settings()?;
        tracing::debug!(
            preset = overrides.preset.as_deref().or(self.default_preset.as_deref()),
            params = ?settings.params,
            "Resolved render settings"
        );
        Ok(settings)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut presets = HashMap::new();
        presets.insert("default".to_string(), PresetConfig::default());

        Self {
            presets,
            default_preset: default_preset(),
            source: ConfigSource::Embedded,
        }
    }
}
