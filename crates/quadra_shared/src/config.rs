//! # Engine Configuration
//!
//! Loaded once at startup from TOML. Every field has a default matching
//! [`crate::constants`], so an empty file is a valid configuration.
//!
//! ```toml
//! max_entities = 128
//! destroy_buckets = 8
//!
//! [render]
//! staging_quads = 1024
//! upscale_epsilon = 0.01
//! pixel_format = "bgra"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{DESTROY_BUCKETS, MAX_ENTITIES, STAGING_QUADS, UPSCALE_EPSILON};

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Byte order of a 32-bit framebuffer pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// R, G, B, A in memory order (texture source order).
    Rgba,
    /// B, G, R, A in memory order (typical window surface order).
    #[default]
    Bgra,
}

/// Renderer sizing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Staging buffer capacity in quads.
    pub staging_quads: usize,
    /// Tolerance for matching a blit scale to the 2x / 4x caches.
    pub upscale_epsilon: f32,
    /// Framebuffer byte order of the software backend.
    pub pixel_format: PixelFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            staging_quads: STAGING_QUADS,
            upscale_epsilon: UPSCALE_EPSILON,
            pixel_format: PixelFormat::default(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Entity capacity; also the capacity of every component pool.
    pub max_entities: usize,
    /// Number of destroy-queue shards.
    pub destroy_buckets: usize,
    /// Renderer settings.
    pub render: RenderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_entities: MAX_ENTITIES,
            destroy_buckets: DESTROY_BUCKETS,
            render: RenderConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_entities == 0 || self.max_entities >= u32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "max_entities must be in 1..{}, got {}",
                u32::MAX,
                self.max_entities
            )));
        }
        if self.destroy_buckets == 0 {
            return Err(ConfigError::Invalid("destroy_buckets must be at least 1".into()));
        }
        if self.render.staging_quads == 0 {
            return Err(ConfigError::Invalid("render.staging_quads must be at least 1".into()));
        }
        if !(self.render.upscale_epsilon >= 0.0 && self.render.upscale_epsilon < 0.5) {
            return Err(ConfigError::Invalid(format!(
                "render.upscale_epsilon must be in [0, 0.5), got {}",
                self.render.upscale_epsilon
            )));
        }
        Ok(())
    }
}
