use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Look of the sparkles spawned along the pointer trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailPreset {
    pub name: String,
    /// Capacity of the particle pool.
    pub max_particles: usize,
    /// Seconds each sparkle stays alive.
    pub lifetime: f32,
    pub color: Vec3,
    pub size: f32,
    /// World z of spawned sparkles.
    pub depth: f32,
    /// Multiplier turning path velocity hints into world velocity.
    pub velocity_scale: f32,
}

impl Default for TrailPreset {
    fn default() -> Self {
        Self {
            name: "Default".into(),
            max_particles: 10_000,
            lifetime: 0.6,
            color: Vec3::ONE,
            size: 30.0,
            depth: -1000.0,
            velocity_scale: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Blend from the last damped point toward each new sample.
    pub damping: f32,
    /// Arc length between spawn points.
    pub step: f32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            damping: 0.4,
            step: 2.0,
        }
    }
}

impl PathConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "path.damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "path.step must be positive, got {}",
                self.step
            )));
        }
        Ok(())
    }
}

/// Size of the input surface in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub preset: TrailPreset,
    pub path: PathConfig,
    pub viewport: Viewport,
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        debug!("loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let preset = &self.preset;
        if preset.max_particles == 0 {
            return Err(ConfigError::Invalid(
                "preset.max_particles must be greater than zero".into(),
            ));
        }
        if !(preset.lifetime >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "preset.lifetime must be non-negative, got {}",
                preset.lifetime
            )));
        }
        if !(preset.size >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "preset.size must be non-negative, got {}",
                preset.size
            )));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Invalid("viewport must be non-empty".into()));
        }
        self.path.validate()
    }
}
