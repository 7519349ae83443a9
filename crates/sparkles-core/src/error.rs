use thiserror::Error;

/// Errors raised by the particle simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("particle capacity of {capacity} exceeded; spawn dropped")]
    CapacityExceeded { capacity: usize },
    #[error("invalid timestep {0}: must be finite and non-negative")]
    InvalidTimestep(f32),
    #[error("particle capacity must be greater than zero")]
    ZeroCapacity,
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
