//! Sparkles core engine: platform-agnostic particle pool, pointer path
//! interpolation, and the trail engine that ties them together.

pub mod clock;
pub mod config;
pub mod error;
pub mod manager;
pub mod particle;
pub mod path;
pub mod snapshot;
pub mod trail;

pub use clock::FrameClock;
pub use config::{EngineConfig, PathConfig, TrailPreset, Viewport};
pub use error::{ConfigError, SimError};
pub use manager::ParticleManager;
pub use particle::{Particle, SpawnParams};
pub use path::{PathBuilder, Segment, SpawnPoint};
pub use snapshot::Snapshot;
pub use trail::{screen_to_world, TrailEngine};
