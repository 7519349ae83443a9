use glam::{Vec2, Vec3};
use tracing::{info, trace, warn};

use crate::config::{EngineConfig, Viewport};
use crate::error::{ConfigError, SimError};
use crate::manager::ParticleManager;
use crate::particle::SpawnParams;
use crate::path::PathBuilder;
use crate::snapshot::Snapshot;

/// Pointer trail: turns pointer motion into sparkles and steps them each frame.
#[derive(Debug, Clone)]
pub struct TrailEngine {
    config: EngineConfig,
    manager: ParticleManager,
    path: PathBuilder,
    dropped_spawns: u64,
}

impl TrailEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let manager = ParticleManager::new(config.preset.max_particles)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let path = PathBuilder::new(config.path);
        info!(
            preset = %config.preset.name,
            capacity = manager.capacity(),
            "trail engine ready"
        );
        Ok(Self {
            config,
            manager,
            path,
            dropped_spawns: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn manager(&self) -> &ParticleManager {
        &self.manager
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.manager.snapshot()
    }

    pub fn snapshot_mut(&mut self) -> &mut Snapshot {
        self.manager.snapshot_mut()
    }

    /// Spawns rejected because the pool was full.
    pub fn dropped_spawns(&self) -> u64 {
        self.dropped_spawns
    }

    /// Feed a pointer sample in screen pixels. Returns how many sparkles were spawned.
    ///
    /// Once the pool is full the rest of the segment is counted as dropped
    /// without being walked.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> usize {
        let preset = &self.config.preset;
        let viewport = self.config.viewport;
        let mut segment = self.path.next_segment(x, y);
        let mut spawned = 0;
        while !self.manager.is_full() {
            let Some(spawn_point) = segment.next() else {
                break;
            };
            let hint = spawn_point.velocity_hint * preset.velocity_scale;
            let params = SpawnParams {
                lifetime: preset.lifetime,
                color: preset.color,
                size: preset.size,
                position: screen_to_world(spawn_point.point, viewport, preset.depth),
                velocity: Vec3::new(hint.x, hint.y, 0.0),
            };
            match self.manager.spawn(params) {
                Ok(()) => spawned += 1,
                Err(err) => warn!("unexpected spawn failure: {err}"),
            }
        }

        let rejected = segment.len() as u64;
        if rejected > 0 {
            self.dropped_spawns = self.dropped_spawns.saturating_add(rejected);
            trace!(
                rejected,
                capacity = self.manager.capacity(),
                "particle pool full, spawns dropped"
            );
        }
        spawned
    }

    /// Step the simulation by `dt` seconds.
    ///
    /// A negative timestep trips a debug assertion; release builds clamp it to zero.
    pub fn update(&mut self, dt: f32) {
        debug_assert!(dt.is_finite() && dt >= 0.0, "invalid timestep {dt}");
        match self.manager.advance(dt) {
            Ok(()) => {}
            Err(SimError::InvalidTimestep(dt)) => {
                warn!("invalid timestep {dt}, clamping to zero");
                if let Err(err) = self.manager.advance(0.0) {
                    warn!("advance failed: {err}");
                }
            }
            Err(err) => warn!("advance failed: {err}"),
        }
    }

    /// Forget the pointer history, e.g. when the pointer leaves the surface.
    pub fn pointer_left(&mut self) {
        self.path.reset();
    }
}

/// Screen pixels (origin top-left, y down) to world units centered on the viewport, y up.
pub fn screen_to_world(point: Vec2, viewport: Viewport, depth: f32) -> Vec3 {
    let half = Vec2::new(viewport.width as f32, viewport.height as f32) / 2.0;
    Vec3::new(point.x - half.x, -(point.y - half.y), depth)
}
