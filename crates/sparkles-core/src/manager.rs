//! Bounded particle pool with a compacted per-frame snapshot.

use tracing::trace;

use crate::error::SimError;
use crate::particle::{Particle, SpawnParams};
use crate::snapshot::Snapshot;

/// Owns every live particle and the snapshot the renderer reads.
///
/// Spawns are appended and stay invisible until the next [`ParticleManager::advance`].
/// Once `capacity` particles are live, further spawns are rejected with
/// [`SimError::CapacityExceeded`]; the newest request is the one dropped.
#[derive(Debug, Clone)]
pub struct ParticleManager {
    capacity: usize,
    live: Vec<Particle>,
    snapshot: Snapshot,
}

impl ParticleManager {
    pub fn new(capacity: usize) -> Result<Self, SimError> {
        if capacity == 0 {
            return Err(SimError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            live: Vec::with_capacity(capacity),
            snapshot: Snapshot::new(capacity),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.live.len() == self.capacity
    }

    /// Live particles in snapshot slot order (as of the last advance, plus
    /// anything spawned since).
    pub fn particles(&self) -> &[Particle] {
        &self.live
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn snapshot_mut(&mut self) -> &mut Snapshot {
        &mut self.snapshot
    }

    pub fn spawn(&mut self, params: SpawnParams) -> Result<(), SimError> {
        if self.is_full() {
            return Err(SimError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.live.push(Particle::spawn(params));
        Ok(())
    }

    /// Age and move every particle, drop the expired ones, then rebuild the snapshot.
    ///
    /// Survivors keep their relative order. A rejected timestep leaves all
    /// state untouched.
    pub fn advance(&mut self, dt: f32) -> Result<(), SimError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidTimestep(dt));
        }

        for particle in &mut self.live {
            particle.step(dt);
        }
        let before = self.live.len();
        self.live.retain(Particle::is_live);
        let evicted = before - self.live.len();

        self.snapshot.rebuild(&self.live);
        trace!(dt, live = self.live.len(), evicted, "advanced particles");
        Ok(())
    }

    /// Drop every live particle. The next advance publishes an empty snapshot.
    pub fn clear(&mut self) {
        self.live.clear();
    }
}
