//! Renderer-facing mirror of the live particle attributes.

use glam::Vec3;

use crate::particle::Particle;

/// Dense, capacity-sized attribute buffers.
///
/// Only the leading `draw_count` slots are valid. Slots past it keep whatever
/// was last written there and must not be drawn.
#[derive(Debug, Clone)]
pub struct Snapshot {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    sizes: Vec<f32>,
    draw_count: usize,
    dirty: bool,
}

impl Snapshot {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: vec![Vec3::ZERO; capacity],
            colors: vec![Vec3::ZERO; capacity],
            sizes: vec![0.0; capacity],
            draw_count: 0,
            dirty: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.sizes.len()
    }

    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions[..self.draw_count]
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors[..self.draw_count]
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes[..self.draw_count]
    }

    /// Whole position buffer as packed `xyz` floats, `3 * capacity` long.
    pub fn position_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Whole color buffer as packed `rgb` floats, `3 * capacity` long.
    pub fn color_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Whole size buffer, `capacity` long.
    pub fn size_buffer(&self) -> &[f32] {
        &self.sizes
    }

    /// True when contents changed since the renderer last called [`Snapshot::mark_clean`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Rewrite the leading slots from `live` and flag the snapshot as changed.
    pub(crate) fn rebuild(&mut self, live: &[Particle]) {
        debug_assert!(live.len() <= self.capacity());
        for (slot, particle) in live.iter().enumerate() {
            self.positions[slot] = particle.position;
            self.colors[slot] = particle.color;
            self.sizes[slot] = particle.size;
        }
        self.draw_count = live.len();
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::SpawnParams;

    fn particle(x: f32) -> Particle {
        Particle::spawn(SpawnParams {
            lifetime: 1.0,
            color: Vec3::new(x, 0.5, 0.25),
            size: x * 10.0,
            position: Vec3::new(x, -x, 0.0),
            velocity: Vec3::ZERO,
        })
    }

    #[test]
    fn fresh_snapshot_is_empty_and_clean() {
        let snapshot = Snapshot::new(8);
        assert_eq!(snapshot.capacity(), 8);
        assert_eq!(snapshot.draw_count(), 0);
        assert!(snapshot.positions().is_empty());
        assert!(!snapshot.is_dirty());
        assert_eq!(snapshot.position_buffer().len(), 24);
        assert_eq!(snapshot.color_buffer().len(), 24);
        assert_eq!(snapshot.size_buffer().len(), 8);
    }

    #[test]
    fn rebuild_leaves_stale_tail_untouched() {
        let mut snapshot = Snapshot::new(4);
        snapshot.rebuild(&[particle(1.0), particle(2.0), particle(3.0)]);
        assert_eq!(snapshot.draw_count(), 3);

        snapshot.mark_clean();
        snapshot.rebuild(&[particle(4.0)]);
        assert!(snapshot.is_dirty());
        assert_eq!(snapshot.draw_count(), 1);
        assert_eq!(snapshot.sizes(), &[40.0]);
        // stale slots are still in the raw buffer
        assert_eq!(&snapshot.size_buffer()[..3], &[40.0, 20.0, 30.0]);
        assert_eq!(&snapshot.position_buffer()[..6], &[4.0, -4.0, 0.0, 2.0, -2.0, 0.0]);
    }
}
