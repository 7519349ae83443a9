use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use sparkles_core::Viewport;
use sparkles_platform::{PointerEvent, PointerSource, Result};
use tracing::info;

/// Replays a fixed list of pointer events, a few per poll.
#[derive(Debug)]
pub struct ScriptedPointer {
    pending: VecDeque<PointerEvent>,
    per_poll: usize,
    running: bool,
}

impl ScriptedPointer {
    pub fn new(events: impl IntoIterator<Item = PointerEvent>, per_poll: usize) -> Self {
        Self {
            pending: events.into_iter().collect(),
            per_poll: per_poll.max(1),
            running: false,
        }
    }

    /// One lap of a figure-eight across the viewport, then the pointer leaves.
    pub fn figure_eight(viewport: Viewport, samples: usize, per_poll: usize) -> Self {
        let center = Vec2::new(viewport.width as f32, viewport.height as f32) / 2.0;
        let radius = center * 0.8;
        let events = (0..samples)
            .map(|i| {
                let t = i as f32 / samples as f32 * TAU;
                let offset = Vec2::new(t.sin(), t.sin() * t.cos());
                PointerEvent::Moved(center + offset * radius)
            })
            .chain(std::iter::once(PointerEvent::Left));
        Self::new(events, per_poll)
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl PointerSource for ScriptedPointer {
    fn start(&mut self) -> Result<()> {
        info!(events = self.pending.len(), "scripted pointer start");
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        info!(remaining = self.pending.len(), "scripted pointer stop");
        self.running = false;
        Ok(())
    }

    fn poll(&mut self) -> Result<Vec<PointerEvent>> {
        if !self.running {
            return Ok(Vec::new());
        }
        let take = self.per_poll.min(self.pending.len());
        Ok(self.pending.drain(..take).collect())
    }
}
