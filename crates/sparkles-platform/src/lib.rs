//! Collaborator traits so `sparkles-core` stays OS- and GPU-agnostic.

use glam::Vec2;
use sparkles_core::Snapshot;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One pointer event in screen pixels (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved(Vec2),
    Left,
}

/// Source of pointer events.
pub trait PointerSource: Send {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    /// Events that arrived since the previous poll, oldest first.
    fn poll(&mut self) -> Result<Vec<PointerEvent>>;
}

/// Consumer of particle snapshots.
///
/// Implementations must only draw the first `snapshot.draw_count()` entries.
pub trait ParticleRenderer: Send {
    fn init(&mut self, capacity: usize) -> Result<()>;
    /// Called whenever the snapshot is flagged as changed.
    fn upload(&mut self, snapshot: &Snapshot) -> Result<()>;
    fn render_frame(&mut self) -> Result<()>;
    fn resize(&mut self, _width: u32, _height: u32) -> Result<()> { Ok(()) }
}
