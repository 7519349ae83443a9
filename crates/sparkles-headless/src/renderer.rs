use bytemuck::{Pod, Zeroable};
use sparkles_core::Snapshot;
use sparkles_platform::{ParticleRenderer, Result};
use tracing::{debug, trace};

/// Interleaved per-sparkle vertex, laid out for a point-sprite vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
}

/// CPU-only renderer: packs each uploaded snapshot into a vertex buffer and
/// counts what a GPU backend would have drawn.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    capacity: usize,
    vertices: Vec<ParticleVertex>,
    viewport: (u32, u32),
    uploads: u64,
    frames: u64,
    drawn: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices of the last upload.
    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Vertices drawn across all frames.
    pub fn drawn(&self) -> u64 {
        self.drawn
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}

impl ParticleRenderer for HeadlessRenderer {
    fn init(&mut self, capacity: usize) -> Result<()> {
        self.capacity = capacity;
        self.vertices = Vec::with_capacity(capacity);
        debug!(capacity, "headless renderer init");
        Ok(())
    }

    fn upload(&mut self, snapshot: &Snapshot) -> Result<()> {
        if snapshot.capacity() > self.capacity {
            return Err(format!(
                "snapshot capacity {} exceeds renderer buffers of {}",
                snapshot.capacity(),
                self.capacity
            )
            .into());
        }
        self.vertices.clear();
        self.vertices.extend(
            snapshot
                .positions()
                .iter()
                .zip(snapshot.colors())
                .zip(snapshot.sizes())
                .map(|((position, color), size)| ParticleVertex {
                    position: position.to_array(),
                    color: color.to_array(),
                    size: *size,
                }),
        );
        self.uploads += 1;
        trace!(
            draw_count = self.vertices.len(),
            bytes = self.vertex_bytes().len(),
            "uploaded snapshot"
        );
        Ok(())
    }

    fn render_frame(&mut self) -> Result<()> {
        self.frames += 1;
        self.drawn += self.vertices.len() as u64;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.viewport = (width, height);
        Ok(())
    }
}
