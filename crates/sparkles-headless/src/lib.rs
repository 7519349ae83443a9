//! Headless implementations and the per-frame driver loop for Sparkles.
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sparkles_core::{ConfigError, EngineConfig, FrameClock, TrailEngine};
use sparkles_platform::{ParticleRenderer, PointerEvent, PointerSource, Result};
use tracing::{debug, info};

mod pointer;
mod renderer;
pub use crate::pointer::ScriptedPointer;
pub use crate::renderer::{HeadlessRenderer, ParticleVertex};

/// How long the driver loop runs and how it measures time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    pub frames: u64,
    /// Measure real elapsed time and pace frames at `target_fps`.
    pub wall_clock: bool,
    /// Delta used every frame unless `wall_clock` is set.
    pub fixed_delta: Option<f32>,
    /// Frame pacing when running on wall time.
    pub target_fps: f32,
    /// Pointer samples in the scripted figure-eight.
    pub pointer_samples: usize,
    /// Pointer samples delivered per frame.
    pub samples_per_frame: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frames: 600,
            wall_clock: false,
            fixed_delta: Some(1.0 / 60.0),
            target_fps: 60.0,
            pointer_samples: 480,
            samples_per_frame: 2,
        }
    }
}

impl RunOptions {
    pub fn frame_clock(&self) -> FrameClock {
        match (self.wall_clock, self.fixed_delta) {
            (false, Some(delta)) => FrameClock::fixed(delta),
            _ => FrameClock::new(),
        }
    }

    /// Sleep between frames, only when running on wall time.
    pub fn pacing(&self) -> Option<Duration> {
        (self.wall_clock || self.fixed_delta.is_none())
            .then(|| Duration::from_secs_f32(1.0 / self.target_fps))
    }
}

/// Engine settings plus a `[run]` table, all from one TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub run: RunOptions,
}

impl AppConfig {
    pub fn from_toml_str(source: &str) -> std::result::Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        debug!("loaded app config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.engine.validate()?;
        if let Some(delta) = self.run.fixed_delta {
            if !(delta >= 0.0 && delta.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "run.fixed_delta must be non-negative, got {delta}"
                )));
            }
        }
        if !(self.run.target_fps > 0.0) {
            return Err(ConfigError::Invalid("run.target_fps must be positive".into()));
        }
        Ok(())
    }
}

/// Counters reported when the driver loop finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub frames: u64,
    pub spawned: u64,
    pub dropped: u64,
    pub uploads: u64,
    pub peak_draw_count: usize,
    pub final_draw_count: usize,
}

// Public app entry ----------------
/// Run the trail on a scripted figure-eight pointer with the headless renderer.
pub fn run_app(config: &AppConfig) -> Result<RunSummary> {
    let mut renderer = HeadlessRenderer::new();
    let mut pointer = ScriptedPointer::figure_eight(
        config.engine.viewport,
        config.run.pointer_samples,
        config.run.samples_per_frame,
    );
    let summary = drive(config, &mut renderer, &mut pointer)?;
    info!("run summary: {}", serde_json::to_string(&summary)?);
    Ok(summary)
}

/// Per-frame loop: pointer input, simulation step, upload when changed, draw.
pub fn drive(
    config: &AppConfig,
    renderer: &mut dyn ParticleRenderer,
    pointer: &mut dyn PointerSource,
) -> Result<RunSummary> {
    config.validate()?;
    let mut engine = TrailEngine::new(config.engine.clone())?;
    let viewport = config.engine.viewport;
    renderer.init(engine.manager().capacity())?;
    renderer.resize(viewport.width, viewport.height)?;
    pointer.start()?;

    let options = config.run;
    let mut clock = options.frame_clock();
    let pacing = options.pacing();

    let mut summary = RunSummary::default();
    for _ in 0..options.frames {
        for event in pointer.poll()? {
            match event {
                PointerEvent::Moved(p) => {
                    summary.spawned += engine.pointer_moved(p.x, p.y) as u64;
                }
                PointerEvent::Left => engine.pointer_left(),
            }
        }

        engine.update(clock.delta());

        if engine.snapshot().is_dirty() {
            renderer.upload(engine.snapshot())?;
            engine.snapshot_mut().mark_clean();
            summary.uploads += 1;
        }
        renderer.render_frame()?;

        let draw_count = engine.snapshot().draw_count();
        summary.peak_draw_count = summary.peak_draw_count.max(draw_count);
        summary.frames += 1;
        if let Some(interval) = pacing {
            std::thread::sleep(interval);
        }
    }
    pointer.stop()?;

    summary.dropped = engine.dropped_spawns();
    summary.final_draw_count = engine.snapshot().draw_count();
    Ok(summary)
}
