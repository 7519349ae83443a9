use std::time::Instant;

/// Measures the time between frames.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    frame_count: u64,
    fixed_delta: Option<f32>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frame_count: 0,
            fixed_delta: None,
        }
    }

    /// Clock that reports the same delta every frame, for reproducible runs.
    pub fn fixed(delta: f32) -> Self {
        Self {
            fixed_delta: Some(delta),
            ..Self::new()
        }
    }

    /// Seconds since the previous call (or since construction on the first call).
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let measured = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
        self.fixed_delta.unwrap_or(measured)
    }

    /// The constant delta reported every frame, if this clock ignores wall time.
    pub fn fixed_delta(&self) -> Option<f32> {
        self.fixed_delta
    }

    /// Number of deltas taken so far.
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn measured_delta_is_positive() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(5));
        let dt = clock.delta();
        assert!(dt >= 0.005);
        assert_eq!(clock.frame(), 1);
        assert_eq!(clock.fixed_delta(), None);
    }

    #[test]
    fn fixed_delta_ignores_wall_time() {
        let mut clock = FrameClock::fixed(1.0 / 60.0);
        thread::sleep(Duration::from_millis(2));
        assert_eq!(clock.delta(), 1.0 / 60.0);
        assert_eq!(clock.delta(), 1.0 / 60.0);
        assert_eq!(clock.frame(), 2);
    }
}
