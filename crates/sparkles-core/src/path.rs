//! Turns raw pointer samples into evenly spaced spawn points.
//!
//! Each new sample is damped toward the previous one before interpolating, so
//! jittery input does not produce bursts. Points are laid out every `step`
//! units along the damped segment, which keeps trail density roughly
//! constant regardless of pointer speed.

use glam::Vec2;

use crate::config::PathConfig;

/// A point to spawn at, with a velocity hint in world orientation (y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub point: Vec2,
    pub velocity_hint: Vec2,
}

#[derive(Debug, Clone)]
pub struct PathBuilder {
    config: PathConfig,
    last_raw_point: Option<Vec2>,
    last_velocity_basis: Option<Vec2>,
}

impl PathBuilder {
    pub fn new(config: PathConfig) -> Self {
        Self {
            config,
            last_raw_point: None,
            last_velocity_basis: None,
        }
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// The damped point the next segment starts from.
    pub fn last_point(&self) -> Option<Vec2> {
        self.last_raw_point
    }

    /// Forget the previous samples; the next call behaves like the first one.
    pub fn reset(&mut self) {
        self.last_raw_point = None;
        self.last_velocity_basis = None;
    }

    /// Feed one raw input sample (screen space, y down).
    ///
    /// Builder state is updated immediately; the returned segment only
    /// computes its points as it is iterated. It may be empty when the
    /// pointer did not move. Non-finite samples are ignored and leave the
    /// builder untouched.
    pub fn next_segment(&mut self, x: f32, y: f32) -> Segment {
        let input = Vec2::new(x, y);
        if !input.is_finite() {
            return Segment::empty();
        }

        let Some(start) = self.last_raw_point else {
            self.last_raw_point = Some(input);
            self.last_velocity_basis = Some(input);
            return Segment::single(input);
        };

        let target = lerp(start, input, self.config.damping);
        let delta = target - start;
        // hypot keeps huge but finite jumps from overflowing to infinity
        let distance = delta.x.hypot(delta.y);
        if !target.is_finite() || !distance.is_finite() {
            return Segment::empty();
        }
        let count = points_before(distance, self.config.step);
        let t_step = if count > 0 {
            self.config.step / distance
        } else {
            0.0
        };
        let basis = self.last_velocity_basis.unwrap_or(start);

        let segment = Segment {
            start,
            target,
            t_step,
            count,
            next: 0,
            previous: basis,
        };

        self.last_raw_point = Some(target);
        if let Some(last) = segment.point_at(count.checked_sub(1)) {
            self.last_velocity_basis = Some(last);
        }
        segment
    }
}

#[inline]
fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Past this, consecutive counts are no longer exact in `f32`.
const EXACT_COUNT_LIMIT: f32 = 16_777_216.0;

/// Number of `i = 0, step, 2*step, ...` strictly below `distance`.
fn points_before(distance: f32, step: f32) -> usize {
    if !(distance > 0.0) || !(step > 0.0) {
        return 0;
    }
    let estimate = (distance / step).ceil();
    if estimate >= EXACT_COUNT_LIMIT {
        // saturating cast
        return estimate as usize;
    }
    let mut count = estimate as usize;
    while count > 0 && (count - 1) as f32 * step >= distance {
        count -= 1;
    }
    while (count as f32) * step < distance {
        count += 1;
    }
    count
}

/// Lazy sequence of spawn points produced by [`PathBuilder::next_segment`].
#[derive(Debug, Clone)]
pub struct Segment {
    start: Vec2,
    target: Vec2,
    t_step: f32,
    count: usize,
    next: usize,
    previous: Vec2,
}

impl Segment {
    fn empty() -> Self {
        Self {
            start: Vec2::ZERO,
            target: Vec2::ZERO,
            t_step: 0.0,
            count: 0,
            next: 0,
            previous: Vec2::ZERO,
        }
    }

    fn single(point: Vec2) -> Self {
        Self {
            start: point,
            target: point,
            t_step: 0.0,
            count: 1,
            next: 0,
            previous: point,
        }
    }

    fn point_at(&self, index: Option<usize>) -> Option<Vec2> {
        index.map(|i| lerp(self.start, self.target, i as f32 * self.t_step))
    }
}

impl Iterator for Segment {
    type Item = SpawnPoint;

    fn next(&mut self) -> Option<SpawnPoint> {
        if self.next >= self.count {
            return None;
        }
        let point = lerp(self.start, self.target, self.next as f32 * self.t_step);
        let delta = point - self.previous;
        self.previous = point;
        self.next += 1;
        Some(SpawnPoint {
            point,
            // screen space is y down, world is y up
            velocity_hint: Vec2::new(delta.x, -delta.y),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segment {}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PathBuilder {
        PathBuilder::new(PathConfig::default())
    }

    fn points(segment: Segment) -> Vec<Vec2> {
        segment.map(|s| s.point).collect()
    }

    #[test]
    fn first_call_returns_input_with_zero_velocity() {
        let mut path = builder();
        let segment: Vec<SpawnPoint> = path.next_segment(100.0, 100.0).collect();
        assert_eq!(
            segment,
            vec![SpawnPoint {
                point: Vec2::new(100.0, 100.0),
                velocity_hint: Vec2::ZERO,
            }]
        );
        assert_eq!(path.last_point(), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn damped_segment_is_sampled_every_step() {
        let mut path = builder();
        path.next_segment(100.0, 100.0).for_each(drop);

        let segment = path.next_segment(110.0, 100.0);
        assert_eq!(segment.len(), 2);
        let pts = points(segment);
        assert!(pts[0].abs_diff_eq(Vec2::new(100.0, 100.0), 1e-4));
        assert!(pts[1].abs_diff_eq(Vec2::new(102.0, 100.0), 1e-4));

        // anchored on the damped target, not the raw sample
        let last = path.last_point().unwrap();
        assert!(last.abs_diff_eq(Vec2::new(104.0, 100.0), 1e-4));
    }

    #[test]
    fn velocity_hints_follow_travel_with_y_flipped() {
        let mut path = builder();
        path.next_segment(0.0, 0.0).for_each(drop);

        // target (0, 8): points at y = 0, 2, 4, 6
        let hints: Vec<Vec2> = path
            .next_segment(0.0, 20.0)
            .map(|s| s.velocity_hint)
            .collect();
        assert_eq!(hints.len(), 4);
        assert!(hints[0].abs_diff_eq(Vec2::ZERO, 1e-4));
        for hint in &hints[1..] {
            assert!(hint.abs_diff_eq(Vec2::new(0.0, -2.0), 1e-4));
        }

        // next call measures from the last produced point (0, 6)
        let first = path.next_segment(0.0, 13.0).next().unwrap();
        assert!(first.point.abs_diff_eq(Vec2::new(0.0, 8.0), 1e-4));
        assert!(first.velocity_hint.abs_diff_eq(Vec2::new(0.0, -2.0), 1e-4));
    }

    #[test]
    fn repeated_input_yields_empty_segment() {
        let mut path = builder();
        assert_eq!(path.next_segment(50.0, 50.0).len(), 1);
        assert_eq!(path.next_segment(50.0, 50.0).len(), 0);
        assert_eq!(path.next_segment(50.0, 50.0).count(), 0);
    }

    #[test]
    fn fast_moves_produce_more_points() {
        let mut slow = builder();
        slow.next_segment(0.0, 0.0).for_each(drop);
        let mut fast = slow.clone();

        let slow_len = slow.next_segment(10.0, 0.0).len();
        let fast_len = fast.next_segment(200.0, 0.0).len();
        assert_eq!(slow_len, 2);
        assert_eq!(fast_len, 40);
    }

    #[test]
    fn short_moves_still_produce_a_point() {
        let mut path = builder();
        path.next_segment(0.0, 0.0).for_each(drop);
        let pts = points(path.next_segment(1.0, 0.0));
        assert_eq!(pts, vec![Vec2::ZERO]);
    }

    #[test]
    fn state_updates_even_if_segment_is_not_consumed() {
        let mut path = builder();
        let _ = path.next_segment(0.0, 0.0);
        let _ = path.next_segment(100.0, 0.0);
        let last = path.last_point().unwrap();
        assert!(last.abs_diff_eq(Vec2::new(40.0, 0.0), 1e-4));
    }

    #[test]
    fn reset_forgets_history() {
        let mut path = builder();
        path.next_segment(10.0, 10.0).for_each(drop);
        path.reset();
        assert_eq!(path.last_point(), None);
        let pts = points(path.next_segment(300.0, 300.0));
        assert_eq!(pts, vec![Vec2::new(300.0, 300.0)]);
    }

    #[test]
    fn custom_damping_and_step() {
        let mut path = PathBuilder::new(PathConfig {
            damping: 1.0,
            step: 5.0,
        });
        path.next_segment(0.0, 0.0).for_each(drop);
        let pts = points(path.next_segment(20.0, 0.0));
        assert_eq!(pts.len(), 4);
        assert!(pts[3].abs_diff_eq(Vec2::new(15.0, 0.0), 1e-4));
    }

    #[test]
    fn builders_do_not_share_state() {
        let mut a = builder();
        let mut b = builder();
        a.next_segment(10.0, 10.0).for_each(drop);
        assert_eq!(b.last_point(), None);
        assert_eq!(b.next_segment(0.0, 0.0).len(), 1);
    }

    #[test]
    fn huge_jump_saturates_instead_of_overflowing() {
        let mut path = builder();
        path.next_segment(0.0, 0.0).for_each(drop);

        let mut segment = path.next_segment(f32::MAX, 0.0);
        assert!(segment.len() > 1_000_000);
        let first = segment.next().unwrap();
        assert_eq!(first.point, Vec2::ZERO);

        let last = path.last_point().unwrap();
        assert!(last.is_finite());
        assert!(last.x > 1.0e38);
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        let mut path = builder();
        assert_eq!(path.next_segment(f32::NAN, 0.0).len(), 0);
        assert_eq!(path.last_point(), None);

        path.next_segment(0.0, 0.0).for_each(drop);
        assert_eq!(path.next_segment(f32::NAN, 0.0).len(), 0);
        assert_eq!(path.next_segment(0.0, f32::INFINITY).len(), 0);
        assert_eq!(path.last_point(), Some(Vec2::ZERO));

        // the builder keeps working afterwards
        let pts = points(path.next_segment(100.0, 100.0));
        assert_eq!(pts.len(), 29);
        assert_eq!(pts[0], Vec2::ZERO);
    }

    #[test]
    fn overflowing_target_is_ignored() {
        let mut path = builder();
        path.next_segment(-f32::MAX, 0.0).for_each(drop);
        assert_eq!(path.next_segment(f32::MAX, 0.0).len(), 0);
        assert_eq!(path.last_point(), Some(Vec2::new(-f32::MAX, 0.0)));
    }

    #[test]
    fn points_before_counts_strictly_below() {
        assert_eq!(points_before(0.0, 2.0), 0);
        assert_eq!(points_before(0.5, 2.0), 1);
        assert_eq!(points_before(4.0, 2.0), 2);
        assert_eq!(points_before(4.5, 2.0), 3);
        assert_eq!(points_before(f32::NAN, 2.0), 0);
        assert_eq!(points_before(3.0, 0.0), 0);
        assert_eq!(points_before(f32::MAX, 2.0), usize::MAX);
    }
}
