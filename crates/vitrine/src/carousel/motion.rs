//! Frame-rate independent building blocks for the carousel animations.
//!
//! Every step takes `steps`, the number of reference frames the elapsed time
//! covers. At exactly one reference frame per tick the formulas reduce to the
//! classic per-frame ones (`v *= friction`, `pos += (target - pos) * k`).

use std::time::{Duration, Instant};

/// Longest gap a single tick may integrate, so a stalled frame clock does not
/// fling the track across the viewport.
pub const MAX_FRAME_STEPS: f64 = 4.0;

pub fn frame_steps(elapsed: Duration, reference: Duration) -> f64 {
    if reference.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / reference.as_secs_f64()).clamp(0.0, MAX_FRAME_STEPS)
}

/// Estimates pointer velocity (px per reference frame) from successive drag
/// samples.
#[derive(Debug, Clone, Copy)]
pub struct VelocityTracker {
    last_x: f64,
    last_at: Instant,
    velocity: f64,
}

impl VelocityTracker {
    pub fn start(x: f64, now: Instant) -> Self {
        Self {
            last_x: x,
            last_at: now,
            velocity: 0.0,
        }
    }

    #[cfg(test)]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Folds a new sample in. Samples without elapsed time only move the
    /// anchor point.
    pub fn sample(&mut self, x: f64, now: Instant, reference: Duration, smoothing: f64) -> f64 {
        let dt = now.saturating_duration_since(self.last_at);
        if !dt.is_zero() {
            let sample = (x - self.last_x) * (reference.as_secs_f64() / dt.as_secs_f64());
            self.velocity = smoothing * sample + (1.0 - smoothing) * self.velocity;
            self.last_at = now;
        }
        self.last_x = x;
        self.velocity
    }
}

/// Decays `velocity` over `steps` frames. Returns the new velocity and the
/// distance to travel this tick.
///
/// The distance is the geometric sum `v·f·(1 − f^s)/(1 − f)`, so a fling
/// covers the same ground however the elapsed time is sliced into ticks.
pub fn momentum_step(velocity: f64, friction: f64, steps: f64) -> (f64, f64) {
    let decay = friction.powf(steps);
    let next = velocity * decay;
    let distance = if (1.0 - friction).abs() < f64::EPSILON {
        velocity * steps
    } else {
        velocity * friction * (1.0 - decay) / (1.0 - friction)
    };
    (next, distance)
}

/// Frames a momentum run lasts before `|v|` drops to `threshold`.
pub fn momentum_frames(velocity: f64, friction: f64, threshold: f64) -> usize {
    let speed = velocity.abs();
    if speed <= threshold {
        return 0;
    }
    ((threshold / speed).ln() / friction.ln()).ceil() as usize
}

pub fn ease_step(position: f64, target: f64, factor: f64, steps: f64) -> f64 {
    let share = 1.0 - (1.0 - factor).powf(steps);
    position + (target - position) * share
}

/// Advances the idle scroll leftwards, looping back to the start once the
/// trailing edge is reached.
pub fn auto_scroll_step(position: f64, speed: f64, steps: f64, max: f64) -> f64 {
    let next = position - speed * steps;
    if next.abs() >= max { 0.0 } else { next }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_frame_steps() {
        assert_eq!(frame_steps(FRAME, FRAME), 1.0);
        assert_eq!(frame_steps(Duration::from_millis(8), FRAME), 0.5);
        assert_eq!(frame_steps(Duration::from_secs(5), FRAME), MAX_FRAME_STEPS);
        assert_eq!(frame_steps(FRAME, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_velocity_is_scaled_to_reference_frame() {
        let t0 = Instant::now();
        let mut tracker = VelocityTracker::start(500.0, t0);

        assert_eq!(tracker.sample(490.0, t0 + FRAME, FRAME, 1.0), -10.0);
        // same pointer speed on a 120Hz device reports the same velocity
        assert_eq!(tracker.sample(485.0, t0 + FRAME + FRAME / 2, FRAME, 1.0), -10.0);
    }

    #[test]
    fn test_velocity_ignores_zero_dt() {
        let t0 = Instant::now();
        let mut tracker = VelocityTracker::start(0.0, t0);
        tracker.sample(10.0, t0 + FRAME, FRAME, 1.0);

        assert_eq!(tracker.sample(50.0, t0 + FRAME, FRAME, 1.0), 10.0);
    }

    #[test]
    fn test_velocity_smoothing() {
        let t0 = Instant::now();
        let mut tracker = VelocityTracker::start(0.0, t0);
        tracker.sample(10.0, t0 + FRAME, FRAME, 0.5);
        assert_eq!(tracker.velocity(), 5.0);
        tracker.sample(20.0, t0 + FRAME * 2, FRAME, 0.5);
        assert_eq!(tracker.velocity(), 7.5);
    }

    #[test]
    fn test_momentum_frames_match_simulation() {
        let cases = vec![(10.0, 0.92, 0.1), (-3.0, 0.92, 0.1), (40.0, 0.8, 0.5)];

        for (v0, friction, threshold) in cases {
            let mut v: f64 = v0;
            let mut frames = 0;
            while v.abs() > threshold {
                v = momentum_step(v, friction, 1.0).0;
                frames += 1;
            }
            assert_eq!(momentum_frames(v0, friction, threshold), frames, "v0 {v0}");
        }
        assert_eq!(momentum_frames(0.05, 0.92, 0.1), 0);
    }

    #[test]
    fn test_momentum_distance_is_independent_of_slicing() {
        let (_, whole) = momentum_step(-20.0, 0.92, 2.0);
        let (v, first) = momentum_step(-20.0, 0.92, 1.0);
        let (_, second) = momentum_step(v, 0.92, 1.0);

        assert!((first - -20.0 * 0.92).abs() < 1e-12);
        assert!((whole - (first + second)).abs() < 1e-9);
    }

    #[test]
    fn test_auto_scroll_wraps() {
        assert_eq!(auto_scroll_step(-100.0, 0.5, 1.0, 800.0), -100.5);
        assert_eq!(auto_scroll_step(-799.5, 0.5, 1.0, 800.0), 0.0);
        assert_eq!(auto_scroll_step(0.0, 0.5, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_ease_step_converges() {
        let mut position = 0.0;
        for _ in 0..200 {
            position = ease_step(position, -400.0, 0.1, 1.0);
        }
        assert!((position + 400.0).abs() < 0.5);
        assert_eq!(ease_step(-10.0, -400.0, 0.1, 0.0), -10.0);
    }
}
