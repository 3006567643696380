use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

/// Physics and timing knobs of a carousel, read from the `[carousel]` table.
///
/// Speeds and velocities are expressed in pixels per `frame_reference`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Tuning {
    pub auto_scroll_speed: f64,
    pub friction: f64,
    pub velocity_threshold: f64,
    /// Weight of the newest drag sample in the velocity estimate (1.0 = latest only).
    pub velocity_smoothing: f64,
    #[serde(rename = "frame_reference_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub frame_reference: Duration,
    pub ease_factor: f64,
    pub snap_distance: f64,
    pub key_step: f64,
    pub wheel_scale: f64,
    #[serde(rename = "resume_delay_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub resume_delay: Duration,
    #[serde(rename = "wheel_resume_delay_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub wheel_resume_delay: Duration,
    #[serde(rename = "start_delay_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub start_delay: Duration,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            auto_scroll_speed: 0.5,
            friction: 0.92,
            velocity_threshold: 0.1,
            velocity_smoothing: 1.0,
            frame_reference: Duration::from_millis(16),
            ease_factor: 0.1,
            snap_distance: 0.5,
            key_step: 50.0,
            wheel_scale: 0.5,
            resume_delay: Duration::from_millis(2000),
            wheel_resume_delay: Duration::from_millis(1000),
            start_delay: Duration::from_millis(1500),
        }
    }
}

impl Tuning {
    /// Pulls values that would stall or diverge the animations back into range.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let unit = |v: f64, fallback: f64| {
            if v.is_finite() && v > 0.0 && v < 1.0 {
                v
            } else {
                fallback
            }
        };
        let positive = |v: f64, fallback: f64| {
            if v.is_finite() && v > 0.0 { v } else { fallback }
        };

        Self {
            auto_scroll_speed: positive(self.auto_scroll_speed, defaults.auto_scroll_speed),
            friction: unit(self.friction, defaults.friction),
            velocity_threshold: positive(self.velocity_threshold, defaults.velocity_threshold),
            velocity_smoothing: if self.velocity_smoothing == 1.0 {
                1.0
            } else {
                unit(self.velocity_smoothing, defaults.velocity_smoothing)
            },
            frame_reference: if self.frame_reference.is_zero() {
                defaults.frame_reference
            } else {
                self.frame_reference
            },
            ease_factor: if self.ease_factor == 1.0 {
                1.0
            } else {
                unit(self.ease_factor, defaults.ease_factor)
            },
            snap_distance: positive(self.snap_distance, defaults.snap_distance),
            key_step: positive(self.key_step, defaults.key_step),
            wheel_scale: positive(self.wheel_scale, defaults.wheel_scale),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_table_keeps_defaults() {
        let json = r#"{ "friction": 0.8, "resume_delay_ms": 500 }"#;
        let tuning: Tuning = serde_json::from_str(json).unwrap();

        assert_eq!(tuning.friction, 0.8);
        assert_eq!(tuning.resume_delay, Duration::from_millis(500));
        assert_eq!(tuning.auto_scroll_speed, 0.5);
        assert_eq!(tuning.frame_reference, Duration::from_millis(16));
    }

    #[test]
    fn test_sanitize_rejects_divergent_values() {
        let tuning = Tuning {
            friction: 1.5,
            velocity_threshold: 0.0,
            ease_factor: -0.2,
            frame_reference: Duration::ZERO,
            auto_scroll_speed: f64::NAN,
            ..Tuning::default()
        }
        .sanitized();

        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_sanitize_keeps_valid_values() {
        let tuning = Tuning {
            friction: 0.5,
            ease_factor: 1.0,
            key_step: 10.0,
            ..Tuning::default()
        };
        assert_eq!(tuning.clone().sanitized(), tuning);
    }
}
