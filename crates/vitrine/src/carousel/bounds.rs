/// Scroll range of a track inside its viewport. Positions run from `0` down
/// to `-max`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn from_extent(track_width: f64, viewport_width: f64) -> Self {
        Self {
            min: 0.0,
            max: (track_width - viewport_width).max(0.0),
        }
    }

    pub fn clamp(&self, position: f64) -> f64 {
        position.max(-self.max).min(-self.min)
    }

    pub fn is_scrollable(&self) -> bool {
        self.max > 0.0
    }

    /// Share of the range already scrolled, or `None` when nothing scrolls.
    pub fn progress(&self, position: f64) -> Option<f64> {
        self.is_scrollable()
            .then(|| (position.abs() / self.max).clamp(0.0, 1.0))
    }
}
