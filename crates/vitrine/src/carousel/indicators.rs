use super::bounds::Bounds;

/// Position dots under the track. Exactly one dot is active whenever there is
/// at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicators {
    count: usize,
    active: usize,
}

impl Indicators {
    pub fn new(count: usize) -> Self {
        Self { count, active: 0 }
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active(&self) -> Option<usize> {
        (self.count > 0).then_some(self.active)
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active() == Some(index)
    }

    /// Dot matching a scroll progress in `[0, 1]`.
    pub fn index_for(progress: f64, count: usize) -> usize {
        let last = count.saturating_sub(1);
        ((progress * last as f64).round() as usize).min(last)
    }

    /// Re-derives the active dot from a position. Leaves the highlight alone
    /// when the track does not scroll. Returns whether the active dot moved.
    pub fn sync(&mut self, position: f64, bounds: Bounds) -> bool {
        if self.count == 0 {
            return false;
        }
        let Some(progress) = bounds.progress(position) else {
            return false;
        };

        let next = Self::index_for(progress, self.count);
        let changed = next != self.active;
        self.active = next;
        changed
    }

    /// Position a click on dot `index` should travel to.
    pub fn target_for(&self, index: usize, bounds: Bounds) -> Option<f64> {
        if index >= self.count {
            return None;
        }
        if self.count == 1 {
            return Some(0.0);
        }
        Some(-(bounds.max * (index as f64 / (self.count - 1) as f64)))
    }

    /// Brings rendered marks in line with the current state: one entry per dot,
    /// only the active one set. Returns whether anything had to change.
    pub fn reconcile(&self, marks: &mut Vec<bool>) -> bool {
        let mut changed = marks.len() != self.count;
        marks.resize(self.count, false);

        for (i, mark) in marks.iter_mut().enumerate() {
            let want = self.is_active(i);
            if *mark != want {
                *mark = want;
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_matches_rounding_rule() {
        let bounds = Bounds::from_extent(1200.0, 400.0);
        let mut dots = Indicators::new(5);

        let mut position: f64 = 0.0;
        while position >= -800.0 {
            dots.sync(position, bounds);
            let expected = (position.abs() / 800.0 * 4.0).round() as usize;
            assert_eq!(dots.active(), Some(expected), "position {position}");
            position -= 7.3;
        }
    }

    #[test]
    fn test_sync_is_noop_without_range() {
        let mut dots = Indicators::new(5);
        dots.sync(-800.0, Bounds::from_extent(1200.0, 400.0));
        assert_eq!(dots.active(), Some(4));

        assert!(!dots.sync(0.0, Bounds::from_extent(300.0, 400.0)));
        assert_eq!(dots.active(), Some(4));
    }

    #[test]
    fn test_target_for() {
        let bounds = Bounds::from_extent(1200.0, 400.0);
        let dots = Indicators::new(5);

        assert_eq!(dots.target_for(0, bounds), Some(0.0));
        assert_eq!(dots.target_for(2, bounds), Some(-400.0));
        assert_eq!(dots.target_for(4, bounds), Some(-800.0));
        assert_eq!(dots.target_for(5, bounds), None);
        assert_eq!(Indicators::new(1).target_for(0, bounds), Some(0.0));
        assert_eq!(Indicators::new(0).target_for(0, bounds), None);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut dots = Indicators::new(3);
        dots.sync(-800.0, Bounds::from_extent(1200.0, 400.0));

        let mut marks = vec![true, true];
        assert!(dots.reconcile(&mut marks));
        assert_eq!(marks, vec![false, false, true]);
        assert!(!dots.reconcile(&mut marks));
        assert_eq!(marks, vec![false, false, true]);
    }
}
