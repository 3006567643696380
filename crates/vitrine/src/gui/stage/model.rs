use crate::carousel::Indicators;
use crate::config::{CardTitle, Config, ItemConfig, StageConfig};
use crate::gui::stage::{DOT_HIT_RADIUS, DOT_SPACING, IMAGE_SIZE, INDICATOR_BAND};
use gdk_pixbuf::Pixbuf;
use vitrinectl::appearance::Language;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone)]
pub struct Card {
    pub item: ItemConfig,
    pub pixbuf: Option<Pixbuf>,
}

impl Card {
    pub fn new(item: ItemConfig) -> Self {
        let pixbuf = item.image.as_deref().and_then(|path| {
            Pixbuf::from_file_at_scale(path, IMAGE_SIZE, IMAGE_SIZE, true)
                .inspect_err(|e| log::warn!("Failed to load {}: {}", path.display(), e))
                .ok()
        });
        Self { item, pixbuf }
    }

    pub fn title(&self, lang: Language) -> Option<&CardTitle> {
        self.item.title.get(lang)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorGeometry {
    pub center: Point,
}

impl IndicatorGeometry {
    /// Dots sit in a centred row in the middle of the indicator band.
    pub fn calculate(index: usize, count: usize, width: f64, height: f64) -> Self {
        let row = count.saturating_sub(1) as f64 * DOT_SPACING;
        let x = width / 2.0 - row / 2.0 + index as f64 * DOT_SPACING;
        let y = height - INDICATOR_BAND / 2.0;
        Self {
            center: Point::new(x, y),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let (dx, dy) = (point.x - self.center.x, point.y - self.center.y);
        dx.hypot(dy) <= DOT_HIT_RADIUS
    }
}

/// Everything drawn on the stage: the cards of the track, their layout and
/// the rendered state of the dots.
pub struct Stage {
    pub cards: Vec<Card>,
    pub layout: StageConfig,
    pub language: Language,
    pub marks: Vec<bool>,
}

impl Stage {
    pub fn new(config: &Config, language: Language) -> Self {
        let mut stage = Self {
            cards: Vec::new(),
            layout: config.stage.clone(),
            language,
            marks: Vec::new(),
        };
        stage.apply_config(config);
        stage
    }

    pub fn apply_config(&mut self, config: &Config) {
        self.cards = config.items.iter().cloned().map(Card::new).collect();
        self.layout = config.stage.clone();
        self.reconcile_indicators(&Indicators::new(self.indicator_count()));
    }

    /// Returns whether the language actually changed.
    pub fn set_language(&mut self, language: Language) -> bool {
        let changed = self.language != language;
        self.language = language;
        changed
    }

    pub fn has_track(&self) -> bool {
        !self.cards.is_empty()
    }

    pub fn track_width(&self) -> Option<f64> {
        let n = self.cards.len();
        (n > 0).then(|| {
            2.0 * self.layout.padding
                + n as f64 * self.layout.card_width
                + (n - 1) as f64 * self.layout.card_gap
        })
    }

    /// Left edge of card `index`, relative to the start of the track.
    pub fn card_x(&self, index: usize) -> f64 {
        self.layout.padding + index as f64 * (self.layout.card_width + self.layout.card_gap)
    }

    pub fn card_top(&self, height: f64) -> f64 {
        ((height - INDICATOR_BAND - self.layout.card_height) / 2.0).max(0.0)
    }

    pub fn indicator_count(&self) -> usize {
        self.layout.indicators
    }

    pub fn indicator_geometry(&self, index: usize, width: f64, height: f64) -> IndicatorGeometry {
        IndicatorGeometry::calculate(index, self.indicator_count(), width, height)
    }

    pub fn indicator_at(&self, point: Point, width: f64, height: f64) -> Option<usize> {
        (0..self.indicator_count()).find(|&i| self.indicator_geometry(i, width, height).contains(point))
    }

    pub fn reconcile_indicators(&mut self, indicators: &Indicators) -> bool {
        indicators.reconcile(&mut self.marks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CardTitle, LocalizedTitle};

    fn item(en: &str) -> ItemConfig {
        ItemConfig {
            title: LocalizedTitle {
                en: Some(CardTitle::new(en)),
                ar: None,
            },
            image: None,
        }
    }

    fn stage_with(n: usize) -> Stage {
        let config = Config {
            items: (0..n).map(|i| item(&format!("card {i}"))).collect(),
            ..Config::default()
        };
        Stage::new(&config, Language::En)
    }

    #[test]
    fn test_track_width() {
        assert_eq!(stage_with(0).track_width(), None);
        assert_eq!(stage_with(1).track_width(), Some(328.0));
        assert_eq!(stage_with(6).track_width(), Some(1848.0));
    }

    #[test]
    fn test_card_positions() {
        let stage = stage_with(3);
        assert_eq!(stage.card_x(0), 24.0);
        assert_eq!(stage.card_x(2), 632.0);
        assert_eq!(stage.card_top(440.0), 36.0);
        assert_eq!(stage.card_top(100.0), 0.0);
    }

    #[test]
    fn test_indicator_hit_testing() {
        let stage = stage_with(6);
        // 5 dots centred in a 1000px wide stage: first dot at x=456
        let cases = vec![
            (Point::new(456.0, 376.0), Some(0)),
            (Point::new(478.0, 380.0), Some(1)),
            (Point::new(544.0, 370.0), Some(4)),
            (Point::new(467.0, 366.0), None),
            (Point::new(456.0, 200.0), None),
        ];

        for (point, expected) in cases {
            assert_eq!(stage.indicator_at(point, 1000.0, 400.0), expected, "{point:?}");
        }
    }

    #[test]
    fn test_new_stage_marks_first_dot() {
        let stage = stage_with(2);
        assert_eq!(stage.marks, vec![true, false, false, false, false]);
    }

    #[test]
    fn test_language_switch_reports_change() {
        let mut stage = stage_with(2);
        assert!(!stage.set_language(Language::En));
        assert!(stage.set_language(Language::Ar));
        assert_eq!(
            stage.cards[0].title(Language::Ar).map(|t| t.as_str()),
            Some("card 0")
        );
    }
}
