pub mod model;
pub mod mount;
pub mod view;

pub use model::{Card, IndicatorGeometry, Point, Stage};
pub use mount::{Debounce, MountHandle, SharedCarousel, StageSurface, mount};
pub use view::draw;

/// Height of the strip below the cards that holds the dots.
pub const INDICATOR_BAND: f64 = 48.0;
pub const DOT_RADIUS: f64 = 5.0;
pub const ACTIVE_DOT_RADIUS: f64 = 7.0;
pub const DOT_SPACING: f64 = 22.0;
pub const DOT_HIT_RADIUS: f64 = 11.0;
/// Pointer travel below which a drag counts as a click.
pub const CLICK_SLOP: f64 = 4.0;
pub const CARD_CORNER_RADIUS: f64 = 18.0;
pub const TITLE_FONT_SIZE: f64 = 18.0;
pub const TITLE_MARGIN: f64 = 20.0;
pub const IMAGE_INSET: f64 = 16.0;
pub const IMAGE_SIZE: i32 = 512;
/// GTK reports wheel notches as 1.0; browsers report roughly 100px.
pub const SCROLL_STEP_PIXELS: f64 = 100.0;
