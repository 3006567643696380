//! Toolkit independent carousel: scroll position, drag physics, idle
//! auto-scroll and position dots. The GUI feeds it input events and calls
//! [`Carousel::advance`] once per frame.

pub mod bounds;
pub mod controller;
pub mod indicators;
pub mod motion;
pub mod timer;
pub mod tuning;

pub use bounds::Bounds;
pub use controller::{Carousel, FrameHandle, Motion, Nudge, ScrollState};
pub use indicators::Indicators;
pub use tuning::Tuning;

/// Live measurements of whatever hosts the carousel.
///
/// `None` means the element is not there (yet); mounting then fails.
pub trait Surface {
    fn viewport_width(&self) -> Option<f64>;
    fn track_width(&self) -> Option<f64>;
    fn indicator_count(&self) -> usize;
}
