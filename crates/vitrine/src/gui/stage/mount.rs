use super::model::Stage;
use crate::carousel::{Carousel, Surface, Tuning};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub type SharedCarousel = Rc<RefCell<Option<Carousel<StageSurface>>>>;

/// The live widget measurements the carousel reads on every frame.
pub struct StageSurface {
    area: gtk::DrawingArea,
    stage: Rc<RefCell<Stage>>,
}

impl StageSurface {
    pub fn new(area: gtk::DrawingArea, stage: Rc<RefCell<Stage>>) -> Self {
        Self { area, stage }
    }
}

impl Surface for StageSurface {
    fn viewport_width(&self) -> Option<f64> {
        let width = self.area.width();
        (width > 0).then_some(width as f64)
    }

    fn track_width(&self) -> Option<f64> {
        self.stage.borrow().track_width()
    }

    fn indicator_count(&self) -> usize {
        self.stage.borrow().indicator_count()
    }
}

/// A one-shot glib timeout that restarts on every `schedule`.
#[derive(Default)]
pub struct Debounce {
    source: Rc<RefCell<Option<glib::SourceId>>>,
}

impl Debounce {
    pub fn schedule(&self, delay: Duration, action: impl FnOnce() + 'static) {
        self.cancel();
        let slot = self.source.clone();
        let id = glib::timeout_add_local_once(delay, move || {
            // the source is finished once we are called
            slot.borrow_mut().take();
            action();
        });
        *self.source.borrow_mut() = Some(id);
    }

    pub fn cancel(&self) {
        if let Some(id) = self.source.borrow_mut().take() {
            id.remove();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.source.borrow().is_some()
    }
}

/// Owns everything a mounted carousel keeps alive on the GTK side. Dropping
/// or tearing it down stops all callbacks.
pub struct MountHandle {
    area: gtk::DrawingArea,
    slot: SharedCarousel,
    tick: Option<gtk::TickCallbackId>,
    resize: Debounce,
}

impl MountHandle {
    pub fn schedule_resize(&self, delay: Duration) {
        let slot = self.slot.clone();
        let area = self.area.clone();
        self.resize.schedule(delay, move || {
            if let Some(carousel) = slot.borrow_mut().as_mut() {
                carousel.on_resize();
            }
            area.queue_draw();
        });
    }

    pub fn teardown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(tick) = self.tick.take() {
            tick.remove();
        }
        self.resize.cancel();
        if let Some(mut carousel) = self.slot.borrow_mut().take() {
            carousel.teardown();
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Mounts a carousel over `area` into `slot`. Returns `None` while the stage
/// has no measurable viewport or track; callers retry later.
pub fn mount(
    area: &gtk::DrawingArea,
    stage: &Rc<RefCell<Stage>>,
    tuning: &Tuning,
    slot: &SharedCarousel,
) -> Option<MountHandle> {
    let surface = StageSurface::new(area.clone(), stage.clone());
    let carousel = Carousel::mount(surface, tuning.clone(), Instant::now())?;
    stage.borrow_mut().reconcile_indicators(carousel.indicators());
    *slot.borrow_mut() = Some(carousel);

    let tick_slot = slot.clone();
    let tick_stage = stage.clone();
    let tick = area.add_tick_callback(move |area, _clock| {
        if let Some(carousel) = tick_slot.borrow_mut().as_mut()
            && carousel.advance(Instant::now())
        {
            tick_stage
                .borrow_mut()
                .reconcile_indicators(carousel.indicators());
            area.queue_draw();
        }
        glib::ControlFlow::Continue
    });

    area.queue_draw();
    Some(MountHandle {
        area: area.clone(),
        slot: slot.clone(),
        tick: Some(tick),
        resize: Debounce::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_debounce_runs_latest_action_once() {
        let context = glib::MainContext::default();
        let _guard = context.acquire().unwrap();
        let fired = Rc::new(Cell::new(0));
        let debounce = Debounce::default();

        let first = fired.clone();
        debounce.schedule(Duration::ZERO, move || first.set(first.get() + 1));
        let second = fired.clone();
        debounce.schedule(Duration::ZERO, move || second.set(second.get() + 10));
        assert!(debounce.is_pending());

        while context.iteration(false) {}

        assert_eq!(fired.get(), 10);
        assert!(!debounce.is_pending());
        // the finished source is gone; cancelling again must be harmless
        debounce.cancel();
    }
}
