use super::Surface;
use super::bounds::Bounds;
use super::indicators::Indicators;
use super::motion::{self, VelocityTracker};
use super::timer::ResumeTimer;
use super::tuning::Tuning;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Offset of the track, always within `[-max, 0]`.
    pub position: f64,
    pub velocity: f64,
    pub dragging: bool,
    pub hovering: bool,
}

/// Animation currently owning the frame loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    AutoScroll,
    Momentum,
    Ease { target: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
struct FrameLoop {
    handle: FrameHandle,
    motion: Motion,
    last_frame: Option<Instant>,
}

#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    x: f64,
    position: f64,
    tracker: VelocityTracker,
}

/// One carousel instance. Owns its scroll state and reads its extent from the
/// surface on every position write.
///
/// At most one animation runs at a time: starting one cancels whatever held
/// the frame loop before, and a drag cancels everything.
#[derive(Debug)]
pub struct Carousel<S> {
    surface: S,
    tuning: Tuning,
    state: ScrollState,
    indicators: Indicators,
    drag: Option<DragAnchor>,
    frame: Option<FrameLoop>,
    next_handle: u64,
    resume: ResumeTimer,
    mounted: bool,
}

impl<S: Surface> Carousel<S> {
    /// Sets up a carousel on `surface`, or returns `None` when the viewport or
    /// the track cannot be measured. Auto-scroll starts after `start_delay`.
    pub fn mount(surface: S, tuning: Tuning, now: Instant) -> Option<Self> {
        let viewport = surface.viewport_width()?;
        let track = surface.track_width()?;
        log::debug!("Mounting carousel: track {track}px in viewport {viewport}px");

        let tuning = tuning.sanitized();
        let mut carousel = Self {
            indicators: Indicators::new(surface.indicator_count()),
            surface,
            state: ScrollState::default(),
            drag: None,
            frame: None,
            next_handle: 0,
            resume: ResumeTimer::default(),
            mounted: true,
            tuning,
        };
        carousel.set_position(0.0);
        carousel
            .resume
            .schedule(now, carousel.tuning.start_delay);
        Some(carousel)
    }

    /// Cancels every pending frame loop and timer. Later input is ignored.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.cancel_frame();
        self.resume.cancel();
        self.drag = None;
        self.state.dragging = false;
        self.state.velocity = 0.0;
        self.mounted = false;
        log::debug!("Carousel torn down at {}px", self.state.position);
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[cfg(test)]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn position(&self) -> f64 {
        self.state.position
    }

    pub fn indicators(&self) -> &Indicators {
        &self.indicators
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn motion(&self) -> Option<Motion> {
        self.frame.map(|f| f.motion)
    }

    pub fn frame_handle(&self) -> Option<FrameHandle> {
        self.frame.map(|f| f.handle)
    }

    #[cfg(test)]
    pub fn resume_due(&self) -> Option<Instant> {
        self.resume.due()
    }

    pub fn compute_bounds(&self) -> Bounds {
        match (self.surface.track_width(), self.surface.viewport_width()) {
            (Some(track), Some(viewport)) => Bounds::from_extent(track, viewport),
            _ => Bounds::default(),
        }
    }

    pub fn set_position(&mut self, position: f64) {
        if !position.is_finite() {
            return;
        }
        let bounds = self.compute_bounds();
        self.state.position = bounds.clamp(position);
        self.indicators.sync(self.state.position, bounds);
    }

    pub fn on_drag_start(&mut self, x: f64, now: Instant) {
        if !self.mounted {
            return;
        }
        self.cancel_frame();
        self.resume.cancel();
        self.drag = Some(DragAnchor {
            x,
            position: self.state.position,
            tracker: VelocityTracker::start(x, now),
        });
        self.state.dragging = true;
        self.state.velocity = 0.0;
    }

    pub fn on_drag_move(&mut self, x: f64, now: Instant) {
        let reference = self.tuning.frame_reference;
        let smoothing = self.tuning.velocity_smoothing;
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let target = drag.position + (x - drag.x);
        let velocity = drag.tracker.sample(x, now, reference, smoothing);
        self.set_position(target);
        self.state.velocity = velocity;
    }

    pub fn on_drag_end(&mut self, now: Instant) {
        if self.drag.take().is_none() {
            return;
        }
        self.state.dragging = false;

        let velocity = self.state.velocity;
        if velocity.abs() > self.tuning.velocity_threshold {
            log::trace!(
                "Momentum from {velocity:.2}px/frame (~{} frames)",
                motion::momentum_frames(
                    velocity,
                    self.tuning.friction,
                    self.tuning.velocity_threshold
                )
            );
            self.start_frame(Motion::Momentum);
        } else {
            self.state.velocity = 0.0;
            self.resume.schedule(now, self.tuning.resume_delay);
        }
    }

    pub fn on_wheel(&mut self, delta_y: f64, now: Instant) {
        let delay = self.tuning.wheel_resume_delay;
        self.nudge(-delta_y * self.tuning.wheel_scale, delay, now);
    }

    pub fn on_key(&mut self, nudge: Nudge, now: Instant) {
        let step = match nudge {
            Nudge::Left => self.tuning.key_step,
            Nudge::Right => -self.tuning.key_step,
        };
        self.nudge(step, self.tuning.resume_delay, now);
    }

    fn nudge(&mut self, delta: f64, resume_after: Duration, now: Instant) {
        if !self.mounted || self.state.dragging {
            return;
        }
        self.cancel_frame();
        self.state.velocity = 0.0;
        self.set_position(self.state.position + delta);
        self.resume.schedule(now, resume_after);
    }

    /// Starts easing towards dot `index`. Returns `false` if the click was
    /// ignored.
    pub fn on_indicator_click(&mut self, index: usize, _now: Instant) -> bool {
        if !self.mounted || self.state.dragging {
            return false;
        }
        let Some(target) = self.indicators.target_for(index, self.compute_bounds()) else {
            return false;
        };

        self.resume.cancel();
        self.state.velocity = 0.0;
        self.start_frame(Motion::Ease { target });
        true
    }

    pub fn on_hover(&mut self, hovering: bool, now: Instant) {
        if !self.mounted {
            return;
        }
        self.state.hovering = hovering;

        if hovering {
            if self.motion() == Some(Motion::AutoScroll) {
                self.cancel_frame();
            }
        } else if self.state.dragging {
            self.on_drag_end(now);
        } else if self.frame.is_none() {
            self.start_auto_scroll();
        }
    }

    /// Re-clamps the position after the viewport or track changed size.
    pub fn on_resize(&mut self) {
        if self.mounted {
            self.set_position(self.state.position);
        }
    }

    /// Starts the idle scroll unless the user is interacting or another
    /// animation owns the frame loop. Safe to call repeatedly.
    pub fn start_auto_scroll(&mut self) {
        if !self.mounted || self.state.dragging || self.state.hovering {
            log::trace!("Auto-scroll resume skipped: carousel busy");
            return;
        }
        if self.frame.is_none() {
            self.start_frame(Motion::AutoScroll);
        }
    }

    /// Runs timers and the active animation up to `now`. Returns whether the
    /// position changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        let before = self.state.position;

        if self.resume.fire(now) {
            self.start_auto_scroll();
        }
        self.tick_frame(now);

        self.state.position != before
    }

    fn tick_frame(&mut self, now: Instant) {
        let reference = self.tuning.frame_reference;
        let Some(frame) = self.frame.as_mut() else {
            return;
        };
        let steps = frame
            .last_frame
            .map_or(1.0, |last| motion::frame_steps(now.saturating_duration_since(last), reference));
        frame.last_frame = Some(now);
        let (handle, current) = (frame.handle, frame.motion);

        match current {
            Motion::AutoScroll => {
                if self.state.dragging || self.state.hovering {
                    return;
                }
                let max = self.compute_bounds().max;
                let next = motion::auto_scroll_step(
                    self.state.position,
                    self.tuning.auto_scroll_speed,
                    steps,
                    max,
                );
                self.set_position(next);
            }
            Motion::Momentum => {
                if self.state.velocity.abs() > self.tuning.velocity_threshold {
                    let (velocity, distance) =
                        motion::momentum_step(self.state.velocity, self.tuning.friction, steps);
                    self.state.velocity = velocity;
                    self.set_position(self.state.position + distance);
                } else {
                    self.state.velocity = 0.0;
                    self.finish_frame(handle, now);
                }
            }
            Motion::Ease { target } => {
                let target = self.compute_bounds().clamp(target);
                let distance = target - self.state.position;
                if distance.abs() > self.tuning.snap_distance {
                    self.set_position(motion::ease_step(
                        self.state.position,
                        target,
                        self.tuning.ease_factor,
                        steps,
                    ));
                } else {
                    self.set_position(target);
                    self.finish_frame(handle, now);
                }
            }
        }
    }

    fn start_frame(&mut self, motion: Motion) {
        self.cancel_frame();
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.frame = Some(FrameLoop {
            handle,
            motion,
            last_frame: None,
        });
        log::trace!("Frame loop {:?} started: {:?}", handle, motion);
    }

    fn cancel_frame(&mut self) {
        if let Some(frame) = self.frame.take() {
            log::trace!("Frame loop {:?} cancelled: {:?}", frame.handle, frame.motion);
        }
    }

    /// Ends a self-terminating animation and arms the auto-scroll resume.
    fn finish_frame(&mut self, handle: FrameHandle, now: Instant) {
        if self.frame_handle() == Some(handle) {
            self.frame = None;
            self.resume.schedule(now, self.tuning.resume_delay);
        }
    }
}
