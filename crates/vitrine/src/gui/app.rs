use crate::carousel::{Carousel, Nudge, Tuning};
use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::stage::{
    self, CLICK_SLOP, Debounce, MountHandle, Point, SCROLL_STEP_PIXELS, SharedCarousel, Stage, StageSurface,
};
use crate::gui::theme::{self, ThemeColors};
use crate::preferences::{self, Preferences};
use crate::sys::backoff::Backoff;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;
use vitrinectl::appearance::{Language, Theme};

pub struct AppModel {
    pub stage: Rc<RefCell<Stage>>,
    pub carousel: SharedCarousel,
    pub mount: Option<MountHandle>,
    pub backoff: Backoff,
    pub retry: Debounce,
    pub tuning: Tuning,
    pub theme: Rc<Cell<Theme>>,
    pub visible: bool,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Mount,
    DragBegin(f64),
    DragUpdate(f64),
    DragEnd,
    /// Vertical scroll delta in pixels.
    Wheel(f64),
    Key(Nudge),
    Hover(bool),
    Click(Point),
    Resized,
    Goto(usize),
    SetLanguage(Language),
    SetTheme(Theme),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Goto(index) => AppMsg::Goto(index),
            AppEvent::SetLanguage(lang) => AppMsg::SetLanguage(lang),
            AppEvent::SetTheme(theme) => AppMsg::SetTheme(theme),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, Preferences, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Vitrine"),
            set_default_width: 1100,
            set_default_height: 440,
            #[watch]
            set_visible: model.visible,
            add_css_class: "vitrine-window",

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                set_focusable: true,
                add_css_class: "vitrine-stage",

                connect_resize[sender] => move |_, _, _| {
                    sender.input(AppMsg::Resized);
                },

                add_controller = gtk::EventControllerKey {
                    connect_key_pressed[sender] => move |_, key, _, _| {
                        match key {
                            gdk::Key::Left => sender.input(AppMsg::Key(Nudge::Left)),
                            gdk::Key::Right => sender.input(AppMsg::Key(Nudge::Right)),
                            gdk::Key::Escape => sender.input(AppMsg::Hide),
                            _ => return glib::Propagation::Proceed,
                        }
                        glib::Propagation::Stop
                    }
                },

                add_controller = gtk::EventControllerMotion {
                    connect_enter[sender] => move |_, _, _| {
                        sender.input(AppMsg::Hover(true));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::Hover(false));
                    }
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, _| {
                        sender.input(AppMsg::DragBegin(x));
                    },
                    connect_drag_update[sender] => move |gesture, dx, _| {
                        if let Some((x, _)) = gesture.start_point() {
                            sender.input(AppMsg::DragUpdate(x + dx));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        sender.input(AppMsg::DragEnd);
                        // a press that barely moved is a click
                        if dx.hypot(dy) < CLICK_SLOP
                            && let Some((x, y)) = gesture.start_point()
                        {
                            sender.input(AppMsg::Click(Point::new(x + dx, y + dy)));
                        }
                    }
                },

                add_controller = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL) {
                    connect_scroll[sender] => move |controller, _, dy| {
                        sender.input(AppMsg::Wheel(scroll_pixels(dy, controller.unit())));
                        glib::Propagation::Stop
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, prefs, rx) = init;

        theme::load_css();
        let initial_theme = prefs.theme.unwrap_or_else(theme::system_theme);
        theme::apply_theme(initial_theme);

        let model = AppModel {
            stage: Rc::new(RefCell::new(Stage::new(&config, prefs.language))),
            carousel: Rc::new(RefCell::new(None)),
            mount: None,
            backoff: Backoff::default(),
            retry: Debounce::default(),
            tuning: config.carousel.clone(),
            theme: Rc::new(Cell::new(initial_theme)),
            visible: true,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        set_direction(&model.drawing_area, prefs.language);

        let stage_draw = model.stage.clone();
        let carousel_draw = model.carousel.clone();
        let theme_draw = model.theme.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let colors = ThemeColors::from_context(&drawing_area.style_context(), theme_draw.get());
                let position = carousel_draw
                    .borrow()
                    .as_ref()
                    .map_or(0.0, Carousel::position);
                if let Err(e) = stage::draw(
                    cr,
                    &stage_draw.borrow(),
                    position,
                    width as f64,
                    height as f64,
                    &colors,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        sender.input(AppMsg::Mount);
        widgets.drawing_area.grab_focus();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        let now = Instant::now();
        match msg {
            AppMsg::Show => {
                self.visible = true;
                self.drawing_area.queue_draw();
            }
            AppMsg::Hide => {
                self.visible = false;
            }
            AppMsg::Mount => self.try_mount(&sender),
            AppMsg::DragBegin(x) => self.with_carousel(|c| c.on_drag_start(x, now)),
            AppMsg::DragUpdate(x) => self.with_carousel(|c| c.on_drag_move(x, now)),
            AppMsg::DragEnd => self.with_carousel(|c| c.on_drag_end(now)),
            AppMsg::Wheel(dy) => self.with_carousel(|c| c.on_wheel(dy, now)),
            AppMsg::Key(nudge) => self.with_carousel(|c| c.on_key(nudge, now)),
            AppMsg::Hover(hovering) => self.with_carousel(|c| c.on_hover(hovering, now)),
            AppMsg::Click(point) => {
                let (width, height) = (
                    self.drawing_area.width() as f64,
                    self.drawing_area.height() as f64,
                );
                let hit = self.stage.borrow().indicator_at(point, width, height);
                if let Some(index) = hit {
                    self.goto(index, now);
                }
            }
            AppMsg::Goto(index) => self.goto(index, now),
            AppMsg::Resized => {
                let delay = self.stage.borrow().layout.resize_debounce;
                match &self.mount {
                    Some(handle) => handle.schedule_resize(delay),
                    None => self.try_mount(&sender),
                }
            }
            AppMsg::SetLanguage(lang) => {
                preferences::update(|p| p.language = lang);
                set_direction(&self.drawing_area, lang);
                let changed = self.stage.borrow_mut().set_language(lang);
                if changed {
                    self.remount(&sender);
                }
            }
            AppMsg::SetTheme(theme) => {
                preferences::update(|p| p.theme = Some(theme));
                self.theme.set(theme);
                theme::apply_theme(theme);
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.tuning = new_config.carousel.clone();
                    self.stage.borrow_mut().apply_config(&new_config);
                    self.remount(&sender);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    /// Runs `f` against the mounted carousel, then refreshes the dots.
    fn with_carousel(&self, f: impl FnOnce(&mut Carousel<StageSurface>)) {
        if let Some(carousel) = self.carousel.borrow_mut().as_mut() {
            f(carousel);
            self.stage
                .borrow_mut()
                .reconcile_indicators(carousel.indicators());
        }
        self.drawing_area.queue_draw();
    }

    fn goto(&self, index: usize, now: Instant) {
        self.with_carousel(|c| {
            if !c.on_indicator_click(index, now) {
                log::debug!("Ignoring jump to indicator {}", index);
            }
        });
    }

    fn try_mount(&mut self, sender: &ComponentSender<Self>) {
        if self.mount.is_some() {
            return;
        }
        if let Some(handle) = stage::mount(&self.drawing_area, &self.stage, &self.tuning, &self.carousel) {
            self.mount = Some(handle);
            self.retry.cancel();
            self.backoff.reset();
            log::debug!("Carousel mounted");
            return;
        }
        if !self.stage.borrow().has_track() {
            log::info!("No showcase items configured; the stage stays empty");
            return;
        }
        // one retry chain at a time; resizes must not burn extra attempts
        if self.retry.is_pending() {
            return;
        }
        match self.backoff.next_delay() {
            Some(delay) => {
                let sender = sender.clone();
                self.retry.schedule(delay, move || sender.input(AppMsg::Mount));
            }
            None => log::warn!(
                "Stage never got a size after {} attempts; carousel stays static",
                self.backoff.attempts()
            ),
        }
    }

    fn remount(&mut self, sender: &ComponentSender<Self>) {
        if let Some(handle) = self.mount.take() {
            handle.teardown();
        }
        self.retry.cancel();
        self.backoff.reset();
        self.try_mount(sender);
        self.drawing_area.queue_draw();
    }
}

/// Converts a scroll delta to pixels. Mouse wheels report notches; touchpads
/// and other smooth devices already report surface pixels.
fn scroll_pixels(dy: f64, unit: gdk::ScrollUnit) -> f64 {
    match unit {
        gdk::ScrollUnit::Wheel => dy * SCROLL_STEP_PIXELS,
        _ => dy,
    }
}

fn set_direction(area: &gtk::DrawingArea, lang: Language) {
    area.set_direction(if lang.is_rtl() {
        gtk::TextDirection::Rtl
    } else {
        gtk::TextDirection::Ltr
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_units() {
        assert_eq!(scroll_pixels(1.0, gdk::ScrollUnit::Wheel), 100.0);
        assert_eq!(scroll_pixels(-0.5, gdk::ScrollUnit::Wheel), -50.0);
        // touchpad swipes arrive in pixels already
        assert_eq!(scroll_pixels(10.0, gdk::ScrollUnit::Surface), 10.0);
    }
}
