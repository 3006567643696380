use super::model::{Card, Stage};
use super::{
    ACTIVE_DOT_RADIUS, CARD_CORNER_RADIUS, DOT_RADIUS, IMAGE_INSET, TITLE_FONT_SIZE, TITLE_MARGIN,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::{FRAC_PI_2, PI};
use vitrinectl::appearance::Language;

#[derive(Debug, Clone, Copy, PartialEq)]
struct CardFrame {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl CardFrame {
    fn is_visible(&self, viewport_width: f64) -> bool {
        self.x + self.width > 0.0 && self.x < viewport_width
    }
}

struct CardRenderer<'a> {
    card: &'a Card,
    frame: CardFrame,
    language: Language,
}

impl<'a> CardRenderer<'a> {
    fn new(card: &'a Card, frame: CardFrame, language: Language) -> Self {
        Self {
            card,
            frame,
            language,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_background(cr, colors)?;
        match &self.card.pixbuf {
            Some(pixbuf) => self.draw_image(cr, pixbuf)?,
            None => self.draw_placeholder(cr, colors)?,
        }
        self.draw_title(cr, colors)
    }

    fn draw_background(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_source(cr, colors.card);
        rounded_rect(cr, self.frame, CARD_CORNER_RADIUS);
        cr.fill()
    }

    /// The image area is the card minus the inset and the title strip.
    fn image_area(&self) -> CardFrame {
        let title_strip = TITLE_FONT_SIZE + 2.0 * TITLE_MARGIN;
        CardFrame {
            x: self.frame.x + IMAGE_INSET,
            y: self.frame.y + IMAGE_INSET,
            width: (self.frame.width - 2.0 * IMAGE_INSET).max(0.0),
            height: (self.frame.height - IMAGE_INSET - title_strip).max(0.0),
        }
    }

    fn draw_image(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let area = self.image_area();
        let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
        if pw <= 0.0 || ph <= 0.0 {
            return Ok(());
        }
        // contain, centred in the image area
        let scale = (area.width / pw).min(area.height / ph);
        let (iw, ih) = (pw * scale, ph * scale);

        cr.save()?;
        rounded_rect(cr, area, CARD_CORNER_RADIUS / 2.0);
        cr.clip();
        cr.translate(
            area.x + (area.width - iw) / 2.0,
            area.y + (area.height - ih) / 2.0,
        );
        cr.scale(scale, scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_placeholder(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_source(cr, colors.placeholder);
        rounded_rect(cr, self.image_area(), CARD_CORNER_RADIUS / 2.0);
        cr.fill()
    }

    fn draw_title(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let Some(title) = self.card.title(self.language) else {
            return Ok(());
        };

        set_source(cr, colors.card_text);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(TITLE_FONT_SIZE);
        if let Ok(ext) = cr.text_extents(title) {
            let baseline = self.frame.y + self.frame.height - TITLE_MARGIN;
            let x = if self.language.is_rtl() {
                self.frame.x + self.frame.width - TITLE_MARGIN - ext.width()
            } else {
                self.frame.x + TITLE_MARGIN
            };
            cr.move_to(x, baseline);
            cr.show_text(title)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DotState {
    Active,
    Idle,
}

impl DotState {
    fn resolve(marked: bool) -> Self {
        if marked { Self::Active } else { Self::Idle }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Active => colors.dot_active,
            Self::Idle => colors.dot,
        }
    }

    fn radius(&self) -> f64 {
        match self {
            Self::Active => ACTIVE_DOT_RADIUS,
            Self::Idle => DOT_RADIUS,
        }
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn rounded_rect(cr: &Context, frame: CardFrame, radius: f64) {
    let r = radius.min(frame.width / 2.0).min(frame.height / 2.0);
    let (left, top) = (frame.x, frame.y);
    let (right, bottom) = (frame.x + frame.width, frame.y + frame.height);

    cr.new_sub_path();
    cr.arc(right - r, top + r, r, -FRAC_PI_2, 0.0);
    cr.arc(right - r, bottom - r, r, 0.0, FRAC_PI_2);
    cr.arc(left + r, bottom - r, r, FRAC_PI_2, PI);
    cr.arc(left + r, top + r, r, PI, 3.0 * FRAC_PI_2);
    cr.close_path();
}

/// Paints the visible cards shifted by `position` and the dot row.
pub fn draw(
    cr: &Context,
    stage: &Stage,
    position: f64,
    width: f64,
    height: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_source(cr, colors.background);
    cr.paint()?;

    let top = stage.card_top(height);
    for (i, card) in stage.cards.iter().enumerate() {
        let frame = CardFrame {
            x: stage.card_x(i) + position,
            y: top,
            width: stage.layout.card_width,
            height: stage.layout.card_height,
        };
        if frame.is_visible(width) {
            CardRenderer::new(card, frame, stage.language).draw(cr, colors)?;
        }
    }

    draw_indicators(cr, stage, width, height, colors)
}

fn draw_indicators(
    cr: &Context,
    stage: &Stage,
    width: f64,
    height: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    for (i, &marked) in stage.marks.iter().enumerate() {
        let state = DotState::resolve(marked);
        let center = stage.indicator_geometry(i, width, height).center;
        set_source(cr, state.color(colors));
        cr.arc(center.x, center.y, state.radius(), 0.0, 2.0 * PI);
        cr.fill()?;
    }
    Ok(())
}
