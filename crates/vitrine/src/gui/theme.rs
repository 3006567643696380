use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use vitrinectl::appearance::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub card: Srgba<f64>,
    pub card_text: Srgba<f64>,
    pub placeholder: Srgba<f64>,
    pub dot: Srgba<f64>,
    pub dot_active: Srgba<f64>,
}

impl ThemeColors {
    /// Colours used when the GTK theme does not define a named colour.
    pub fn fallback(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Srgba::new(0.96, 0.96, 0.97, 1.0),
                card: Srgba::new(1.0, 1.0, 1.0, 1.0),
                card_text: Srgba::new(0.12, 0.12, 0.14, 1.0),
                placeholder: Srgba::new(0.88, 0.89, 0.92, 1.0),
                dot: Srgba::new(0.0, 0.0, 0.0, 0.25),
                dot_active: Srgba::new(0.21, 0.52, 0.89, 1.0),
            },
            Theme::Dark => Self {
                background: Srgba::new(0.11, 0.11, 0.12, 1.0),
                card: Srgba::new(0.19, 0.19, 0.21, 1.0),
                card_text: Srgba::new(0.94, 0.94, 0.95, 1.0),
                placeholder: Srgba::new(0.27, 0.27, 0.30, 1.0),
                dot: Srgba::new(1.0, 1.0, 1.0, 0.3),
                dot_active: Srgba::new(0.47, 0.68, 0.96, 1.0),
            },
        }
    }

    pub fn from_context(context: &gtk::StyleContext, theme: Theme) -> Self {
        let fallback = Self::fallback(theme);
        Self {
            background: Self::lookup_color(context, "theme_bg_color", fallback.background, None),
            card: Self::lookup_color(context, "theme_base_color", fallback.card, None),
            card_text: Self::lookup_color(context, "theme_text_color", fallback.card_text, None),
            placeholder: Self::lookup_color(
                context,
                "theme_unfocused_bg_color",
                fallback.placeholder,
                None,
            ),
            dot: Self::lookup_color(context, "theme_fg_color", fallback.dot, Some(fallback.dot.alpha)),
            dot_active: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.dot_active,
                Some(1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    alpha_override.unwrap_or(c.alpha() as f64),
                )
            })
            .unwrap_or(fallback)
    }
}

/// The desktop's current preference, used until the user picks a theme.
pub fn system_theme() -> Theme {
    let dark = gtk::Settings::default().is_some_and(|s| {
        s.is_gtk_application_prefer_dark_theme()
            || s.gtk_theme_name()
                .is_some_and(|name| name.to_lowercase().contains("dark"))
    });
    if dark { Theme::Dark } else { Theme::Light }
}

pub fn apply_theme(theme: Theme) {
    if let Some(settings) = gtk::Settings::default() {
        settings.set_gtk_application_prefer_dark_theme(theme.is_dark());
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.vitrine-stage:focus {
    outline: none;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks_differ_by_theme() {
        let light = ThemeColors::fallback(Theme::Light);
        let dark = ThemeColors::fallback(Theme::Dark);
        assert_ne!(light, dark);
        assert!(light.background.red > dark.background.red);
    }
}
