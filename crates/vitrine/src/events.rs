use vitrinectl::appearance::{Language, Theme};
use vitrinectl::protocol::Command;

/// Events produced off the GTK thread (control socket, file watcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Show,
    Hide,
    Goto(usize),
    SetLanguage(Language),
    SetTheme(Theme),
    ConfigReload,
}

impl From<Command> for AppEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Show => AppEvent::Show,
            Command::Hide => AppEvent::Hide,
            Command::Goto(index) => AppEvent::Goto(index),
            Command::Language(lang) => AppEvent::SetLanguage(lang),
            Command::Theme(theme) => AppEvent::SetTheme(theme),
            Command::Reload => AppEvent::ConfigReload,
        }
    }
}
