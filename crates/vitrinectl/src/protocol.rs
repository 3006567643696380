//! Line protocol spoken over the vitrine control socket.
//!
//! One command per line: `show`, `hide`, `goto <index>`, `lang <en|ar>`,
//! `theme <light|dark>` and `reload`.

use crate::appearance::{Language, Theme};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/vitrine.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show,
    Hide,
    /// Animate the carousel to the given indicator dot.
    Goto(usize),
    Language(Language),
    Theme(Theme),
    Reload,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' expects an argument")]
    MissingArgument(&'static str),
    #[error("invalid argument '{value}' for '{verb}'")]
    InvalidArgument { verb: &'static str, value: String },
    #[error("unexpected trailing input '{0}'")]
    Trailing(String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => f.write_str("show"),
            Self::Hide => f.write_str("hide"),
            Self::Goto(index) => write!(f, "goto {index}"),
            Self::Language(lang) => write!(f, "lang {lang}"),
            Self::Theme(theme) => write!(f, "theme {theme}"),
            Self::Reload => f.write_str("reload"),
        }
    }
}

fn argument<T: FromStr>(verb: &'static str, arg: Option<&str>) -> Result<T, ParseCommandError> {
    let value = arg.ok_or(ParseCommandError::MissingArgument(verb))?;
    value
        .parse()
        .map_err(|_| ParseCommandError::InvalidArgument {
            verb,
            value: value.to_string(),
        })
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?;
        let arg = words.next();

        let command = match verb.to_ascii_lowercase().as_str() {
            "show" => Self::Show,
            "hide" => Self::Hide,
            "reload" => Self::Reload,
            "goto" => Self::Goto(argument("goto", arg)?),
            "lang" | "language" => Self::Language(argument("lang", arg)?),
            "theme" => Self::Theme(argument("theme", arg)?),
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        };

        let takes_argument = matches!(
            command,
            Self::Goto(_) | Self::Language(_) | Self::Theme(_)
        );
        let trailing: Vec<&str> = if takes_argument {
            words.collect()
        } else {
            arg.into_iter().chain(words).collect()
        };
        if !trailing.is_empty() {
            return Err(ParseCommandError::Trailing(trailing.join(" ")));
        }

        Ok(command)
    }
}
