//! The only state vitrine persists: the chosen theme and content language.

use crate::config::project_dirs;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use vitrinectl::appearance::{Language, Theme};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// `None` follows the desktop's dark-mode setting.
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Failed to determine data directory")]
    DataDirNotFound,
    #[error("Preferences error: {0}")]
    Parse(#[from] config::ConfigError),
    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Preferences io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn preferences_path() -> Result<PathBuf, PreferencesError> {
    let dirs = project_dirs().ok_or(PreferencesError::DataDirNotFound)?;
    Ok(dirs.data_dir().join("preferences.toml"))
}

pub fn read_from(path: &Path) -> Result<Preferences, PreferencesError> {
    if !path.exists() {
        return Ok(Preferences::default());
    }
    let s = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;
    Ok(s.try_deserialize()?)
}

pub fn write_to(path: &Path, prefs: &Preferences) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, toml::to_string(prefs)?)?;
    Ok(())
}

static CURRENT: OnceLock<RwLock<Preferences>> = OnceLock::new();

fn load() -> Preferences {
    preferences_path()
        .and_then(|path| read_from(&path))
        .unwrap_or_else(|e| {
            log::warn!("Failed to read preferences, using defaults: {}", e);
            Preferences::default()
        })
}

fn store() -> &'static RwLock<Preferences> {
    CURRENT.get_or_init(|| RwLock::new(load()))
}

pub fn current() -> Preferences {
    *store().read()
}

/// Applies `change` to the cached preferences and writes them back to disk.
pub fn update(change: impl FnOnce(&mut Preferences)) -> Preferences {
    let snapshot = {
        let mut prefs = store().write();
        change(&mut prefs);
        *prefs
    };

    if let Err(e) = preferences_path().and_then(|path| write_to(&path, &snapshot)) {
        log::error!("Failed to save preferences: {}", e);
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("vitrine-prefs-{}-{}", name, std::process::id()))
            .join("preferences.toml")
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let prefs = read_from(&scratch("missing")).unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.theme, None);
    }

    #[test]
    fn test_written_preferences_read_back() {
        let path = scratch("write");
        let prefs = Preferences {
            theme: Some(Theme::Dark),
            language: Language::Ar,
        };

        write_to(&path, &prefs).unwrap();
        assert_eq!(read_from(&path).unwrap(), prefs);

        let _ = fs_err::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_system_theme_is_not_written() {
        let path = scratch("system");
        write_to(&path, &Preferences::default()).unwrap();

        let text = fs_err::read_to_string(&path).unwrap();
        assert!(!text.contains("theme"), "{text}");
        assert_eq!(read_from(&path).unwrap(), Preferences::default());

        let _ = fs_err::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_every_field_is_persisted() {
        let prefs = Preferences {
            theme: Some(Theme::Light),
            language: Language::Ar,
        };
        let text = toml::to_string(&prefs).unwrap();

        assert!(text.contains("theme = \"light\""), "{text}");
        assert!(text.contains("language = \"ar\""), "{text}");
    }
}
