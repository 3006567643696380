use crate::carousel::Tuning;
use crate::events::AppEvent;
use async_channel::Sender;
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use vitrinectl::appearance::Language;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct CardTitle(String);

vitrinectl::impl_text_newtype!(CardTitle);

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LocalizedTitle {
    pub en: Option<CardTitle>,
    pub ar: Option<CardTitle>,
}

impl LocalizedTitle {
    /// Title in `lang`, falling back to whichever translation exists.
    pub fn get(&self, lang: Language) -> Option<&CardTitle> {
        let (wanted, other) = match lang {
            Language::En => (&self.en, &self.ar),
            Language::Ar => (&self.ar, &self.en),
        };
        wanted
            .as_ref()
            .filter(|t| !t.is_blank())
            .or(other.as_ref().filter(|t| !t.is_blank()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ItemConfig {
    #[serde(default)]
    pub title: LocalizedTitle,
    pub image: Option<PathBuf>,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StageConfig {
    pub card_width: f64,
    pub card_height: f64,
    pub card_gap: f64,
    pub padding: f64,
    pub indicators: usize,
    #[serde(rename = "resize_debounce_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub resize_debounce: Duration,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            card_width: 280.0,
            card_height: 320.0,
            card_gap: 24.0,
            padding: 24.0,
            indicators: 5,
            resize_debounce: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub carousel: Tuning,
    #[serde(default)]
    pub stage: StageConfig,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "vitrine", "vitrine")
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = project_dirs().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("VITRINE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

/// The bundled sample showcase.
pub fn default_config() -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    let loaded = match get_config_path() {
        Ok(path) if !path.exists() => {
            log::info!("No config at {}, using the bundled showcase", path.display());
            default_config()
        }
        _ => load_config(),
    };

    loaded.unwrap_or_else(|e| {
        log::error!("Failed to load config, using the bundled showcase: {}", e);
        default_config().unwrap_or_default()
    })
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

fn is_config_change(event: &Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Watches the config directory and emits [`AppEvent::ConfigReload`] whenever
/// the config file changes.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                if is_config_change(&event, &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind};

    #[test]
    fn test_bundled_config_parses() {
        let config = default_config().unwrap();

        assert_eq!(config.items.len(), 6);
        assert_eq!(config.carousel, Tuning::default());
        assert_eq!(config.stage, StageConfig::default());
        assert_eq!(
            config.items[0].title.get(Language::En).map(|t| t.as_str()),
            Some("Retail chatbot")
        );
    }

    #[test]
    fn test_item_deserialization() {
        let json = r#"{
            "title": { "en": "Clinic" },
            "image": "/tmp/clinic.png"
        }"#;
        let item: ItemConfig = serde_json::from_str(json).unwrap();

        assert_eq!(item.image, Some(PathBuf::from("/tmp/clinic.png")));
        // missing translation falls back to the other language
        assert_eq!(
            item.title.get(Language::Ar),
            Some(&CardTitle::new("Clinic"))
        );
    }

    #[test]
    fn test_blank_title_falls_back() {
        let title = LocalizedTitle {
            en: Some(CardTitle::new("  ")),
            ar: Some(CardTitle::new("مرحبا")),
        };
        assert_eq!(title.get(Language::En), Some(&CardTitle::new("مرحبا")));
        assert_eq!(LocalizedTitle::default().get(Language::En), None);
    }

    #[test]
    fn test_stage_durations_in_millis() {
        let stage: StageConfig =
            serde_json::from_str(r#"{ "resize_debounce_ms": 100, "indicators": 3 }"#).unwrap();
        assert_eq!(stage.resize_debounce, Duration::from_millis(100));
        assert_eq!(stage.indicators, 3);
        assert_eq!(stage.card_width, 280.0);
    }

    #[test]
    fn test_config_change_filter() {
        let path = PathBuf::from("/cfg/vitrine/config.toml");
        let create = Event::new(EventKind::Create(CreateKind::File)).add_path(path.clone());
        let other = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/cfg/vitrine/other.toml"));
        let access = Event::new(EventKind::Access(AccessKind::Any)).add_path(path.clone());

        assert!(is_config_change(&create, &path));
        assert!(!is_config_change(&other, &path));
        assert!(!is_config_change(&access, &path));
    }
}
