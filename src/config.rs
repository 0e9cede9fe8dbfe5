use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calendar::ViewMode;
use crate::error::{CalendarError, Result};

const APP_DIR: &str = "event-planner";

/// Application configuration, read from `config.toml` in the user's config
/// directory. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// View shown on startup
    pub default_view: ViewMode,

    /// How often the notification task scans the events (in milliseconds)
    pub tick_interval_ms: u64,

    /// TOML file with `[[events]]` tables loaded into the store on startup
    pub events_file: Option<PathBuf>,

    /// Where log lines go instead of the terminal
    pub log_file: Option<PathBuf>,

    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_view: ViewMode::Month,
            tick_interval_ms: 1000,
            events_file: None,
            log_file: None,
            theme: ThemeConfig::default(),
        }
    }
}

/// Colour overrides on top of a named preset. Colours are `#rrggbb` or a
/// terminal colour name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub highlight_bg: Option<String>,
    pub holiday_fg: Option<String>,
}

impl Config {
    /// Loads the config from the default location, falling back to defaults
    /// when there is no file.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|source| CalendarError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(CalendarError::Config {
                message: "tick_interval_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// The configured seed file, or `events.toml` next to the config file
    /// when that exists.
    pub fn events_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.events_file {
            return Some(path.clone());
        }
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join("events.toml"))
            .filter(|p| p.exists())
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::cache_dir().map(|d| d.join(APP_DIR).join("event-planner.log")))
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(Config::load_from(file.path()).unwrap(), Config::default());
    }

    #[test]
    fn reads_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"
default_view = "week"
tick_interval_ms = 500
events_file = "/tmp/events.toml"

[theme]
preset = "nord"
holiday_fg = "#ff0000"
"##
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.default_view, ViewMode::Week);
        assert_eq!(config.tick_interval(), Duration::from_millis(500));
        assert_eq!(config.events_path(), Some(PathBuf::from("/tmp/events.toml")));
        assert_eq!(config.theme.preset.as_deref(), Some("nord"));
        assert_eq!(config.theme.holiday_fg.as_deref(), Some("#ff0000"));
        assert_eq!(config.theme.today_bg, None);
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "tick_interval_ms = 0").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(CalendarError::Config { .. })
        ));
    }

    #[test]
    fn unknown_view_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "default_view = \"day\"").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(CalendarError::Parse { .. })
        ));
    }
}
