use crate::error::{DeckError, Result};
use crate::notify::DEFAULT_DELAY_SECS;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for flashdeck, stored in `<home>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckConfig {
    /// Seconds a notification stays visible
    #[serde(default = "default_notice_delay")]
    pub notice_delay_secs: i64,

    /// Theme used until the user picks one
    #[serde(default)]
    pub default_theme: Theme,
}

fn default_notice_delay() -> i64 {
    DEFAULT_DELAY_SECS
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            notice_delay_secs: DEFAULT_DELAY_SECS,
            default_theme: Theme::default(),
        }
    }
}

impl DeckConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DeckError::Io)?;
        let config: DeckConfig =
            serde_json::from_str(&content).map_err(DeckError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DeckError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DeckError::Serialization)?;
        fs::write(config_path, content).map_err(DeckError::Io)?;
        Ok(())
    }

    /// Notification delay, never below one second.
    pub fn notice_delay(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.notice_delay_secs.max(1))
    }
}
