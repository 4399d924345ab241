use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::model::Language;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub language: Language,

    /// Backend for books, sessions and results; offline when unset.
    #[serde(default)]
    pub api_url: Option<String>,
}

// Helper functions for default values
fn default_version() -> u32 {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            language: Language::default(),
            api_url: None,
        }
    }
}

impl Settings {
    /// Reads `settings.json` from the data directory, writing defaults on
    /// first run, then applies environment overrides. The message locale
    /// follows the resulting `language`.
    pub fn load() -> Self {
        let mut settings = Self::load_from(&Self::settings_path());
        settings.apply_env_overrides();
        settings.language.apply_locale();
        settings
    }

    pub fn load_from(path: &PathBuf) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    return settings;
                }
                Err(err) => warn!(target: "settings", "Ignoring unreadable settings: {}", err),
            }
        }
        let default = Settings::default();
        if let Err(err) = default.save_to(path) {
            warn!(target: "settings", "Could not write default settings: {}", err);
        }
        default
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<(), std::io::Error> {
        // Ensure the directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    /// `LITGAME_DATA_DIR`, else `$XDG_DATA_HOME/litgame`, else
    /// `~/.local/share/litgame`.
    pub fn data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("LITGAME_DATA_DIR") {
            return PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(dir).join("litgame");
        }
        match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".local/share/litgame"),
            Err(_) => PathBuf::from(".litgame"),
        }
    }

    fn settings_path() -> PathBuf {
        Self::data_dir().join("settings.json")
    }

    fn migrate(&mut self) {
        match self.version {
            0 | 1 => {
                // version 1 wrote an empty api_url for offline play
                if self.api_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
                    self.api_url = None;
                }
                self.version = 2;
            }
            _ => (),
        }
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("LITGAME_API_URL") {
            self.api_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Ok(code) = std::env::var("LITGAME_LANG") {
            match Language::from_code(&code) {
                Some(language) => self.language = language,
                None => warn!(target: "settings", "Unknown language {:?}", code),
            }
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}
