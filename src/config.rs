//! Application configuration.
//!
//! Defaults are compiled in. A `config.json` under the user's config directory
//! may override any subset of the fields.

use std::path::{Path, PathBuf};

use serde::Deserialize;

const APP_DIR: &str = "glscaffold";
const CONFIG_FILE: &str = "config.json";

/// Window and GL context settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
    /// Multisample count, 0 disables multisampling.
    pub samples: u8,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL Example".to_string(),
            width: 640,
            height: 480,
            gl_major: 4,
            gl_minor: 1,
            samples: 4,
        }
    }
}

/// Top level configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Location of the override file, if the platform has a config directory.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads the configuration, falling back to defaults.
    ///
    /// Returns the config together with a warning to report once logging is up,
    /// since the log level itself comes from here.
    pub fn load() -> (Self, Option<String>) {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => (Self::default(), None),
        }
    }

    pub fn load_from(path: &Path) -> (Self, Option<String>) {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (Self::default(), None),
            Err(e) => {
                return (
                    Self::default(),
                    Some(format!("failed to read {}: {e}", path.display())),
                );
            }
        };

        match Self::parse(&text) {
            Ok(config) => (config, None),
            Err(e) => (
                Self::default(),
                Some(format!("ignoring malformed {}: {e}", path.display())),
            ),
        }
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The configured log level, `info` if the string is not a level name.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
