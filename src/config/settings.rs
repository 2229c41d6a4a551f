//! Persistent settings
//!
//! Stored as JSON at `<config dir>/audio-prep/settings.json`. A missing or
//! unreadable default file means defaults; an explicit file must load.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::conversion::{AudioTransformer, Backend, Resampler, DEFAULT_TARGET_SAMPLE_RATE};
use crate::error::{PrepError, Result};

const APP_DIR: &str = "audio-prep";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Anchor directory for the in-place staging directory
    #[serde(default = "default_main_path")]
    pub main_path: PathBuf,
    /// Sample rate used when a command does not give one
    #[serde(default = "default_target_sample_rate")]
    pub target_sample_rate: u32,
    /// External conversion program
    #[serde(default)]
    pub backend: Backend,
    /// Explicit path to the backend binary
    #[serde(default)]
    pub tool_path: Option<PathBuf>,
}

fn default_main_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn default_target_sample_rate() -> u32 {
    DEFAULT_TARGET_SAMPLE_RATE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            main_path: default_main_path(),
            target_sample_rate: DEFAULT_TARGET_SAMPLE_RATE,
            backend: Backend::default(),
            tool_path: None,
        }
    }
}

impl Settings {
    const SETTINGS_FILE: &'static str = "settings.json";

    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(Self::SETTINGS_FILE))
    }

    /// Load settings from the default location, or return defaults
    ///
    /// A missing file is normal; an unreadable one is reported and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::debug!("Could not determine config directory, using default settings");
            return Self::default();
        };

        if !path.exists() {
            log::debug!("No settings at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file, failing if it is missing or invalid
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        log::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::debug!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_sample_rate == 0 {
            return Err(PrepError::Config(
                "target_sample_rate must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a resampler for the configured backend and anchor path
    pub fn resampler(&self) -> Resampler<Box<dyn AudioTransformer>> {
        Resampler::new(
            self.backend.transformer(self.tool_path.as_deref()),
            self.main_path.clone(),
        )
    }
}
