//! Persisted settings and the tuning knobs of the answer selector.
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::clicker::{DEFAULT_CLICK_OFFSET_X, DEFAULT_DUPLICATE_RADIUS, DEFAULT_JITTER};
use crate::matcher::DEFAULT_ACCEPTANCE_SCORE;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Settings file contents. Missing keys take their defaults, unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub auto_select_enabled: bool,
    pub debug_mode: bool,
    /// Tesseract language list, `+` separated.
    pub ocr_lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    pub click_offset_x: i32,
    pub duplicate_radius: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_select_enabled: false,
            debug_mode: false,
            ocr_lang: "eng+ita".to_string(),
            log_file: None,
            click_offset_x: DEFAULT_CLICK_OFFSET_X,
            duplicate_radius: DEFAULT_DUPLICATE_RADIUS,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Receives the enabled flag whenever the selector's switch is flipped.
pub trait EnabledSink: Send + Sync {
    fn store_enabled(&self, enabled: bool) -> Result<(), SettingsError>;
}

/// Sink for selectors whose switch is not persisted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPersistence;

impl EnabledSink for NoPersistence {
    fn store_enabled(&self, _enabled: bool) -> Result<(), SettingsError> {
        Ok(())
    }
}

/// JSON settings file on disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the settings, writing defaults when the file is missing or unreadable as JSON.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            info!("No settings at {}, writing defaults", self.path.display());
            let settings = Settings::default();
            self.save(&settings)?;
            return Ok(settings);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|source| SettingsError::Read {
            path: self.path.clone(),
            source,
        })?;

        match serde_json::from_str::<Settings>(&contents) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!(
                    "Error decoding {}: {}. Using default configuration.",
                    self.path.display(),
                    e
                );
                let settings = Settings::default();
                self.save(&settings)?;
                Ok(settings)
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, json).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl EnabledSink for SettingsStore {
    fn store_enabled(&self, enabled: bool) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        settings.auto_select_enabled = enabled;
        self.save(&settings)
    }
}

/// Closed range of seconds a randomized pause is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl DelayRange {
    pub const fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        let min = self.min_secs.max(0.0);
        let secs = if self.max_secs > min {
            rng.gen_range(min..=self.max_secs)
        } else {
            min
        };
        Duration::from_secs_f64(secs)
    }
}

/// Randomized pacing of the click sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    /// How long the cursor takes to glide to a target.
    pub move_duration: DelayRange,
    /// Settle time between arriving and clicking.
    pub before_click: DelayRange,
    /// Pause between consecutive answers.
    pub between_answers: DelayRange,
}

impl Pacing {
    /// No waiting at all; for dry runs and tests.
    pub const fn none() -> Self {
        Self {
            move_duration: DelayRange::zero(),
            before_click: DelayRange::zero(),
            between_answers: DelayRange::zero(),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            move_duration: DelayRange::new(0.2, 0.4),
            before_click: DelayRange::new(0.1, 0.2),
            between_answers: DelayRange::new(0.3, 0.6),
        }
    }
}

/// Runtime configuration handed to [`crate::AutoSelector`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    pub enabled: bool,
    pub click_offset_x: i32,
    pub duplicate_radius: i32,
    pub jitter: u16,
    /// A match must score strictly above this to be clicked.
    pub acceptance_score: f64,
    pub pacing: Pacing,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            click_offset_x: DEFAULT_CLICK_OFFSET_X,
            duplicate_radius: DEFAULT_DUPLICATE_RADIUS,
            jitter: DEFAULT_JITTER,
            acceptance_score: DEFAULT_ACCEPTANCE_SCORE,
            pacing: Pacing::default(),
        }
    }
}

impl From<&Settings> for SelectorConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            enabled: settings.auto_select_enabled,
            click_offset_x: settings.click_offset_x,
            duplicate_radius: settings.duplicate_radius,
            ..Self::default()
        }
    }
}
