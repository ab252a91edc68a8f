use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use saunter_core::shared::constants::{
    DEFAULT_LANGUAGE, DEFAULT_MIN_REQUEST_INTERVAL, DEFAULT_TIMEOUT, NER_MODEL, NER_SERVICE_URL,
    NOMINATIM_URL, RECONCILE_WINDOW_SECS, USER_AGENT,
};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub transcripts_dir: PathBuf,
    pub geocoder_url: String,
    pub user_agent: String,
    pub ner_url: String,
    pub ner_model: String,
    pub language: String,
    pub timeout_secs: u64,
    pub min_interval_ms: u64,
    pub window_secs: f64,
    pub memoize: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transcripts_dir: PathBuf::from("transcripts"),
            geocoder_url: NOMINATIM_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            ner_url: NER_SERVICE_URL.to_string(),
            ner_model: NER_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            min_interval_ms: DEFAULT_MIN_REQUEST_INTERVAL.as_millis() as u64,
            window_secs: RECONCILE_WINDOW_SECS,
            memoize: false,
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Saunter").join("settings.json"))
    }

    /// Loads settings from `explicit`, or from the default location.
    ///
    /// A missing file at the default location yields defaults; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        match explicit {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) => match Self::read(&path) {
                    Err(SettingsError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                        Ok(Self::default())
                    }
                    other => other,
                },
                None => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::debug!("Loaded settings from {}", path.display());
        serde_json::from_str(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "Timeout must be at least 1 second".to_string(),
            ));
        }
        if !self.window_secs.is_finite() || self.window_secs < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "Reconciliation window must be a non-negative number of seconds, got {}",
                self.window_secs
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "User agent must not be empty".to_string(),
            ));
        }
        if self.language.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "Language must not be empty".to_string(),
            ));
        }
        for (name, url) in [("Geocoder", &self.geocoder_url), ("NER", &self.ner_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SettingsError::Invalid(format!(
                    "{name} URL must start with http:// or https://, got '{url}'"
                )));
            }
        }
        Ok(())
    }
}
