//! Server and client configuration.
//!
//! Server settings come from a JSON file (by default in the platform config
//! directory), then environment variables, then command-line flags. A missing
//! file means defaults; a malformed one is fatal.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::words::WordSource;

const CONFIG_FILE: &str = "config.json";
const DEFAULT_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Default number of guesses per game.
pub const DEFAULT_MAX_GUESSES: u32 = 6;

/// Startup failures. None of these are recoverable once the server is running.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown word list '{0}'; choose word_list.txt, wordle_allowed_guesses.txt or wordle_answers_alphabetical.txt")]
    UnknownSource(String),

    #[error("incompatible word lists: guesses from {guess} with answers from {answer}; word_list.txt must be used for both, otherwise use wordle_allowed_guesses.txt with wordle_answers_alphabetical.txt")]
    IncompatibleSources {
        guess: WordSource,
        answer: WordSource,
    },

    #[error("answer list is empty")]
    EmptyAnswers,

    #[error("max_guesses must be positive")]
    InvalidMaxGuesses,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {name}: {value}")]
    Env { name: &'static str, value: String },

    #[error("could not determine {0} directory")]
    NoDirectory(&'static str),
}

/// Server-side game settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Source of valid guesses.
    pub word_list_guess: WordSource,
    /// Source of target words.
    pub word_list_ans: WordSource,
    pub max_guesses: u32,
    /// Directory holding the word-list files.
    pub data_dir: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word_list_guess: WordSource::AllowedGuesses,
            word_list_ans: WordSource::Answers,
            max_guesses: DEFAULT_MAX_GUESSES,
            data_dir: None,
        }
    }
}

impl GameConfig {
    /// Load from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => project_dirs()?.config_dir().join(CONFIG_FILE),
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Apply `WORDLE_DATA_DIR` and `WORDLE_MAX_GUESSES` if set.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(dir) = std::env::var("WORDLE_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(value) = std::env::var("WORDLE_MAX_GUESSES") {
            self.max_guesses = value.parse().map_err(|_| ConfigError::Env {
                name: "WORDLE_MAX_GUESSES",
                value,
            })?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_guesses == 0 {
            return Err(ConfigError::InvalidMaxGuesses);
        }
        crate::words::check_pairing(self.word_list_guess, self.word_list_ans)
    }

    /// The configured data directory, or `<platform data dir>/data`.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().join("data")),
        }
    }
}

/// Display-client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, including the `/api/v1` prefix.
    pub base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            poll_interval: Duration::from_millis(500),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL taken from `WORDLE_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("WORDLE_URL") {
            config.base_url = url;
        }
        config
    }
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "wordle-sessions").ok_or(ConfigError::NoDirectory("home"))
}
