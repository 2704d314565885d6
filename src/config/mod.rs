//! Configuration management for Tartil.
//!
//! Configuration is read from `~/.config/tartil/config.toml` at startup
//! unless `--config` names another file. If the default file doesn't exist,
//! a default configuration with comments is created.
//!
//! `QURAN_API_BASE_URL`, when set, overrides `api.base_url`.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::client::{DEFAULT_BASE_URL, DEFAULT_TAFSIR_ID};
use crate::fetcher::parallel::DEFAULT_WORKERS;

pub const BASE_URL_ENV: &str = "QURAN_API_BASE_URL";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub reading: ReadingConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Upstream API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            user_agent: concat!("tartil/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Defaults for what is read and how it is shown.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    /// Translation resource shown under each verse (default: 131)
    pub translation_id: u32,
    /// Language code for word glosses (default: "en")
    pub word_language: String,
    pub per_page: u32,
    pub tafsir_id: u32,
    pub tajweed: bool,
    pub show_by_words: bool,
    /// Concurrent page requests when reading a whole address (default: 4)
    pub workers: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            translation_id: 131,
            word_language: "en".to_string(),
            per_page: 20,
            tafsir_id: DEFAULT_TAFSIR_ID,
            tajweed: true,
            show_by_words: false,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default().with_env_overrides());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config.with_env_overrides())
    }

    /// `--config` wins over the default location.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Get the default config file path: `~/.config/tartil/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tartil").join("config.toml"))
    }

    fn with_env_overrides(self) -> Self {
        self.with_base_url_override(std::env::var(BASE_URL_ENV).ok())
    }

    /// Replace `api.base_url` when an override is present and non-blank.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("{} overrides api.base_url with {}", BASE_URL_ENV, url);
            self.api.base_url = url.trim().to_string();
        }
        self
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Tartil Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[api]
# Set QURAN_API_BASE_URL to override this without editing the file
base_url = "https://api.quran.com/api/v4"

# Request timeout in seconds
timeout_secs = 10

[reading]
# Translation resource id (see `tartil translations`)
translation_id = 131

# Language for word-by-word glosses
word_language = "en"

per_page = 20
tafsir_id = 169

# Colour tajweed rules in the reader
tajweed = true

# Show word-by-word glosses under each verse
show_by_words = false

# Concurrent page requests for `read --all`
workers = 4

[colors]
# Border colors
active_border = "Cyan"
inactive_border = "DarkGray"

# Selection highlight
selection_bg_active = "Cyan"
selection_fg_active = "Black"
selection_bg_inactive = "DarkGray"
selection_fg_inactive = "White"

# Verse pane
arabic_text = "White"
verse_key = "Yellow"
translation_text = "Gray"
word_gloss = "DarkGray"

# Tajweed categories
tajweed_ghunnah = "#FF7E1E"
tajweed_iqlab = "#26BFFD"
tajweed_madd = "#D500B7"
tajweed_qalqalah = "#DD0008"
tajweed_ham_wasl = "#AAAAAA"
tajweed_silent = "#AAAAAA"

# Status bar
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
# Navigation
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
next_pane = ["Tab"]
prev_pane = ["BackTab", "Shift+Tab"]
next_mode = ["]", "Right"]
prev_mode = ["[", "Left"]

# Actions
select = ["Enter"]
filter = ["/"]
toggle_tajweed = ["t"]
toggle_words = ["w"]
open_in_browser = ["o"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
