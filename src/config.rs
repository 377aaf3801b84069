//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\listen-fetch\config.toml
//! - macOS: ~/Library/Application Support/listen-fetch/config.toml
//! - Linux: ~/.config/listen-fetch/config.toml
//!
//! Every value can be overridden from the command line. The merged result
//! is a [`Settings`] value that the rest of the program consumes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Download and throttling settings
    pub download: DownloadConfig,

    /// Candidate matching settings
    pub matching: MatchingConfig,
}

/// Download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Directory downloaded audio is written to
    pub output_dir: PathBuf,

    /// Audio format passed to yt-dlp (also the output file extension)
    pub audio_format: String,

    /// Minimum wait between downloads, in seconds
    pub min_wait_secs: u64,

    /// Maximum wait between downloads, in seconds
    pub max_wait_secs: u64,

    /// Pass a cookie file to yt-dlp
    pub use_cookies: bool,

    /// Cookie file used when `use_cookies` is set
    pub cookie_file: PathBuf,

    /// Write the aggregated history next to the downloads
    pub save_history: bool,

    /// File name of the saved aggregated history
    pub history_file_name: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
            audio_format: "mp3".to_string(),
            min_wait_secs: 2,
            max_wait_secs: 6,
            use_cookies: false,
            cookie_file: PathBuf::from("cookies.txt"),
            save_history: false,
            history_file_name: "processed_history.json".to_string(),
        }
    }
}

/// Matching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Candidates longer than this are rejected
    pub max_duration_secs: u32,

    /// Candidates whose title or artists contain any of these are rejected
    pub blacklist: Vec<String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: 600,
            blacklist: Vec::new(),
        }
    }
}

/// Command-line overrides. `None` keeps the config file's value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub audio_format: Option<String>,
    pub max_duration_secs: Option<u32>,
    pub blacklist: Option<String>,
    pub min_wait_secs: Option<u64>,
    pub max_wait_secs: Option<u64>,
    pub use_cookies: bool,
    pub save_history: bool,
    pub limit: Option<usize>,
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub audio_format: String,
    pub max_duration_secs: u32,
    pub blacklist: Vec<String>,
    pub min_wait_secs: u64,
    pub max_wait_secs: u64,
    pub cookie_file: Option<PathBuf>,
    pub save_history: bool,
    pub history_file_name: String,
    pub limit: Option<usize>,
}

impl Settings {
    /// Merge command-line overrides on top of a loaded config.
    pub fn resolve(config: Config, overrides: Overrides) -> Result<Self> {
        let Config { download, matching } = config;

        let blacklist = match overrides.blacklist {
            Some(raw) => parse_blacklist(&raw),
            None => matching
                .blacklist
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        };

        let min_wait_secs = overrides.min_wait_secs.unwrap_or(download.min_wait_secs);
        let max_wait_secs = overrides.max_wait_secs.unwrap_or(download.max_wait_secs);
        if min_wait_secs > max_wait_secs {
            return Err(Error::config(format!(
                "minimum wait ({}s) exceeds maximum wait ({}s)",
                min_wait_secs, max_wait_secs
            )));
        }

        let audio_format = overrides
            .audio_format
            .unwrap_or(download.audio_format)
            .trim()
            .trim_start_matches('.')
            .to_lowercase();
        if audio_format.is_empty() {
            return Err(Error::config("audio format must not be empty"));
        }

        let use_cookies = overrides.use_cookies || download.use_cookies;

        Ok(Self {
            output_dir: overrides.output_dir.unwrap_or(download.output_dir),
            audio_format,
            max_duration_secs: overrides
                .max_duration_secs
                .unwrap_or(matching.max_duration_secs),
            blacklist,
            min_wait_secs,
            max_wait_secs,
            cookie_file: use_cookies.then_some(download.cookie_file),
            save_history: overrides.save_history || download.save_history,
            history_file_name: download.history_file_name,
            limit: overrides.limit,
        })
    }

    /// Where the aggregated history is written when saving is enabled
    pub fn history_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.history_file_name)
    }
}

/// Split a comma-separated keyword list, dropping empty entries
pub fn parse_blacklist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("listen-fetch"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from an explicit path
///
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[download]"));
        assert!(toml.contains("[matching]"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[matching]
blacklist = ["karaoke", "8d audio"]
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.matching.blacklist, vec!["karaoke", "8d audio"]);
        assert_eq!(config.matching.max_duration_secs, 600);
        assert_eq!(config.download.audio_format, "mp3");
        assert_eq!(config.download.output_dir, PathBuf::from("downloads"));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = Overrides {
            output_dir: Some(PathBuf::from("/music")),
            audio_format: Some(".OPUS".to_string()),
            max_duration_secs: Some(420),
            blacklist: Some("live, remix,,".to_string()),
            min_wait_secs: Some(0),
            max_wait_secs: Some(1),
            ..Default::default()
        };
        let settings = Settings::resolve(Config::default(), overrides).unwrap();

        assert_eq!(settings.output_dir, PathBuf::from("/music"));
        assert_eq!(settings.audio_format, "opus");
        assert_eq!(settings.max_duration_secs, 420);
        assert_eq!(settings.blacklist, vec!["live", "remix"]);
        assert_eq!((settings.min_wait_secs, settings.max_wait_secs), (0, 1));
        assert!(settings.cookie_file.is_none());
    }

    #[test]
    fn test_cookie_flag_uses_configured_file() {
        let mut config = Config::default();
        config.download.cookie_file = PathBuf::from("/secrets/yt.txt");
        let overrides = Overrides {
            use_cookies: true,
            ..Default::default()
        };
        let settings = Settings::resolve(config, overrides).unwrap();
        assert_eq!(settings.cookie_file, Some(PathBuf::from("/secrets/yt.txt")));
    }

    #[test]
    fn test_inverted_wait_range_is_rejected() {
        let overrides = Overrides {
            min_wait_secs: Some(10),
            max_wait_secs: Some(3),
            ..Default::default()
        };
        let result = Settings::resolve(Config::default(), overrides);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_history_output_path() {
        let settings = Settings::resolve(Config::default(), Overrides::default()).unwrap();
        assert_eq!(
            settings.history_output_path(),
            PathBuf::from("downloads").join("processed_history.json")
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("absent.toml"));
        assert_eq!(config.download.min_wait_secs, 2);
    }

    #[test]
    fn test_unparsable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[download\nbroken").unwrap();
        let config = load_from(&path);
        assert_eq!(config.download.max_wait_secs, 6);
    }
}
