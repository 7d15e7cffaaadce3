//! Console configuration: an optional RON file plus environment overrides.
//!
//! The service address is the only setting the console cannot work without.
//! When it is missing the console still starts, with every network action
//! disabled.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use console_logging::{LogDestination, DEFAULT_LOG_FILE};
use dashboard_engine::ServiceSettings;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const CONFIG_FILENAME: &str = "dashboard.ron";
pub const CONFIG_PATH_VAR: &str = "DASHBOARD_CONFIG";
pub const API_URL_VAR: &str = "DASHBOARD_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid service address {value:?}: {message}")]
    InvalidUrl { value: String, message: String },
    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),
}

/// On-disk shape of `dashboard.ron`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub auto_refresh_secs: Option<u64>,
    pub log_to_file: bool,
    /// Also log to the terminal. Lines then interleave with the rendered console.
    pub log_to_terminal: bool,
    pub log_level: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            auto_refresh_secs: None,
            log_to_file: true,
            log_to_terminal: false,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub service_url: Option<Url>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub auto_refresh: Option<Duration>,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl ConsoleConfig {
    /// Reads the config file named by `DASHBOARD_CONFIG` (or `./dashboard.ron`)
    /// and applies `DASHBOARD_API_URL` on top.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
        let file = read_file_config(&path)?;
        Self::resolve(file, env::var(API_URL_VAR).ok())
    }

    /// Combines file settings with an environment override for the service address.
    pub fn resolve(
        file: FileConfig,
        api_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let raw_url = api_url_override
            .filter(|value| !value.trim().is_empty())
            .or(file.api_url)
            .filter(|value| !value.trim().is_empty());
        let service_url = raw_url.as_deref().map(parse_service_url).transpose()?;

        let log_level = LevelFilter::from_str(file.log_level.trim())
            .map_err(|_| ConfigError::InvalidLogLevel(file.log_level.clone()))?;
        let log_path = PathBuf::from(DEFAULT_LOG_FILE);
        let log_destination = match (file.log_to_file, file.log_to_terminal) {
            (true, true) => LogDestination::Both(log_path),
            (true, false) => LogDestination::File(log_path),
            (false, _) => LogDestination::Terminal,
        };

        Ok(Self {
            service_url,
            connect_timeout: Duration::from_secs(file.connect_timeout_secs),
            request_timeout: Duration::from_secs(file.request_timeout_secs),
            auto_refresh: file
                .auto_refresh_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            log_destination,
            log_level,
        })
    }

    /// Engine settings, or `None` when no service address is configured.
    pub fn service_settings(&self) -> Option<ServiceSettings> {
        self.service_url.as_ref().map(|url| ServiceSettings {
            base_url: url.as_str().to_string(),
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
        })
    }
}

pub fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn parse_service_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let invalid = |message: String| ConfigError::InvalidUrl {
        value: trimmed.to_string(),
        message,
    };
    let url = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("expected an address like https://host[:port]".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = read_file_config(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn reads_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(api_url: Some("https://api.example.com"), auto_refresh_secs: Some(60))"#,
        )
        .unwrap();

        let config = read_file_config(&path).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.auto_refresh_secs, Some(60));
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.log_to_file);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(api_url: ").unwrap();

        let err = read_file_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn environment_overrides_file_address() {
        let file = FileConfig {
            api_url: Some("https://file.example.com".to_string()),
            ..FileConfig::default()
        };
        let config =
            ConsoleConfig::resolve(file, Some("https://env.example.com/".to_string())).unwrap();
        assert_eq!(
            config.service_url.map(String::from),
            Some("https://env.example.com/".to_string())
        );
    }

    #[test]
    fn empty_values_mean_unconfigured() {
        let file = FileConfig {
            api_url: Some("  ".to_string()),
            ..FileConfig::default()
        };
        let config = ConsoleConfig::resolve(file, Some(String::new())).unwrap();
        assert_eq!(config.service_url, None);
        assert!(config.service_settings().is_none());
    }

    #[test]
    fn empty_override_falls_back_to_file() {
        let file = FileConfig {
            api_url: Some("https://file.example.com".to_string()),
            ..FileConfig::default()
        };
        let config = ConsoleConfig::resolve(file, Some(" ".to_string())).unwrap();
        assert!(config.service_url.is_some());
    }

    #[test]
    fn invalid_address_is_rejected() {
        for value in ["not a url", "mailto:ops@example.com"] {
            let err = ConsoleConfig::resolve(FileConfig::default(), Some(value.to_string()))
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidUrl { .. }), "{value}");
        }
    }

    #[test]
    fn settings_carry_timeouts() {
        let file = FileConfig {
            api_url: Some("http://localhost:8080".to_string()),
            connect_timeout_secs: 2,
            request_timeout_secs: 7,
            auto_refresh_secs: Some(0),
            log_to_file: false,
            log_to_terminal: false,
            log_level: "debug".to_string(),
        };
        let config = ConsoleConfig::resolve(file, None).unwrap();
        let settings = config.service_settings().unwrap();

        assert_eq!(settings.base_url, "http://localhost:8080/");
        assert_eq!(settings.connect_timeout, Duration::from_secs(2));
        assert_eq!(settings.request_timeout, Duration::from_secs(7));
        assert_eq!(config.auto_refresh, None);
        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn log_destination_follows_switches() {
        let destination = |log_to_file: bool, log_to_terminal: bool| {
            let file = FileConfig {
                log_to_file,
                log_to_terminal,
                ..FileConfig::default()
            };
            ConsoleConfig::resolve(file, None).unwrap().log_destination
        };
        let log_path = PathBuf::from(DEFAULT_LOG_FILE);

        assert_eq!(destination(true, false), LogDestination::File(log_path.clone()));
        assert_eq!(destination(true, true), LogDestination::Both(log_path));
        assert_eq!(destination(false, true), LogDestination::Terminal);
        assert_eq!(destination(false, false), LogDestination::Terminal);
    }

    #[test]
    fn reads_both_log_switches_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(log_to_file: true, log_to_terminal: true)").unwrap();

        let config = ConsoleConfig::resolve(read_file_config(&path).unwrap(), None).unwrap();
        assert!(matches!(config.log_destination, LogDestination::Both(_)));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let file = FileConfig {
            log_level: "loud".to_string(),
            ..FileConfig::default()
        };
        assert!(matches!(
            ConsoleConfig::resolve(file, None),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
