use std::{fs, path::{Path, PathBuf}, time::Duration};

use serde::Deserialize;
use tracing::debug;

use crate::{error::AppError, lookup::GithubLookupConfig, storage::get_default_storage_path, validation::validate_config};

/// Config file in the user's config directory
const CONFIG_FILE: &str = "config.toml";
/// Environment variable overriding `api_base_url`
pub const API_URL_ENV: &str = "GHFAVES_API_URL";

/// Settings read from `config.toml`, every field optional
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// GitHub REST API root
    pub api_base_url: String,
    /// `User-Agent` header for API requests
    pub user_agent: String,
    /// Lookup request timeout in seconds
    pub timeout_secs: u64,
    /// Storage file, platform data directory when unset
    pub storage_path: Option<PathBuf>,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let lookup = GithubLookupConfig::default();
        Config {
            api_base_url: lookup.base_url,
            user_agent: lookup.user_agent,
            timeout_secs: lookup.timeout.as_secs(),
            storage_path: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads config from `path`, or from the default location when `None`
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        Config::load_with_override(path, std::env::var(API_URL_ENV).ok())
    }

    /// Loads config, replacing `api_base_url` with `api_url` when given
    fn load_with_override(path: Option<&Path>, api_url: Option<String>) -> Result<Self, AppError> {
        let config_path: PathBuf = match path {
            Some(path) => path.to_path_buf(),
            None => match get_default_config_path() {
                Some(path) => path,
                None => return Config::default().finish(api_url),
            },
        };

        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Config::default().finish(api_url);
        }

        let contents: String = fs::read_to_string(&config_path)?;
        Config::parse(&contents)?.finish(api_url)
    }

    /// Parses TOML contents without applying overrides
    pub fn parse(contents: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies environment overrides and validates
    fn finish(mut self, api_url: Option<String>) -> Result<Self, AppError> {
        if let Some(url) = api_url {
            self.api_base_url = url;
        }
        validate_config(&self)?;
        Ok(self)
    }

    /// Storage file location, configured or default
    pub fn storage_path(&self) -> Result<PathBuf, AppError> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => get_default_storage_path(),
        }
    }

    pub fn lookup_config(&self) -> GithubLookupConfig {
        GithubLookupConfig {
            base_url: self.api_base_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Gets the path to the config file in the platform config directory
pub fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ghfaves").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::parse("timeout_secs = 5\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.storage_path, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(Config::parse("colour = true"), Err(AppError::Toml(_))));
    }

    #[test]
    fn lookup_config_carries_settings() {
        let config = Config::parse("api_base_url = \"http://localhost:3000\"\ntimeout_secs = 7").unwrap();
        let lookup = config.lookup_config();
        assert_eq!(lookup.base_url, "http://localhost:3000");
        assert_eq!(lookup.timeout, Duration::from_secs(7));
    }

    #[test]
    fn configured_storage_path_wins() {
        let config = Config::parse("storage_path = \"/tmp/faves.json\"").unwrap();
        assert_eq!(config.storage_path().unwrap(), PathBuf::from("/tmp/faves.json"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_with_override(Some(dir.path().join("absent.toml").as_path()), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn api_url_override_replaces_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base_url = \"https://ghe.example.com/api/v3\"\n").unwrap();

        let config = Config::load_with_override(Some(path.as_path()), Some("http://localhost:8080".to_string())).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");

        let config = Config::load_with_override(Some(path.as_path()), None).unwrap();
        assert_eq!(config.api_base_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn invalid_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_with_override(Some(dir.path().join("absent.toml").as_path()), Some("not a url".to_string()));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
