use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::{path::Path, time::Duration};

use crate::omdb::ApiKey;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error(
        "omdb_api_key is not set; add it to the config file or export {}_OMDB_API_KEY",
        AppConfig::ENV_PREFIX
    )]
    MissingApiKey,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    host: String,
    port: u16,
    omdb_api_key: Option<String>,
    omdb_base_url: String,
    omdb_timeout_secs: u64,
}

/// Process-wide settings, loaded once at startup and never mutated
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_key: ApiKey,
    pub omdb_base_url: String,
    pub omdb_timeout: Duration,
}

impl AppConfig {
    pub const DEFAULT_FILE: &'static str = "omdb-proxy.toml";
    pub const ENV_PREFIX: &'static str = "OMDB_PROXY";

    /// Load defaults, then the TOML file, then `OMDB_PROXY_*` variables.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::new(&path.to_string_lossy(), FileFormat::Toml).required(true),
            None => File::new(Self::DEFAULT_FILE, FileFormat::Toml).required(false),
        };

        let raw: RawConfig = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 50051)?
            .set_default("omdb_base_url", "https://www.omdbapi.com/")?
            .set_default("omdb_timeout_secs", 10)?
            .add_source(file)
            .add_source(Environment::with_prefix(Self::ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        let api_key = raw
            .omdb_api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            host: raw.host,
            port: raw.port,
            api_key: ApiKey::new(api_key),
            omdb_base_url: raw.omdb_base_url,
            omdb_timeout: Duration::from_secs(raw.omdb_timeout_secs),
        })
    }

    /// `host:port` to listen on
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_applies_defaults() {
        let file = write_config(r#"omdb_api_key = "secret""#);
        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.api_key.expose(), "secret");
        assert_eq!(config.bind_addr(), "127.0.0.1:50051");
        assert_eq!(config.omdb_base_url, "https://www.omdbapi.com/");
        assert_eq!(config.omdb_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let file = write_config(
            r#"
            omdb_api_key = "secret"
            host = "0.0.0.0"
            port = 8080
            omdb_base_url = "http://localhost:9999/"
            omdb_timeout_secs = 3
            "#,
        );
        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.omdb_base_url, "http://localhost:9999/");
        assert_eq!(config.omdb_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let file = write_config(r#"port = 8080"#);
        assert!(matches!(
            AppConfig::load(Some(file.path())),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_blank_api_key_is_fatal() {
        let file = write_config(r#"omdb_api_key = "  ""#);
        assert!(matches!(
            AppConfig::load(Some(file.path())),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let file = write_config(r#"omdb_api_key = "hunter2""#);
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
