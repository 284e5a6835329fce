//! Configuration loading
//!
//! Resolves the gateway credentials once at startup. Each value is looked up in
//! the process environment, then in a `.env` file in the working directory, then
//! in an optional TOML file at `$S3P_CONFIG_DIR/config.toml` (or the platform
//! config directory, `~/.config/s3p/config.toml` on Linux).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use http::HeaderValue;
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the gateway API key
pub const API_KEY_VAR: &str = "S3_PROXY_API_KEY";

/// Environment variable holding the gateway base URL
pub const API_URL_VAR: &str = "API_URL";

/// Environment variable overriding the config directory
pub const CONFIG_DIR_VAR: &str = "S3P_CONFIG_DIR";

const DOTENV_FILE: &str = ".env";
const CONFIG_FILE: &str = "config.toml";

/// Gateway credentials, immutable for the run
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: HeaderValue,
    api_url: Url,
}

impl Credentials {
    /// Build credentials from a key and a base URL
    pub fn new(api_key: impl Into<String>, api_url: &str) -> Result<Self> {
        let api_key = api_key.into();
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(Error::MissingConfig(API_KEY_VAR));
        }
        let mut api_key = HeaderValue::from_str(api_key).map_err(|_| {
            Error::Config(format!("{API_KEY_VAR} is not a valid header value"))
        })?;
        api_key.set_sensitive(true);

        let api_url = Url::parse(api_url.trim())?;
        if api_url.cannot_be_a_base() || !matches!(api_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "{API_URL_VAR} must be an http(s) URL, got '{api_url}'"
            )));
        }

        Ok(Self { api_key, api_url })
    }

    /// The value sent in the `x-api-key` header
    pub fn api_key(&self) -> &HeaderValue {
        &self.api_key
    }

    /// Base URL of the API gateway
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

/// Contents of the optional `config.toml`
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_key: Option<String>,
    api_url: Option<String>,
}

impl FileConfig {
    fn get(&self, name: &str) -> Option<&str> {
        match name {
            API_KEY_VAR => self.api_key.as_deref(),
            API_URL_VAR => self.api_url.as_deref(),
            _ => None,
        }
    }
}

/// Resolves [`Credentials`] from the layered configuration sources
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    dotenv_path: PathBuf,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader using `./.env` and the default config file location
    pub fn new() -> Self {
        Self {
            dotenv_path: PathBuf::from(DOTENV_FILE),
            config_path: default_config_path(),
        }
    }

    /// Loader with explicit file locations (useful for testing)
    pub fn with_paths(dotenv_path: impl Into<PathBuf>, config_path: Option<PathBuf>) -> Self {
        Self {
            dotenv_path: dotenv_path.into(),
            config_path,
        }
    }

    /// Resolve credentials, reading the process environment first
    pub fn load(&self) -> Result<Credentials> {
        self.load_with(|name| std::env::var(name).ok())
    }

    /// Resolve credentials with a custom environment lookup
    pub fn load_with<F>(&self, env: F) -> Result<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dotenv = read_dotenv(&self.dotenv_path)?;
        let file = match &self.config_path {
            Some(path) => read_config_file(path)?,
            None => FileConfig::default(),
        };

        let lookup = |name: &'static str| -> Result<String> {
            env(name)
                .into_iter()
                .chain(dotenv.get(name).cloned())
                .chain(file.get(name).map(str::to_string))
                .find(|value| !value.trim().is_empty())
                .ok_or(Error::MissingConfig(name))
        };

        let api_key = lookup(API_KEY_VAR)?;
        let api_url = lookup(API_URL_VAR)?;

        let credentials = Credentials::new(api_key, &api_url)?;
        tracing::debug!(api_url = %credentials.api_url(), "resolved gateway configuration");
        Ok(credentials)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn default_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_VAR) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    dirs::config_dir().map(|dir| dir.join("s3p").join(CONFIG_FILE))
}

fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }

    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| Error::Config(format!("Error loading {}: {e}", path.display())))?;

    entries
        .map(|entry| {
            entry.map_err(|e| Error::Config(format!("Error loading {}: {e}", path.display())))
        })
        .collect()
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    if !path.is_file() {
        return Ok(FileConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn temp_loader() -> (ConfigLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_paths(
            temp_dir.path().join(".env"),
            Some(temp_dir.path().join("config.toml")),
        );
        (loader, temp_dir)
    }

    #[test]
    fn test_load_from_env() {
        let (loader, _temp_dir) = temp_loader();
        let creds = loader
            .load_with(env_from(&[
                (API_KEY_VAR, "secret"),
                (API_URL_VAR, "https://gw.example.com/prod"),
            ]))
            .unwrap();

        assert_eq!(creds.api_key(), "secret");
        assert_eq!(creds.api_url().as_str(), "https://gw.example.com/prod");
    }

    #[test]
    fn test_missing_api_key() {
        let (loader, _temp_dir) = temp_loader();
        let err = loader
            .load_with(env_from(&[(API_URL_VAR, "https://gw.example.com")]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingConfig(API_KEY_VAR)));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let (loader, _temp_dir) = temp_loader();
        let err = loader
            .load_with(env_from(&[(API_KEY_VAR, "secret"), (API_URL_VAR, "  ")]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingConfig(API_URL_VAR)));
    }

    #[test]
    fn test_dotenv_fills_gaps() {
        let (loader, temp_dir) = temp_loader();
        std::fs::write(
            temp_dir.path().join(".env"),
            "S3_PROXY_API_KEY=from-dotenv\nAPI_URL=http://localhost:3000\n",
        )
        .unwrap();

        let creds = loader
            .load_with(env_from(&[(API_KEY_VAR, "from-env")]))
            .unwrap();
        assert_eq!(creds.api_key(), "from-env");
        assert_eq!(creds.api_url().as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_config_file_is_last_resort() {
        let (loader, temp_dir) = temp_loader();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            r#"
            api_key = "from-file"
            api_url = "https://file.example.com"
            "#,
        )
        .unwrap();

        let creds = loader
            .load_with(env_from(&[(API_URL_VAR, "https://env.example.com")]))
            .unwrap();
        assert_eq!(creds.api_key(), "from-file");
        assert_eq!(creds.api_url().host_str(), Some("env.example.com"));
    }

    #[test]
    fn test_malformed_config_file() {
        let (loader, temp_dir) = temp_loader();
        std::fs::write(temp_dir.path().join("config.toml"), "api_key = [").unwrap();

        let result = loader.load_with(env_from(&[]));
        assert!(matches!(result, Err(Error::TomlParse(_))));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = Credentials::new("secret", "ftp://gw.example.com").unwrap_err();
        assert!(err.to_string().contains("must be an http(s) URL"));

        assert!(matches!(
            Credentials::new("secret", "not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_api_key_with_control_characters() {
        let err = Credentials::new("sec\nret", "https://gw.example.com").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let creds = Credentials::new("super-secret", "https://gw.example.com").unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
