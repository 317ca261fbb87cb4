use crate::error::{Error, Result};
use crate::id::ClientId;
use crate::monzo::AppCredentials;
use oauth2::ClientSecret;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR_PREFIX: &str = "monzo-client";

pub const DEFAULT_API_BASE_URL: &str = "https://api.monzo.com";
pub const DEFAULT_AUTH_BASE_URL: &str = "https://auth.monzo.com";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/callback";

/// Where the API and the authorization page live.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MonzoConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
}

impl Default for MonzoConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            auth_base_url: default_auth_base_url(),
        }
    }
}

impl MonzoConfig {
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.auth_base_url = url.into();
        self
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_auth_base_url() -> String {
    DEFAULT_AUTH_BASE_URL.to_string()
}

fn default_redirect_uri() -> String {
    DEFAULT_REDIRECT_URI.to_string()
}

/// Settings read from `config.toml` by the command-line client.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub monzo: MonzoAppConfig,
    #[serde(default)]
    pub api: MonzoConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MonzoAppConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

impl MonzoAppConfig {
    pub fn app_credentials(&self) -> AppCredentials {
        AppCredentials {
            client_id: ClientId::new_unchecked(self.client_id.clone()),
            client_secret: ClientSecret::new(self.client_secret.clone()),
            redirect_uri: self.redirect_uri.clone(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file()?;

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found at {:?}. Please create one.",
                config_path
            )));
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        if config.monzo.client_id.is_empty() || config.monzo.client_secret.is_empty() {
            return Err(Error::Config(
                "Monzo client_id and client_secret must be set in config file".to_string(),
            ));
        }

        Ok(config)
    }

    fn xdg_dirs() -> xdg::BaseDirectories {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        let xdg_dirs = Self::xdg_dirs();
        xdg_dirs
            .place_config_file("config.toml")
            .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))
    }

    /// Get the cache directory path
    pub fn cache_dir() -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.get_cache_home()
            .ok_or_else(|| Error::Config("Failed to determine cache directory".to_string()))
    }

    /// Get a cache file path
    pub fn cache_file(filename: &str) -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.place_cache_file(filename)
            .map_err(|e| Error::Config(format!("Failed to create cache file path: {}", e)))
    }
}
