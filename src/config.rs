use crate::api::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variables checked for the Gemini credential, in order.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Read from the environment at startup, never written to disk.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            log_level: default_log_level(),
            api_key: None,
        }
    }
}

/// Pick the first non-blank credential from `API_KEY_VARS`.
pub fn resolve_api_key<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

fn missing_file(result: Result<(), dotenvy::Error>) -> Result<(), dotenvy::Error> {
    match result {
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Load `.env` from the working directory or a parent. No file is not an
/// error; a file that fails to parse is.
pub fn load_dotenv() -> Result<(), dotenvy::Error> {
    missing_file(dotenvy::dotenv().map(|_| ()))
}

pub fn load_dotenv_from(path: &Path) -> Result<(), dotenvy::Error> {
    missing_file(dotenvy::from_path(path))
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("argen-news");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("argen-news.log"))
    }

    /// Load the config file (creating it with defaults if absent) and read the
    /// credential from the environment. Call `load_dotenv` first so `.env`
    /// values are visible.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.api_key = resolve_api_key(|var| std::env::var(var).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        if config.model.trim().is_empty() {
            config.model = default_model();
        }
        if config.api_base.trim().is_empty() {
            config.api_base = default_api_base();
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Config with defaults and no credential; never touches the filesystem.
    pub fn test_config() -> Self {
        Self::default()
    }
}
