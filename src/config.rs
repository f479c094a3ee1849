use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const URL_ENV: &str = "GOGS_URL";

const APP_DIR: &str = "gogs-branch";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    pub url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_path())?;
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// `GOGS_URL` wins over the file `url` unless it is blank. The token
    /// precedence lives in `auth::resolve_token`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.url = Some(url.trim().to_string());
        }
    }

    pub fn server_url(&self) -> Result<&str> {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => bail!(
                "No server URL configured; set {} or `url` in {}",
                URL_ENV,
                config_path().display()
            ),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join(APP_DIR).join("config.toml")
}

fn config_dir() -> PathBuf {
    if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&dir).to_path_buf();
    }

    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".config");
    }

    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
