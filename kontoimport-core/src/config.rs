//! Configuration management
//!
//! Settings come from an optional `settings.json` in the working directory,
//! overridden by environment variables:
//! ```json
//! {
//!   "remote": { "url": "https://<project>.supabase.co", "apiKey": "..." },
//!   "chunkSize": 50
//! }
//! ```
//! There are no built-in credentials; a real run fails without them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::Error;

pub const ENV_URL: &str = "SUPABASE_URL";
pub const ENV_API_KEY: &str = "SUPABASE_KEY";
pub const ENV_BEARER_TOKEN: &str = "SUPABASE_BEARER_TOKEN";

pub const DEFAULT_WORK_DIR: &str = ".tmp";
pub const DEFAULT_CHUNK_SIZE: usize = 50;
pub const DEFAULT_RAW_TABLE: &str = "raw_ing_exports";
pub const DEFAULT_TRANSACTIONS_TABLE: &str = "transactions";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    remote: RemoteSettings,
    #[serde(default)]
    chunk_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteSettings {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    bearer_token: Option<String>,
    #[serde(default)]
    raw_table: Option<String>,
    #[serde(default)]
    transactions_table: Option<String>,
}

/// Remote store endpoint and credentials
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub api_key: String,
    pub bearer_token: String,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

impl RemoteConfig {
    /// Build a remote config, validating the endpoint URL.
    ///
    /// The URL must be `https`; `http` is allowed for loopback hosts only.
    pub fn new(url: &str, api_key: &str, bearer_token: Option<&str>) -> crate::domain::result::Result<Self> {
        let parsed = Url::parse(url).map_err(|e| Error::config(format!("Invalid remote URL '{}': {}", url, e)))?;

        let loopback = matches!(
            parsed.host_str(),
            Some("localhost") | Some("127.0.0.1") | Some("[::1]")
        );
        match parsed.scheme() {
            "https" => {}
            "http" if loopback => {}
            scheme => {
                return Err(Error::config(format!(
                    "Remote URL must use HTTPS (got '{}')",
                    scheme
                )))
            }
        }

        if api_key.trim().is_empty() {
            return Err(Error::config("Remote API key cannot be empty"));
        }

        let bearer_token = bearer_token
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(api_key);

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bearer_token: bearer_token.to_string(),
        })
    }
}

/// Target table and its conflict key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub name: String,
    pub on_conflict: String,
}

/// Ingestion configuration for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: PathBuf,
    /// None when no endpoint or key was configured
    pub remote: Option<RemoteConfig>,
    pub raw_table: TableConfig,
    pub transactions_table: TableConfig,
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            remote: None,
            raw_table: TableConfig {
                name: DEFAULT_RAW_TABLE.to_string(),
                on_conflict: "source_file,row_index".to_string(),
            },
            transactions_table: TableConfig {
                name: DEFAULT_TRANSACTIONS_TABLE.to_string(),
                on_conflict: "transaction_id".to_string(),
            },
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Load config from the working directory and the process environment
    pub fn load(work_dir: &Path) -> Result<Self> {
        Self::load_with_env(work_dir, |key| std::env::var(key).ok())
    }

    /// Load config with an explicit environment lookup
    pub fn load_with_env<F>(work_dir: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings_path = work_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {}", settings_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid settings file {}", settings_path.display()))?
        } else {
            SettingsFile::default()
        };

        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let url = non_empty(env(ENV_URL)).or(non_empty(raw.remote.url));
        let api_key = non_empty(env(ENV_API_KEY)).or(non_empty(raw.remote.api_key));
        let bearer = non_empty(env(ENV_BEARER_TOKEN)).or(non_empty(raw.remote.bearer_token));

        let remote = match (url, api_key) {
            (Some(url), Some(key)) => Some(RemoteConfig::new(&url, &key, bearer.as_deref())?),
            (Some(_), None) => anyhow::bail!("{} is set but {} is missing", ENV_URL, ENV_API_KEY),
            (None, Some(_)) => anyhow::bail!("{} is set but {} is missing", ENV_API_KEY, ENV_URL),
            (None, None) => None,
        };

        let mut config = Config {
            work_dir: work_dir.to_path_buf(),
            remote,
            ..Default::default()
        };
        if let Some(name) = non_empty(raw.remote.raw_table) {
            config.raw_table.name = name;
        }
        if let Some(name) = non_empty(raw.remote.transactions_table) {
            config.transactions_table.name = name;
        }
        if let Some(size) = raw.chunk_size {
            if size == 0 {
                anyhow::bail!("chunkSize must be at least 1");
            }
            config.chunk_size = size;
        }

        Ok(config)
    }

    /// Remote settings, or an error naming what is missing
    pub fn require_remote(&self) -> crate::domain::result::Result<&RemoteConfig> {
        self.remote.as_ref().ok_or_else(|| {
            Error::config(format!(
                "Remote store not configured: set {} and {}",
                ENV_URL, ENV_API_KEY
            ))
        })
    }
}
