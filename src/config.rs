//! Runtime configuration parsed from environment variables.
//!
//! Every setting has a default, so `TaskflowConfig::default()` is a complete
//! configuration and `from_env` only overrides what is set.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = ".taskflow";
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_RECIPE_BASE_URL: &str = "https://api.spoonacular.com/recipes";
pub const DEFAULT_RECIPE_API_KEY_ENV: &str = "SPOONACULAR_API_KEY";
pub const DEFAULT_RECIPE_RESULTS: u32 = 12;
pub const DEFAULT_RECIPE_REQUEST_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_RECIPE_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Settings for the external recipe API client.
#[derive(Clone, PartialEq, Eq)]
pub struct RecipeApiConfig {
    pub base_url: String,
    pub api_key: String,
    /// Results requested per query.
    pub results: u32,
    pub timeouts: HttpTimeouts,
}

impl std::fmt::Debug for RecipeApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("results", &self.results)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl Default for RecipeApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RECIPE_BASE_URL.to_owned(),
            api_key: String::new(),
            results: DEFAULT_RECIPE_RESULTS,
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_RECIPE_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_RECIPE_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskflowConfig {
    /// Root directory of the file-backed store.
    pub data_dir: PathBuf,
    pub idle_timeout: Duration,
    pub recipes: RecipeApiConfig,
}

impl Default for TaskflowConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            recipes: RecipeApiConfig::default(),
        }
    }
}

impl TaskflowConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `TASKFLOW_DATA_DIR`: default `.taskflow`
    /// - `TASKFLOW_IDLE_TIMEOUT_SECS`: default 300
    /// - `TASKFLOW_RECIPE_BASE_URL`: default Spoonacular recipes endpoint
    /// - `TASKFLOW_RECIPE_API_KEY_ENV`: names the env var holding the API key
    ///   (default `SPOONACULAR_API_KEY`); an unset key is left empty
    /// - `TASKFLOW_RECIPE_RESULTS`: default 12
    /// - `TASKFLOW_RECIPE_REQUEST_TIMEOUT_SECS`: default 20
    /// - `TASKFLOW_RECIPE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// Unparsable numbers fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let data_dir = std::env::var("TASKFLOW_DATA_DIR").map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let idle_secs = env_parse("TASKFLOW_IDLE_TIMEOUT_SECS", DEFAULT_IDLE_TIMEOUT_SECS);

        let base_url = std::env::var("TASKFLOW_RECIPE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_RECIPE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let key_var =
            std::env::var("TASKFLOW_RECIPE_API_KEY_ENV").unwrap_or_else(|_| DEFAULT_RECIPE_API_KEY_ENV.to_string());
        let api_key = std::env::var(&key_var).unwrap_or_default();

        let recipes = RecipeApiConfig {
            base_url,
            api_key,
            results: env_parse("TASKFLOW_RECIPE_RESULTS", DEFAULT_RECIPE_RESULTS),
            timeouts: HttpTimeouts {
                request_secs: env_parse("TASKFLOW_RECIPE_REQUEST_TIMEOUT_SECS", DEFAULT_RECIPE_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse("TASKFLOW_RECIPE_CONNECT_TIMEOUT_SECS", DEFAULT_RECIPE_CONNECT_TIMEOUT_SECS),
            },
        };

        Self { data_dir, idle_timeout: Duration::from_secs(idle_secs), recipes }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
