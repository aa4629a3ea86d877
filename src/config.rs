//! Configuration management for filmrank.
//!
//! Settings come from built-in defaults, an optional `filmrank.toml`
//! config file, and `FILMRANK_*` environment variables, in that order of
//! precedence (later wins). A `--database` CLI override beats all three.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::repository::DbContext;

/// Base URL of the source site.
pub const DEFAULT_BASE_URL: &str = "https://www.csfd.cz";

/// Path of the ranked-list page, relative to the base URL.
pub const DEFAULT_LIST_PATH: &str = "/zebricky/filmy/nejlepsi/?showMore=1";

/// Identifying header sent with every outbound request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; filmrank/0.3)";

/// Total request attempts before a fetch is reported as exhausted.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 2;

/// Base backoff delay; doubles after each failed attempt.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default number of parallel movie workers.
pub const DEFAULT_WORKERS: usize = 10;

const DEFAULT_DATABASE: &str = "filmrank.db";
const CONFIG_FILE: &str = "filmrank.toml";

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub list_path: String,
    pub user_agent: String,
    pub database_path: PathBuf,
    pub request_timeout: Duration,
    pub retry_attempts: u32,
    pub retry_base_delay: Duration,
}

/// On-disk config file shape; every field optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    list_path: Option<String>,
    user_agent: Option<String>,
    database: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
    retry_attempts: Option<u32>,
    retry_base_delay_ms: Option<u64>,
}

impl FileConfig {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            list_path: DEFAULT_LIST_PATH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
        }
    }
}

impl Settings {
    /// Load settings, layering config file and environment over defaults.
    pub fn load(
        config_path: Option<&Path>,
        database_override: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let mut settings = Settings::default();

        let file = match config_path {
            Some(path) => Some(FileConfig::load(path)?),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Some(FileConfig::load(default_path)?)
                } else {
                    None
                }
            }
        };

        if let Some(file) = file {
            settings.apply_file(file);
        }
        settings.apply_env()?;

        if let Some(db) = database_override {
            settings.database_path = db.to_path_buf();
        }

        Ok(settings)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(v) = file.base_url {
            self.base_url = v;
        }
        if let Some(v) = file.list_path {
            self.list_path = v;
        }
        if let Some(v) = file.user_agent {
            self.user_agent = v;
        }
        if let Some(v) = file.database {
            self.database_path = v;
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout = Duration::from_secs(v);
        }
        if let Some(v) = file.retry_attempts {
            self.retry_attempts = v;
        }
        if let Some(v) = file.retry_base_delay_ms {
            self.retry_base_delay = Duration::from_millis(v);
        }
    }

    fn apply_env(&mut self) -> anyhow::Result<()> {
        if let Ok(v) = env::var("FILMRANK_BASE_URL") {
            self.base_url = v;
        }
        if let Ok(v) = env::var("FILMRANK_LIST_PATH") {
            self.list_path = v;
        }
        if let Ok(v) = env::var("FILMRANK_USER_AGENT") {
            self.user_agent = v;
        }
        if let Ok(v) = env::var("FILMRANK_DATABASE") {
            self.database_path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("FILMRANK_RETRY_ATTEMPTS") {
            self.retry_attempts = v.parse()?;
        }
        Ok(())
    }

    /// Create a database context for the configured database path.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::new(&self.database_path)
    }

    /// Create the database file's parent directory if needed.
    pub fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.list_path, DEFAULT_LIST_PATH);
        assert_eq!(settings.retry_attempts, 2);
        assert_eq!(settings.retry_base_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_config_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filmrank.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
base_url = "http://localhost:8080"
retry_attempts = 5
database = "test.db"
"#
        )
        .unwrap();

        let settings = Settings::load(Some(&path), None).unwrap();
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.retry_attempts, 5);
        assert_eq!(settings.database_path, PathBuf::from("test.db"));
        // Untouched fields keep their defaults
        assert_eq!(settings.list_path, DEFAULT_LIST_PATH);
    }

    #[test]
    fn test_database_override_wins() {
        let settings = Settings::load(None, Some(Path::new("/tmp/override.db"))).unwrap();
        assert_eq!(settings.database_path, PathBuf::from("/tmp/override.db"));
    }
}
