use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

/// Where the repository collection and the daily issue snapshots live.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_repos_file")]
    pub repos_file: String,
    #[serde(default = "default_issues_prefix")]
    pub issues_prefix: String,
    #[serde(default = "default_issues_suffix")]
    pub issues_suffix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            repos_file: default_repos_file(),
            issues_prefix: default_issues_prefix(),
            issues_suffix: default_issues_suffix(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 7853 }
fn default_data_dir() -> PathBuf { PathBuf::from(".") }
fn default_repos_file() -> String { "github_repos.json".into() }
fn default_issues_prefix() -> String { "github_issues".into() }
fn default_issues_suffix() -> String { ".json".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file first; without one, fall back to env vars over defaults.
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_env_from(&path)
    }

    /// A missing file falls back silently; an unreadable or malformed one is logged first.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                let missing = e
                    .downcast_ref::<std::io::Error>()
                    .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound);
                if !missing {
                    warn!(path, error = %e, "ignoring config file, using environment and defaults");
                }
                Self::from_env()
            }
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Defaults overridden by `SERVER_HOST`, `SERVER_PORT`, `DATA_DIR`, `TOKIO_WORKER_THREADS`.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());
        if let Ok(dir) = std::env::var("DATA_DIR") {
            cfg.storage.data_dir = PathBuf::from(dir);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.repos_file.trim().is_empty() {
            return Err(anyhow!("storage.repos_file must not be empty"));
        }
        if self.issues_prefix.trim().is_empty() {
            return Err(anyhow!("storage.issues_prefix must not be empty"));
        }
        Ok(())
    }

    pub fn repos_path(&self) -> PathBuf {
        self.data_dir.join(&self.repos_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg = load_from_str("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 7853);
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:7853");
        assert_eq!(cfg.storage.repos_path(), PathBuf::from("./github_repos.json"));
        assert_eq!(cfg.storage.issues_prefix, "github_issues");
        assert_eq!(cfg.storage.issues_suffix, ".json");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = load_from_str(
            r#"
            [server]
            port = 9000

            [storage]
            data_dir = "/var/lib/repo_watch"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.storage.repos_path(), PathBuf::from("/var/lib/repo_watch/github_repos.json"));
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = load_from_str("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn blank_repos_file_is_rejected() {
        let mut cfg = load_from_str("[storage]\nrepos_file = \"  \"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("configs_malformed_{}.toml", std::process::id()));
        std::fs::write(&path, "[server\nport = ").unwrap();

        let cfg = AppConfig::load_or_env_from(path.to_str().unwrap()).unwrap();
        assert!(!cfg.storage.repos_file.is_empty());
        assert!(cfg.server.port > 0);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = AppConfig::load_or_env_from("/nonexistent/repo_watch.toml").unwrap();
        assert_eq!(cfg.storage.repos_file, "github_repos.json");
    }
}
