use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Request parameter that carries the current page unless a pager overrides it.
pub const DEFAULT_PAGER_KEY: &str = "_page";
/// Items per page unless a pager overrides it.
pub const DEFAULT_PER_PAGE: u64 = 10;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Defaults shared by every pager built from configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PaginationConfig {
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { per_page: default_per_page(), key: default_key() }
    }
}

fn default_per_page() -> u64 { DEFAULT_PER_PAGE }
fn default_key() -> String { DEFAULT_PAGER_KEY.to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.pagination.normalize_and_validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl PaginationConfig {
    pub fn normalize_and_validate(&mut self) -> Result<()> {
        if self.key.trim().is_empty() {
            self.key = default_key();
        }
        if self.per_page == 0 {
            return Err(anyhow!("pagination.per_page must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.pagination, PaginationConfig::default());
        assert_eq!(cfg.pagination.per_page, 10);
        assert_eq!(cfg.pagination.key, "_page");
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn pagination_table_overrides_defaults() {
        let cfg = parse("[pagination]\nper_page = 25\nkey = \"p\"\n").unwrap();
        assert_eq!(cfg.pagination.per_page, 25);
        assert_eq!(cfg.pagination.key, "p");
    }

    #[test]
    fn zero_per_page_is_rejected() {
        let mut cfg = parse("[pagination]\nper_page = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn blank_key_falls_back() {
        let mut cfg = parse("[pagination]\nkey = \"  \"\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.pagination.key, DEFAULT_PAGER_KEY);
    }

    #[test]
    fn worker_threads_zero_is_normalized() {
        let mut cfg = parse("[server]\nhost = \"\"\nport = 9000\nworker_threads = 0\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }
}
