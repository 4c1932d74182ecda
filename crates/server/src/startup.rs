use std::{env, net::SocketAddr, path::Path};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

const DEFAULT_CATALOG_SIZE: u32 = 95;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolve the process configuration from `CONFIG_PATH` (default `config.toml`).
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_config_from(&path, env::var("SERVER_HOST").ok(), env::var("SERVER_PORT").ok())
}

/// An existing file must parse and validate. A missing file means defaults,
/// with `host`/`port` overrides taken from the environment.
pub fn load_config_from(
    path: &str,
    host: Option<String>,
    port: Option<String>,
) -> Result<AppConfig, StartupError> {
    if Path::new(path).exists() {
        let mut cfg = configs::load_from_file(path)
            .map_err(|e| StartupError::InvalidConfig(format!("{path}: {e}")))?;
        cfg.normalize_and_validate()
            .map_err(|e| StartupError::InvalidConfig(format!("{path}: {e}")))?;
        return Ok(cfg);
    }
    warn!(%path, "config file not found; using defaults");
    let mut cfg = AppConfig::default();
    if let Some(host) = host {
        cfg.server.host = host;
    }
    if let Some(port) = port {
        cfg.server.port = port
            .parse::<u16>()
            .map_err(|e| StartupError::InvalidConfig(format!("SERVER_PORT={port}: {e}")))?;
    }
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

fn catalog_size() -> u32 {
    env::var("CATALOG_SIZE")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_CATALOG_SIZE)
}

/// Build the app from an already-resolved config and serve it until the listener closes.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = AppState::new(cfg.pagination.clone(), routes::demo_catalog(catalog_size()));
    info!(items = state.catalog.len(), "catalog loaded");

    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
