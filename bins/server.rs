use std::process::ExitCode;

use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// Worker threads from config, overridable with `TOKIO_WORKER_THREADS`.
fn worker_threads(cfg: &AppConfig) -> Option<usize> {
    std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&w| w > 0)
        .or(cfg.server.worker_threads)
}

fn build_runtime(threads: Option<usize>) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = threads {
        builder.worker_threads(w);
    }
    builder.build()
}

fn main() -> ExitCode {
    // .env 需要在日志初始化前加载，RUST_LOG / LOG_FORMAT 才会生效
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let service_id = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "server", event = "panic", %service_id, message = %info, "unhandled panic occurred");
    }));

    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "server", event = "config_invalid", error = %e, "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let threads = worker_threads(&cfg);
    let rt = match build_runtime(threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        threads = threads.unwrap_or_default(),
        per_page = cfg.pagination.per_page,
        pager_key = %cfg.pagination.key,
        "server service starting"
    );

    rt.block_on(async move {
        tokio::select! {
            res = server::run(cfg) => match res {
                Ok(()) => {
                    info!(service = "server", event = "stop", %service_id, "server stopped normally");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "server", event = "shutdown_signal", %service_id, "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
