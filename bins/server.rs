use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Scheme of the database url, e.g. `postgres` or `sqlite`; never the credentials.
fn database_backend(db: &configs::DatabaseConfig) -> &str {
    db.url.split_once(':').map_or("unknown", |(scheme, _)| scheme)
}

async fn shutdown_signal(instance_id: Uuid) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(service = "catalog", event = "signal_unavailable", error = %e, "Ctrl+C handler failed; serving until killed");
        std::future::pending::<()>().await;
    }
    info!(service = "catalog", event = "shutdown_signal", %instance_id, "draining in-flight requests");
}

fn main() -> ExitCode {
    // .env first so RUST_LOG and LOG_FORMAT take effect
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance_id = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "catalog", event = "panic", %instance_id, message = %info, "unhandled panic occurred");
    }));

    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "catalog", event = "config_invalid", error = %e, "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(n) = cfg.server.worker_threads {
        builder.worker_threads(n);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "catalog", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "catalog",
        event = "start",
        %instance_id,
        version = env!("CARGO_PKG_VERSION"),
        host = %cfg.server.host,
        port = cfg.server.port,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        database = database_backend(&cfg.database),
        run_migrations = cfg.database.run_migrations,
        api_keys = cfg.auth.api_keys.len(),
        "catalog server starting"
    );

    match rt.block_on(server::startup::serve(cfg, shutdown_signal(instance_id))) {
        Ok(()) => {
            info!(service = "catalog", event = "stop", %instance_id, "catalog server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "catalog", event = "run_failed", %instance_id, error = %e, "catalog server failed");
            ExitCode::FAILURE
        }
    }
}
