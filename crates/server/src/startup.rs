use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::auth::ApiKeys;
use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// `config.toml` (or `CONFIG_PATH`) first, then environment-only defaults.
pub fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(file_err) => {
            warn!(error = %file_err, "config file unavailable, falling back to environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn connect(cfg: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg).await?;
    if cfg.database.run_migrations {
        models::db::migrate(&db).await?;
    }
    Ok(db)
}

/// Router with all services wired to `db`.
pub fn app(db: DatabaseConnection, api_keys: ApiKeys) -> Router {
    routes::build_router(AppState::new(db, api_keys))
}

/// Connect, migrate when configured, and serve until `shutdown` resolves.
/// In-flight requests are drained before returning.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = connect(&cfg).await?;
    let app = app(db, ApiKeys::new(cfg.auth.api_keys.clone()));

    let addr = bind_addr(&cfg)?;
    info!(%addr, api_keys = cfg.auth.api_keys.len(), "starting catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("catalog server drained");
    Ok(())
}
