use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::auth::service::AuthConfig;
use service::storage::{seaorm::SeaOrmStore, Store};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_bind_addr(cfg: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Connect, migrate, bootstrap the admin account and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.migrate_on_start {
        migration::Migrator::up(&db, None).await?;
        info!(event = "migrations_applied", "database schema is up to date");
    }

    let store: Arc<dyn Store> = Arc::new(SeaOrmStore::new(db));
    let auth = AuthConfig { jwt_secret: cfg.auth.jwt_secret.clone(), token_ttl_hours: cfg.auth.token_ttl_hours };
    let state = ServerState::new(store, auth);

    if let Some(admin) = &cfg.admin {
        let user = state.auth_service().ensure_admin(&admin.email, &admin.password, &admin.name).await?;
        info!(user_id = %user.id, "admin account ready");
    }

    service::metrics::register_all();

    let app: Router = routes::build_router(state, build_cors());

    let addr = load_bind_addr(&cfg.server)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!(event = "stop", "server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let cfg = ServerConfig { host: "0.0.0.0".into(), port: 5001, worker_threads: None };
        assert_eq!(load_bind_addr(&cfg).expect("addr").port(), 5001);
    }

    #[test]
    fn bad_host_is_an_error() {
        let cfg = ServerConfig { host: "not a host".into(), port: 5001, worker_threads: None };
        assert!(load_bind_addr(&cfg).is_err());
    }
}
