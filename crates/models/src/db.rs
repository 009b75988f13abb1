use std::{env, time::Duration};

use anyhow::anyhow;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

pub use configs::DatabaseConfig;

fn required_url(var: Result<String, env::VarError>) -> anyhow::Result<String> {
    match var {
        Ok(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(anyhow!("DATABASE_URL is not set")),
    }
}

/// Connect with default pool options using `DATABASE_URL` (`.env` is read
/// first). There is no built-in fallback URL.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let _ = dotenvy::dotenv();
    let url = required_url(env::var("DATABASE_URL"))?;
    let db = Database::connect(url).await?;
    Ok(db)
}

/// Connect with the pool options from configuration.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opt).await?;
    info!(max = cfg.max_connections, min = cfg.min_connections, "database pool ready");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_must_be_present() {
        assert!(required_url(Err(env::VarError::NotPresent)).is_err());
        assert!(required_url(Ok("  ".into())).is_err());
        assert_eq!(required_url(Ok("postgres://h/db".into())).expect("url"), "postgres://h/db");
    }
}
