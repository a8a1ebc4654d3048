use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{ENV, api::error};

/// Builds the process-wide pool. No connection is opened until the first
/// query, so the server can start (and report 503 on /health) while the
/// database is still unreachable.
pub fn connect_database() -> Result<PgPool, error::SystemError> {
    let pool = PgPoolOptions::new()
        .max_connections(ENV.db_max_connections)
        .min_connections(ENV.db_min_connections)
        .acquire_timeout(Duration::from_secs(ENV.db_acquire_timeout_secs))
        .acquire_slow_threshold(Duration::from_secs(3))
        .connect_lazy(&ENV.database_url)?;
    log::info!(
        "Database pool configured (min {}, max {} connections)",
        ENV.db_min_connections,
        ENV.db_max_connections
    );
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), error::SystemError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations applied");
    Ok(())
}
