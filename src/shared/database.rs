use std::sync::Arc;

use log::info;
use sqlx::{migrate::MigrateError, PgPool, Pool, Postgres};
use thiserror::Error;

use crate::shared::config::Config;

#[derive(Debug, Error)]
pub enum DatabaseError {
  #[error("Failed to connect to the database: {0}")]
  Connect(#[from] sqlx::Error),

  #[error("Failed to run migrations: {0}")]
  Migrate(#[from] MigrateError),
}

pub struct Database {
  pub pool: Arc<Pool<Postgres>>,
}

impl Database {
  pub async fn new(config: &Config) -> Result<Self, DatabaseError> {
    let pool = prepare_pool(&config.database_url).await?;
    Ok(Self { pool: Arc::new(pool) })
  }
}

pub async fn prepare_pool(
  database_url: &str,
) -> Result<Pool<Postgres>, DatabaseError> {
  let pool = PgPool::connect(database_url).await?;
  sqlx::migrate!("./migrations").run(&pool).await?;
  info!("Database migrations applied");
  Ok(pool)
}

/// Maps a Postgres unique violation on `{table}_{field}_key` back to `field`.
pub fn unique_violation_field(error: &sqlx::Error, table: &str) -> Option<String> {
  let sqlx::Error::Database(database_error) = error else {
    return None;
  };
  if !database_error.is_unique_violation() {
    return None;
  }
  let field = database_error
    .constraint()
    .map(|constraint| constraint_field(constraint, table))
    .unwrap_or("record");
  Some(field.to_string())
}

/// `users_email_key` on `users` is `email`; anything else is `record`.
pub fn constraint_field<'a>(constraint: &'a str, table: &str) -> &'a str {
  constraint
    .strip_prefix(table)
    .and_then(|rest| rest.strip_prefix('_'))
    .and_then(|rest| rest.strip_suffix("_key"))
    .filter(|field| !field.is_empty())
    .unwrap_or("record")
}
