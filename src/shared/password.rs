use actix_web::{error::BlockingError, web};
use bcrypt::BcryptError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
  #[error("Password hashing failed: {0}")]
  Hashing(#[from] BcryptError),

  #[error("Password hashing task failed: {0}")]
  Blocking(#[from] BlockingError),
}

/// Hashes on the blocking thread pool so the worker's event loop keeps
/// serving other requests while bcrypt runs.
pub async fn hash_password(
  password: String,
  cost: u32,
) -> Result<String, PasswordError> {
  let hash = web::block(move || bcrypt::hash(password, cost)).await??;
  Ok(hash)
}

#[cfg(test)]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
  bcrypt::verify(password, hash)
}
