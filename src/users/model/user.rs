use chrono::{DateTime, Utc};

use crate::shared::{permission::Permission, role::Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  pub uuid: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub role: Option<Role>,
  pub username: String,
  pub password_hash: String,
  pub permissions: Vec<Permission>,
}
