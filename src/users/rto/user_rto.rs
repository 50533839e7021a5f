use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{permission::Permission, role::Role};

/// Public view of a user. The password hash never leaves the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRto {
  pub uuid: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role: Option<Role>,
  pub username: String,
  pub permissions: Vec<Permission>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
