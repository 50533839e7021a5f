use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{permission::Permission, role::Role};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAdminRto {
  pub uuid: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub role: Role,
  pub username: String,
  pub permissions: Vec<Permission>,
  pub is_super_admin: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
