use serde::Deserialize;
use validator_derive::Validate;

use crate::shared::{permission::Permission, role::Role};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminDto {
  #[validate(length(min = 1, message = "First name is required"))]
  pub first_name: String,
  #[validate(length(min = 1, message = "Last name is required"))]
  pub last_name: String,
  #[validate(email(message = "Invalid email address"))]
  pub email: String,
  #[validate(length(min = 1, message = "Phone number is required"))]
  pub phone: String,
  #[serde(default = "default_role")]
  pub role: Role,
  #[validate(length(min = 1, message = "Username is required"))]
  pub username: String,
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
  #[serde(default)]
  pub permissions: Vec<Permission>,
  #[serde(default)]
  pub is_super_admin: bool,
}

fn default_role() -> Role {
  Role::Admin
}
