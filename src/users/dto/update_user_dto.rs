use serde::Deserialize;
use validator_derive::Validate;

use crate::shared::{permission::Permission, role::Role};

/// Partial update: only the fields present in the body are replaced.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
  #[validate(length(min = 1, message = "First name is required"))]
  pub first_name: Option<String>,
  #[validate(length(min = 1, message = "Last name is required"))]
  pub last_name: Option<String>,
  #[validate(email(message = "Invalid email address"))]
  pub email: Option<String>,
  #[validate(length(min = 1, message = "Phone number is required"))]
  pub phone: Option<String>,
  pub role: Option<Role>,
  #[validate(length(min = 1, message = "Username is required"))]
  pub username: Option<String>,
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: Option<String>,
  pub permissions: Option<Vec<Permission>>,
}
