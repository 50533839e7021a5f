use serde::Deserialize;
use validator_derive::Validate;

use crate::shared::role::Role;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRoleDto {
  pub role: Role,
}
