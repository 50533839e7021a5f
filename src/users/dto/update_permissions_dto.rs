use serde::Deserialize;
use validator_derive::Validate;

use crate::shared::permission::Permission;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePermissionsDto {
  pub permissions: Vec<Permission>,
}
