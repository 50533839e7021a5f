use serde::Deserialize;
use validator_derive::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UserPathDto {
  #[validate(length(min = 1))]
  pub uuid: String,
}
