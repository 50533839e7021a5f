use chrono::NaiveDate;
use serde::Deserialize;
use validator_derive::Validate;

use crate::patients::model::{Address, Gender};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientDto {
  #[validate(length(min = 1, message = "First name is required"))]
  pub first_name: String,
  #[validate(length(min = 1, message = "Last name is required"))]
  pub last_name: String,
  #[validate(email(message = "Invalid email address"))]
  pub email: String,
  #[validate(length(min = 1, message = "Phone number is required"))]
  pub phone: String,
  pub date_of_birth: NaiveDate,
  pub gender: Gender,
  #[serde(default)]
  pub address: Address,
  #[serde(default)]
  pub medical_history: Vec<String>,
}
