use serde::Deserialize;
use validator_derive::Validate;

use crate::doctors::model::AvailabilitySlot;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorDto {
  #[validate(length(min = 1, message = "First name is required"))]
  pub first_name: String,
  #[validate(length(min = 1, message = "Last name is required"))]
  pub last_name: String,
  #[validate(email(message = "Invalid email address"))]
  pub email: String,
  #[validate(length(min = 1, message = "Phone number is required"))]
  pub phone: String,
  #[validate(length(min = 1, message = "Specialty is required"))]
  pub specialty: String,
  #[validate(length(min = 1, message = "License number is required"))]
  pub license_number: String,
  #[serde(default)]
  pub availability: Vec<AvailabilitySlot>,
}
