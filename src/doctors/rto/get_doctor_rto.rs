use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::doctors::model::AvailabilitySlot;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDoctorRto {
  pub uuid: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub specialty: String,
  pub license_number: String,
  pub availability: Vec<AvailabilitySlot>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
