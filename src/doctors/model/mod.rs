use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum Weekday {
  Monday,
  Tuesday,
  Wednesday,
  Thursday,
  Friday,
  Saturday,
  Sunday,
}

/// One weekly consulting window, e.g. Monday "09:00" to "17:00".
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
  pub day: Weekday,
  pub start_time: String,
  pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
  pub uuid: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub specialty: String,
  pub license_number: String,
  pub availability: Vec<AvailabilitySlot>,
}
