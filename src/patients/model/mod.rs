use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum Gender {
  Male,
  Female,
  Other,
}

impl Gender {
  pub fn as_str(&self) -> &'static str {
    match self {
      Gender::Male => "Male",
      Gender::Female => "Female",
      Gender::Other => "Other",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGender(pub String);

impl fmt::Display for UnknownGender {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown gender `{}`", self.0)
  }
}

impl std::error::Error for UnknownGender {}

impl FromStr for Gender {
  type Err = UnknownGender;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "Male" => Ok(Gender::Male),
      "Female" => Ok(Gender::Female),
      "Other" => Ok(Gender::Other),
      other => Err(UnknownGender(other.to_string())),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Address {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub street: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
  pub uuid: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub date_of_birth: NaiveDate,
  pub gender: Gender,
  pub address: Address,
  pub medical_history: Vec<String>,
}
