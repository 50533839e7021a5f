use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Role {
  #[serde(rename = "SuperAdmin")]
  SuperAdmin,
  #[serde(rename = "Admin")]
  Admin,
  #[serde(rename = "Doctor")]
  Doctor,
  #[serde(rename = "Patient")]
  Patient,
}

impl Role {
  pub const ALL: [Role; 4] =
    [Role::SuperAdmin, Role::Admin, Role::Doctor, Role::Patient];

  pub fn as_str(&self) -> &'static str {
    match self {
      Role::SuperAdmin => "SuperAdmin",
      Role::Admin => "Admin",
      Role::Doctor => "Doctor",
      Role::Patient => "Patient",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown role `{}`", self.0)
  }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
  type Err = UnknownRole;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    Role::ALL
      .into_iter()
      .find(|role| role.as_str() == value)
      .ok_or_else(|| UnknownRole(value.to_string()))
  }
}
