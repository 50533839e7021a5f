use serde::{Deserialize, Serialize};

/// Capability tags grantable independently of a role.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Permission {
  #[serde(rename = "manageDoctors")]
  ManageDoctors,
  #[serde(rename = "managePatients")]
  ManagePatients,
  #[serde(rename = "manageAppointments")]
  ManageAppointments,
  #[serde(rename = "manageBilling")]
  ManageBilling,
  #[serde(rename = "manageInventory")]
  ManageInventory,
  #[serde(rename = "viewReports")]
  ViewReports,
}

/// Drops repeated tags, keeping the first occurrence of each.
pub fn dedup_permissions(permissions: Vec<Permission>) -> Vec<Permission> {
  let mut unique = Vec::with_capacity(permissions.len());
  for permission in permissions {
    if !unique.contains(&permission) {
      unique.push(permission);
    }
  }
  unique
}
