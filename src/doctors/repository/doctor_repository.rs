use std::sync::Arc;

use sqlx::types::Json;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres, Row};
use thiserror::Error;

use crate::doctors::model::{AvailabilitySlot, Doctor};
use crate::shared::database::{unique_violation_field, Database};

#[derive(Debug, Error)]
pub enum DoctorRepositoryError {
  #[error("Database error: {0}")]
  DatabaseError(sqlx::Error),

  #[error("Duplicate value for unique field `{0}`")]
  UniqueViolation(String),
}

impl From<sqlx::Error> for DoctorRepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match unique_violation_field(&error, "doctors") {
      Some(field) => DoctorRepositoryError::UniqueViolation(field),
      None => DoctorRepositoryError::DatabaseError(error),
    }
  }
}

pub trait DoctorRepository {
  async fn find_all(&self) -> Result<Vec<Doctor>, DoctorRepositoryError>;
  async fn create(
    &self,
    create_doctor: CreateDoctor,
  ) -> Result<Doctor, DoctorRepositoryError>;
}

pub struct DoctorRepositoryImpl {
  pool: Arc<Pool<Postgres>>,
}

impl DoctorRepositoryImpl {
  pub fn new(database: Arc<Database>) -> Self {
    Self {
      pool: database.pool.clone(),
    }
  }
}

impl DoctorRepository for DoctorRepositoryImpl {
  async fn find_all(&self) -> Result<Vec<Doctor>, DoctorRepositoryError> {
    let doctors = sqlx::query_as::<_, Doctor>(
      "SELECT * FROM doctors ORDER BY created_at, uuid",
    )
    .fetch_all(&*self.pool)
    .await?;
    Ok(doctors)
  }

  async fn create(
    &self,
    create_doctor: CreateDoctor,
  ) -> Result<Doctor, DoctorRepositoryError> {
    let query = r#"
      INSERT INTO doctors
        (uuid, first_name, last_name, email, phone, specialty, license_number, availability)
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
      RETURNING *
    "#;
    sqlx::query_as::<_, Doctor>(query)
      .bind(&create_doctor.uuid)
      .bind(&create_doctor.first_name)
      .bind(&create_doctor.last_name)
      .bind(&create_doctor.email)
      .bind(&create_doctor.phone)
      .bind(&create_doctor.specialty)
      .bind(&create_doctor.license_number)
      .bind(Json(&create_doctor.availability))
      .fetch_one(&*self.pool)
      .await
      .map_err(DoctorRepositoryError::from)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDoctor {
  pub uuid: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub specialty: String,
  pub license_number: String,
  pub availability: Vec<AvailabilitySlot>,
}

impl<'r> FromRow<'r, PgRow> for Doctor {
  fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
    Ok(Self {
      uuid: row.try_get("uuid")?,
      created_at: row.try_get("created_at")?,
      updated_at: row.try_get("updated_at")?,
      first_name: row.try_get("first_name")?,
      last_name: row.try_get("last_name")?,
      email: row.try_get("email")?,
      phone: row.try_get("phone")?,
      specialty: row.try_get("specialty")?,
      license_number: row.try_get("license_number")?,
      availability: row
        .try_get::<Json<Vec<AvailabilitySlot>>, _>("availability")?
        .0,
    })
  }
}
