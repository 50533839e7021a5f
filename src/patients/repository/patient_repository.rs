use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres, Row};
use thiserror::Error;

use crate::patients::model::{Address, Gender, Patient};
use crate::shared::database::{unique_violation_field, Database};

#[derive(Debug, Error)]
pub enum PatientRepositoryError {
  #[error("Database error: {0}")]
  DatabaseError(sqlx::Error),

  #[error("Duplicate value for unique field `{0}`")]
  UniqueViolation(String),
}

impl From<sqlx::Error> for PatientRepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match unique_violation_field(&error, "patients") {
      Some(field) => PatientRepositoryError::UniqueViolation(field),
      None => PatientRepositoryError::DatabaseError(error),
    }
  }
}

pub trait PatientRepository {
  async fn find_all(&self) -> Result<Vec<Patient>, PatientRepositoryError>;
  async fn create(
    &self,
    create_patient: CreatePatient,
  ) -> Result<Patient, PatientRepositoryError>;
}

pub struct PatientRepositoryImpl {
  pool: Arc<Pool<Postgres>>,
}

impl PatientRepositoryImpl {
  pub fn new(database: Arc<Database>) -> Self {
    Self {
      pool: database.pool.clone(),
    }
  }
}

impl PatientRepository for PatientRepositoryImpl {
  async fn find_all(&self) -> Result<Vec<Patient>, PatientRepositoryError> {
    let patients = sqlx::query_as::<_, Patient>(
      "SELECT * FROM patients ORDER BY created_at, uuid",
    )
    .fetch_all(&*self.pool)
    .await?;
    Ok(patients)
  }

  async fn create(
    &self,
    create_patient: CreatePatient,
  ) -> Result<Patient, PatientRepositoryError> {
    let query = r#"
      INSERT INTO patients
        (uuid, first_name, last_name, email, phone, date_of_birth, gender, address, medical_history)
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
      RETURNING *
    "#;
    sqlx::query_as::<_, Patient>(query)
      .bind(&create_patient.uuid)
      .bind(&create_patient.first_name)
      .bind(&create_patient.last_name)
      .bind(&create_patient.email)
      .bind(&create_patient.phone)
      .bind(create_patient.date_of_birth)
      .bind(create_patient.gender.as_str())
      .bind(Json(&create_patient.address))
      .bind(Json(&create_patient.medical_history))
      .fetch_one(&*self.pool)
      .await
      .map_err(PatientRepositoryError::from)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePatient {
  pub uuid: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub date_of_birth: NaiveDate,
  pub gender: Gender,
  pub address: Address,
  pub medical_history: Vec<String>,
}

impl<'r> FromRow<'r, PgRow> for Patient {
  fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
    let gender = row
      .try_get::<String, _>("gender")?
      .parse::<Gender>()
      .map_err(|error| sqlx::Error::Decode(Box::new(error)))?;
    Ok(Self {
      uuid: row.try_get("uuid")?,
      created_at: row.try_get("created_at")?,
      updated_at: row.try_get("updated_at")?,
      first_name: row.try_get("first_name")?,
      last_name: row.try_get("last_name")?,
      email: row.try_get("email")?,
      phone: row.try_get("phone")?,
      date_of_birth: row.try_get("date_of_birth")?,
      gender,
      address: row.try_get::<Json<Address>, _>("address")?.0,
      medical_history: row.try_get::<Json<Vec<String>>, _>("medical_history")?.0,
    })
  }
}
