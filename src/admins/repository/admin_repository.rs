use std::sync::Arc;

use sqlx::types::Json;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres, Row};
use thiserror::Error;

use crate::admins::model::Admin;
use crate::shared::database::{unique_violation_field, Database};
use crate::shared::{permission::Permission, role::Role};

#[derive(Debug, Error)]
pub enum AdminRepositoryError {
  #[error("Database error: {0}")]
  DatabaseError(sqlx::Error),

  #[error("Duplicate value for unique field `{0}`")]
  UniqueViolation(String),
}

impl From<sqlx::Error> for AdminRepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match unique_violation_field(&error, "admins") {
      Some(field) => AdminRepositoryError::UniqueViolation(field),
      None => AdminRepositoryError::DatabaseError(error),
    }
  }
}

pub trait AdminRepository {
  async fn find_all(&self) -> Result<Vec<Admin>, AdminRepositoryError>;
  async fn create(
    &self,
    create_admin: CreateAdmin,
  ) -> Result<Admin, AdminRepositoryError>;
}

pub struct AdminRepositoryImpl {
  pool: Arc<Pool<Postgres>>,
}

impl AdminRepositoryImpl {
  pub fn new(database: Arc<Database>) -> Self {
    Self {
      pool: database.pool.clone(),
    }
  }
}

impl AdminRepository for AdminRepositoryImpl {
  async fn find_all(&self) -> Result<Vec<Admin>, AdminRepositoryError> {
    let admins = sqlx::query_as::<_, Admin>(
      "SELECT * FROM admins ORDER BY created_at, uuid",
    )
    .fetch_all(&*self.pool)
    .await?;
    Ok(admins)
  }

  async fn create(
    &self,
    create_admin: CreateAdmin,
  ) -> Result<Admin, AdminRepositoryError> {
    let query = r#"
      INSERT INTO admins
        (uuid, first_name, last_name, email, phone, role, username, password_hash, permissions, is_super_admin)
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
      RETURNING *
    "#;
    sqlx::query_as::<_, Admin>(query)
      .bind(&create_admin.uuid)
      .bind(&create_admin.first_name)
      .bind(&create_admin.last_name)
      .bind(&create_admin.email)
      .bind(&create_admin.phone)
      .bind(create_admin.role.as_str())
      .bind(&create_admin.username)
      .bind(&create_admin.password_hash)
      .bind(Json(&create_admin.permissions))
      .bind(create_admin.is_super_admin)
      .fetch_one(&*self.pool)
      .await
      .map_err(AdminRepositoryError::from)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAdmin {
  pub uuid: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub role: Role,
  pub username: String,
  pub password_hash: String,
  pub permissions: Vec<Permission>,
  pub is_super_admin: bool,
}

impl<'r> FromRow<'r, PgRow> for Admin {
  fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
    let role = row
      .try_get::<String, _>("role")?
      .parse::<Role>()
      .map_err(|error| sqlx::Error::Decode(Box::new(error)))?;
    Ok(Self {
      uuid: row.try_get("uuid")?,
      created_at: row.try_get("created_at")?,
      updated_at: row.try_get("updated_at")?,
      first_name: row.try_get("first_name")?,
      last_name: row.try_get("last_name")?,
      email: row.try_get("email")?,
      phone: row.try_get("phone")?,
      role,
      username: row.try_get("username")?,
      password_hash: row.try_get("password_hash")?,
      permissions: row.try_get::<Json<Vec<Permission>>, _>("permissions")?.0,
      is_super_admin: row.try_get("is_super_admin")?,
    })
  }
}
