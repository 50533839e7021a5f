use std::sync::Arc;

use sqlx::types::Json;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres, Row};
use thiserror::Error;

use crate::shared::database::{unique_violation_field, Database};
use crate::shared::{permission::Permission, role::Role};
use crate::users::model::user::User;

#[derive(Debug, Error)]
pub enum UserRepositoryError {
  #[error("Database error: {0}")]
  DatabaseError(sqlx::Error),

  #[error("Duplicate value for unique field `{0}`")]
  UniqueViolation(String),
}

impl From<sqlx::Error> for UserRepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match unique_violation_field(&error, "users") {
      Some(field) => UserRepositoryError::UniqueViolation(field),
      None => UserRepositoryError::DatabaseError(error),
    }
  }
}

pub trait UserRepository {
  async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError>;
  async fn find_one(&self, uuid: &str)
    -> Result<Option<User>, UserRepositoryError>;
  async fn create(
    &self,
    create_user: CreateUser,
  ) -> Result<User, UserRepositoryError>;
  /// Returns `None` when no user has the given uuid.
  async fn update(
    &self,
    uuid: &str,
    changes: UserChanges,
  ) -> Result<Option<User>, UserRepositoryError>;
}

pub struct UserRepositoryImpl {
  pool: Arc<Pool<Postgres>>,
}

impl UserRepositoryImpl {
  pub fn new(database: Arc<Database>) -> Self {
    Self {
      pool: database.pool.clone(),
    }
  }
}

impl UserRepository for UserRepositoryImpl {
  async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
    let users = sqlx::query_as::<_, User>(
      "SELECT * FROM users ORDER BY created_at, uuid",
    )
    .fetch_all(&*self.pool)
    .await?;
    Ok(users)
  }

  async fn find_one(
    &self,
    uuid: &str,
  ) -> Result<Option<User>, UserRepositoryError> {
    let user =
      sqlx::query_as::<_, User>("SELECT * FROM users WHERE uuid = $1 LIMIT 1")
        .bind(uuid)
        .fetch_optional(&*self.pool)
        .await?;
    Ok(user)
  }

  async fn create(
    &self,
    create_user: CreateUser,
  ) -> Result<User, UserRepositoryError> {
    let query = r#"
      INSERT INTO users
        (uuid, first_name, last_name, email, phone, role, username, password_hash, permissions)
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
      RETURNING *
    "#;
    sqlx::query_as::<_, User>(query)
      .bind(&create_user.uuid)
      .bind(&create_user.first_name)
      .bind(&create_user.last_name)
      .bind(&create_user.email)
      .bind(&create_user.phone)
      .bind(create_user.role.map(|role| role.as_str()))
      .bind(&create_user.username)
      .bind(&create_user.password_hash)
      .bind(Json(&create_user.permissions))
      .fetch_one(&*self.pool)
      .await
      .map_err(UserRepositoryError::from)
  }

  async fn update(
    &self,
    uuid: &str,
    changes: UserChanges,
  ) -> Result<Option<User>, UserRepositoryError> {
    let query = r#"
      UPDATE users SET
        first_name = COALESCE($2, first_name),
        last_name = COALESCE($3, last_name),
        email = COALESCE($4, email),
        phone = COALESCE($5, phone),
        role = COALESCE($6, role),
        username = COALESCE($7, username),
        password_hash = COALESCE($8, password_hash),
        permissions = COALESCE($9, permissions),
        updated_at = now()
      WHERE uuid = $1
      RETURNING *
    "#;
    sqlx::query_as::<_, User>(query)
      .bind(uuid)
      .bind(changes.first_name)
      .bind(changes.last_name)
      .bind(changes.email)
      .bind(changes.phone)
      .bind(changes.role.map(|role| role.as_str()))
      .bind(changes.username)
      .bind(changes.password_hash)
      .bind(changes.permissions.map(Json))
      .fetch_optional(&*self.pool)
      .await
      .map_err(UserRepositoryError::from)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
  pub uuid: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub role: Option<Role>,
  pub username: String,
  pub password_hash: String,
  pub permissions: Vec<Permission>,
}

/// Fields to overwrite on an existing user; `None` leaves the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub role: Option<Role>,
  pub username: Option<String>,
  pub password_hash: Option<String>,
  pub permissions: Option<Vec<Permission>>,
}

impl<'r> FromRow<'r, PgRow> for User {
  fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
    let role = row
      .try_get::<Option<String>, _>("role")?
      .map(|role| role.parse::<Role>())
      .transpose()
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
    })
  }
}
