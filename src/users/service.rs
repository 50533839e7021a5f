//! User operations over an explicitly passed repository handle.
//!
//! Every function reads or writes through the repository it is given and
//! returns the record as it exists after the operation.

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::custom_nanoid;
use crate::shared::password::{hash_password, PasswordError};
use crate::shared::permission::{dedup_permissions, Permission};
use crate::shared::role::Role;
use crate::users::dto::register_user_dto::RegisterUserDto;
use crate::users::dto::update_user_dto::UpdateUserDto;
use crate::users::model::user::User;
use crate::users::repository::user_repository::{
  CreateUser, UserChanges, UserRepository, UserRepositoryError,
};

#[derive(Debug, Error)]
pub enum UserServiceError {
  #[error("Validation failed: {0}")]
  Validation(#[from] ValidationErrors),

  #[error("User not found")]
  NotFound,

  #[error("{0} already exists")]
  Conflict(String),

  #[error("{0}")]
  Hashing(#[from] PasswordError),

  #[error("Repository error: {0}")]
  Repository(UserRepositoryError),
}

impl From<UserRepositoryError> for UserServiceError {
  fn from(error: UserRepositoryError) -> Self {
    match error {
      UserRepositoryError::UniqueViolation(field) => {
        UserServiceError::Conflict(field)
      }
      other => UserServiceError::Repository(other),
    }
  }
}

pub async fn list_users<UR: UserRepository>(
  user_repository: &UR,
) -> Result<Vec<User>, UserServiceError> {
  Ok(user_repository.find_all().await?)
}

pub async fn register_user<UR: UserRepository>(
  user_repository: &UR,
  hash_cost: u32,
  dto: RegisterUserDto,
) -> Result<User, UserServiceError> {
  dto.validate()?;
  let password_hash = hash_password(dto.password, hash_cost).await?;
  let create_user = CreateUser {
    uuid: custom_nanoid(),
    first_name: dto.first_name,
    last_name: dto.last_name,
    email: dto.email,
    phone: dto.phone,
    role: dto.role,
    username: dto.username,
    password_hash,
    permissions: dedup_permissions(dto.permissions),
  };
  Ok(user_repository.create(create_user).await?)
}

pub async fn update_user<UR: UserRepository>(
  user_repository: &UR,
  hash_cost: u32,
  uuid: &str,
  dto: UpdateUserDto,
) -> Result<User, UserServiceError> {
  dto.validate()?;
  let password_hash = match dto.password {
    Some(password) => Some(hash_password(password, hash_cost).await?),
    None => None,
  };
  let changes = UserChanges {
    first_name: dto.first_name,
    last_name: dto.last_name,
    email: dto.email,
    phone: dto.phone,
    role: dto.role,
    username: dto.username,
    password_hash,
    permissions: dto.permissions.map(dedup_permissions),
  };
  apply_changes(user_repository, uuid, changes).await
}

pub async fn update_role<UR: UserRepository>(
  user_repository: &UR,
  uuid: &str,
  role: Role,
) -> Result<User, UserServiceError> {
  let changes = UserChanges {
    role: Some(role),
    ..UserChanges::default()
  };
  apply_changes(user_repository, uuid, changes).await
}

/// Replaces the whole permission set; tags absent from `permissions` are dropped.
pub async fn update_permissions<UR: UserRepository>(
  user_repository: &UR,
  uuid: &str,
  permissions: Vec<Permission>,
) -> Result<User, UserServiceError> {
  let changes = UserChanges {
    permissions: Some(dedup_permissions(permissions)),
    ..UserChanges::default()
  };
  apply_changes(user_repository, uuid, changes).await
}

async fn apply_changes<UR: UserRepository>(
  user_repository: &UR,
  uuid: &str,
  changes: UserChanges,
) -> Result<User, UserServiceError> {
  user_repository
    .update(uuid, changes)
    .await?
    .ok_or(UserServiceError::NotFound)
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;
  use std::rc::Rc;
  use std::time::Duration;

  use super::*;
  use crate::helpers::tests::{fake_register_user_dto, TEST_HASH_COST};
  use crate::shared::password::verify_password;
  use crate::users::repository::user_repository::tests::InMemoryUserRepository;

  #[actix_rt::test]
  async fn test_register_then_list_contains_input() {
    let repository = InMemoryUserRepository::new();
    let dto = fake_register_user_dto();

    let created = register_user(&repository, TEST_HASH_COST, dto.clone())
      .await
      .unwrap();
    assert!(!created.uuid.is_empty());

    let users = list_users(&repository).await.unwrap();
    assert_eq!(users.len(), 1);
    let user = &users[0];
    assert_eq!(user.uuid, created.uuid);
    assert_eq!(user.first_name, dto.first_name);
    assert_eq!(user.last_name, dto.last_name);
    assert_eq!(user.email, dto.email);
    assert_eq!(user.phone, dto.phone);
    assert_eq!(user.role, dto.role);
    assert_eq!(user.username, dto.username);
    assert_eq!(user.permissions, dto.permissions);
    assert_ne!(user.password_hash, dto.password);
    assert!(verify_password(&dto.password, &user.password_hash).unwrap());
  }

  #[actix_rt::test]
  async fn test_register_keeps_other_tasks_running() {
    let repository = InMemoryUserRepository::new();
    let ticks = Rc::new(Cell::new(0u32));
    let ticker = actix_rt::spawn({
      let ticks = ticks.clone();
      async move {
        loop {
          actix_rt::time::sleep(Duration::from_millis(5)).await;
          ticks.set(ticks.get() + 1);
        }
      }
    });

    register_user(&repository, bcrypt::DEFAULT_COST, fake_register_user_dto())
      .await
      .unwrap();
    ticker.abort();

    assert!(ticks.get() > 0, "event loop was blocked while hashing");
  }

  #[actix_rt::test]
  async fn test_duplicate_email_is_rejected() {
    let repository = InMemoryUserRepository::new();
    let first = fake_register_user_dto();
    let mut second = fake_register_user_dto();
    second.email = first.email.clone();

    register_user(&repository, TEST_HASH_COST, first).await.unwrap();
    let error = register_user(&repository, TEST_HASH_COST, second)
      .await
      .unwrap_err();

    assert!(matches!(error, UserServiceError::Conflict(ref field) if field == "email"));
    assert_eq!(list_users(&repository).await.unwrap().len(), 1);
  }

  #[actix_rt::test]
  async fn test_duplicate_username_is_rejected() {
    let repository = InMemoryUserRepository::new();
    let first = fake_register_user_dto();
    let mut second = fake_register_user_dto();
    second.username = first.username.clone();

    register_user(&repository, TEST_HASH_COST, first).await.unwrap();
    let error = register_user(&repository, TEST_HASH_COST, second)
      .await
      .unwrap_err();

    assert!(
      matches!(error, UserServiceError::Conflict(ref field) if field == "username")
    );
    assert_eq!(list_users(&repository).await.unwrap().len(), 1);
  }

  #[actix_rt::test]
  async fn test_register_rejects_invalid_fields() {
    let repository = InMemoryUserRepository::new();
    let mut dto = fake_register_user_dto();
    dto.first_name = String::new();
    dto.email = String::from("not-an-email");

    let error = register_user(&repository, TEST_HASH_COST, dto)
      .await
      .unwrap_err();

    let UserServiceError::Validation(errors) = error else {
      panic!("expected a validation error");
    };
    let fields = errors.field_errors();
    assert_eq!(fields.len(), 2);
    assert!(list_users(&repository).await.unwrap().is_empty());
  }

  #[actix_rt::test]
  async fn test_update_changes_only_named_fields() {
    let repository = InMemoryUserRepository::new();
    let created =
      register_user(&repository, TEST_HASH_COST, fake_register_user_dto())
        .await
        .unwrap();

    let dto = UpdateUserDto {
      phone: Some(String::from("5550001111")),
      ..UpdateUserDto::default()
    };
    let updated = update_user(&repository, TEST_HASH_COST, &created.uuid, dto)
      .await
      .unwrap();

    let stored = repository.find_one(&created.uuid).await.unwrap().unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.phone, "5550001111");
    assert_eq!(stored.first_name, created.first_name);
    assert_eq!(stored.last_name, created.last_name);
    assert_eq!(stored.email, created.email);
    assert_eq!(stored.role, created.role);
    assert_eq!(stored.username, created.username);
    assert_eq!(stored.password_hash, created.password_hash);
    assert_eq!(stored.permissions, created.permissions);
    assert_eq!(stored.created_at, created.created_at);
    assert!(stored.updated_at >= created.updated_at);
  }

  #[actix_rt::test]
  async fn test_update_rehashes_password() {
    let repository = InMemoryUserRepository::new();
    let created =
      register_user(&repository, TEST_HASH_COST, fake_register_user_dto())
        .await
        .unwrap();

    let dto = UpdateUserDto {
      password: Some(String::from("new-password")),
      ..UpdateUserDto::default()
    };
    let updated = update_user(&repository, TEST_HASH_COST, &created.uuid, dto)
      .await
      .unwrap();

    assert!(verify_password("new-password", &updated.password_hash).unwrap());
  }

  #[actix_rt::test]
  async fn test_update_to_taken_email_is_rejected() {
    let repository = InMemoryUserRepository::new();
    let first =
      register_user(&repository, TEST_HASH_COST, fake_register_user_dto())
        .await
        .unwrap();
    let second =
      register_user(&repository, TEST_HASH_COST, fake_register_user_dto())
        .await
        .unwrap();

    let dto = UpdateUserDto {
      email: Some(first.email.clone()),
      ..UpdateUserDto::default()
    };
    let error = update_user(&repository, TEST_HASH_COST, &second.uuid, dto)
      .await
      .unwrap_err();

    assert!(matches!(error, UserServiceError::Conflict(_)));
    let stored = repository.find_one(&second.uuid).await.unwrap().unwrap();
    assert_eq!(stored.email, second.email);
  }

  #[actix_rt::test]
  async fn test_update_role_changes_only_role() {
    let repository = InMemoryUserRepository::new();
    let created =
      register_user(&repository, TEST_HASH_COST, fake_register_user_dto())
        .await
        .unwrap();

    let updated = update_role(&repository, &created.uuid, Role::Doctor)
      .await
      .unwrap();

    assert_eq!(updated.role, Some(Role::Doctor));
    assert_eq!(
      User {
        role: created.role,
        updated_at: created.updated_at,
        ..updated
      },
      created
    );
  }

  #[actix_rt::test]
  async fn test_update_permissions_replaces_set() {
    let repository = InMemoryUserRepository::new();
    let mut dto = fake_register_user_dto();
    dto.permissions = vec![Permission::ManageBilling, Permission::ViewReports];
    let created = register_user(&repository, TEST_HASH_COST, dto)
      .await
      .unwrap();

    let updated = update_permissions(
      &repository,
      &created.uuid,
      vec![Permission::ManageDoctors, Permission::ViewReports],
    )
    .await
    .unwrap();

    assert_eq!(
      updated.permissions,
      vec![Permission::ManageDoctors, Permission::ViewReports]
    );
    assert!(!updated.permissions.contains(&Permission::ManageBilling));
    assert_eq!(updated.role, created.role);
  }

  #[actix_rt::test]
  async fn test_mutations_on_missing_user_are_not_found() {
    let repository = InMemoryUserRepository::new();
    let missing = custom_nanoid();

    let update = update_user(
      &repository,
      TEST_HASH_COST,
      &missing,
      UpdateUserDto::default(),
    )
    .await;
    let role = update_role(&repository, &missing, Role::Admin).await;
    let permissions =
      update_permissions(&repository, &missing, vec![Permission::ViewReports])
        .await;

    assert!(matches!(update, Err(UserServiceError::NotFound)));
    assert!(matches!(role, Err(UserServiceError::NotFound)));
    assert!(matches!(permissions, Err(UserServiceError::NotFound)));
  }
}
