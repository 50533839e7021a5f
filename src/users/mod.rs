pub mod dto;
pub mod model;
pub mod repository;
pub mod rto;
pub mod service;

use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use dto::register_user_dto::RegisterUserDto;
use dto::update_permissions_dto::UpdatePermissionsDto;
use dto::update_role_dto::UpdateRoleDto;
use dto::update_user_dto::UpdateUserDto;
use dto::user_path_dto::UserPathDto;
use log::{error, info, warn};
use model::user::User;
use repository::user_repository::UserRepository;
use rto::user_rto::UserRto;
use service::UserServiceError;
use validator::Validate;

use crate::shared::http_error::{
  bad_request, conflict, internal_server_error, not_found, HttpError,
};
use crate::shared::validated_json::ValidatedJson;
use crate::AppState;

pub async fn list_users<UR: UserRepository + 'static>(
  data: web::Data<AppState<UR>>,
) -> impl Responder {
  service::list_users(&data.user_repository)
    .await
    .map(|users| {
      let rtos: Vec<UserRto> = users.into_iter().map(UserRto::from).collect();
      HttpResponse::Ok().content_type("application/json").json(rtos)
    })
    .unwrap_or_else(failed_user_operation)
}

pub async fn register_user<UR: UserRepository + 'static>(
  data: web::Data<AppState<UR>>,
  payload: ValidatedJson<RegisterUserDto>,
) -> impl Responder {
  service::register_user(
    &data.user_repository,
    data.config.bcrypt_cost,
    payload.into_inner(),
  )
  .await
  .map(user_created)
  .unwrap_or_else(failed_user_operation)
}

pub async fn update_user<UR: UserRepository + 'static>(
  data: web::Data<AppState<UR>>,
  path: web::Path<UserPathDto>,
  payload: ValidatedJson<UpdateUserDto>,
) -> impl Responder {
  if let Err(validation_errors) = path.validate() {
    return bad_request(HttpError::validation(&validation_errors));
  }
  service::update_user(
    &data.user_repository,
    data.config.bcrypt_cost,
    &path.uuid,
    payload.into_inner(),
  )
  .await
  .map(user_found)
  .unwrap_or_else(failed_user_operation)
}

pub async fn update_user_role<UR: UserRepository + 'static>(
  data: web::Data<AppState<UR>>,
  path: web::Path<UserPathDto>,
  payload: ValidatedJson<UpdateRoleDto>,
) -> impl Responder {
  if let Err(validation_errors) = path.validate() {
    return bad_request(HttpError::validation(&validation_errors));
  }
  service::update_role(&data.user_repository, &path.uuid, payload.0.role)
    .await
    .map(user_found)
    .unwrap_or_else(failed_user_operation)
}

pub async fn update_user_permissions<UR: UserRepository + 'static>(
  data: web::Data<AppState<UR>>,
  path: web::Path<UserPathDto>,
  payload: ValidatedJson<UpdatePermissionsDto>,
) -> impl Responder {
  if let Err(validation_errors) = path.validate() {
    return bad_request(HttpError::validation(&validation_errors));
  }
  service::update_permissions(
    &data.user_repository,
    &path.uuid,
    payload.into_inner().permissions,
  )
  .await
  .map(user_found)
  .unwrap_or_else(failed_user_operation)
}

fn user_found(user: User) -> HttpResponse {
  HttpResponse::Ok()
    .content_type("application/json")
    .json(UserRto::from(user))
}

fn user_created(user: User) -> HttpResponse {
  info!("Registered user {}", user.uuid);
  HttpResponse::Created()
    .content_type("application/json")
    .append_header((header::LOCATION, format!("/users/{}", user.uuid)))
    .json(UserRto::from(user))
}

fn failed_user_operation(error: UserServiceError) -> HttpResponse {
  match error {
    UserServiceError::Validation(validation_errors) => {
      bad_request(HttpError::validation(&validation_errors))
    }
    UserServiceError::NotFound => {
      warn!("User not found");
      not_found("User not found")
    }
    UserServiceError::Conflict(field) => {
      warn!("Rejected duplicate user {}", field);
      conflict(&field)
    }
    error @ (UserServiceError::Hashing(_) | UserServiceError::Repository(_)) => {
      error!("{}", error);
      internal_server_error()
    }
  }
}

// Transform User domain to RTO
impl From<User> for UserRto {
  fn from(user: User) -> Self {
    Self {
      uuid: user.uuid,
      first_name: user.first_name,
      last_name: user.last_name,
      email: user.email,
      phone: user.phone,
      role: user.role,
      username: user.username,
      permissions: user.permissions,
      created_at: user.created_at,
      updated_at: user.updated_at,
    }
  }
}
