pub mod dto;
pub mod model;
pub mod repository;
pub mod rto;

use actix_web::{http::header, web, HttpResponse, Responder};
use dto::create_admin_dto::CreateAdminDto;
use log::{error, info, warn};
use model::Admin;
use repository::admin_repository::{
  AdminRepository, AdminRepositoryError, CreateAdmin,
};
use rto::get_admin_rto::GetAdminRto;

use crate::custom_nanoid;
use crate::shared::config::Config;
use crate::shared::http_error::{conflict, internal_server_error};
use crate::shared::password::hash_password;
use crate::shared::permission::dedup_permissions;
use crate::shared::validated_json::ValidatedJson;

pub async fn list_admins<AR: AdminRepository + 'static>(
  admin_repository: web::Data<AR>,
) -> impl Responder {
  admin_repository
    .find_all()
    .await
    .map(|admins| {
      let rtos: Vec<GetAdminRto> =
        admins.into_iter().map(GetAdminRto::from).collect();
      HttpResponse::Ok().content_type("application/json").json(rtos)
    })
    .unwrap_or_else(failed_admin_operation)
}

pub async fn create_admin<AR: AdminRepository + 'static>(
  admin_repository: web::Data<AR>,
  config: web::Data<Config>,
  dto: ValidatedJson<CreateAdminDto>,
) -> impl Responder {
  let dto = dto.into_inner();
  let password_hash = match hash_password(
    dto.password.clone(),
    config.bcrypt_cost,
  )
  .await
  {
    Ok(password_hash) => password_hash,
    Err(error) => {
      error!("Failed to hash admin password: {}", error);
      return internal_server_error();
    }
  };
  admin_repository
    .create(CreateAdmin::from_dto(dto, password_hash))
    .await
    .map(admin_created)
    .unwrap_or_else(failed_admin_operation)
}

fn admin_created(admin: Admin) -> HttpResponse {
  info!("Created admin {}", admin.uuid);
  HttpResponse::Created()
    .content_type("application/json")
    .append_header((header::LOCATION, format!("/admins/{}", admin.uuid)))
    .json(GetAdminRto::from(admin))
}

fn failed_admin_operation(error: AdminRepositoryError) -> HttpResponse {
  match error {
    AdminRepositoryError::UniqueViolation(field) => {
      warn!("Rejected duplicate admin {}", field);
      conflict(&field)
    }
    AdminRepositoryError::DatabaseError(error) => {
      error!("Admin store failure: {}", error);
      internal_server_error()
    }
  }
}

impl CreateAdmin {
  fn from_dto(dto: CreateAdminDto, password_hash: String) -> Self {
    Self {
      uuid: custom_nanoid(),
      first_name: dto.first_name,
      last_name: dto.last_name,
      email: dto.email,
      phone: dto.phone,
      role: dto.role,
      username: dto.username,
      password_hash,
      permissions: dedup_permissions(dto.permissions),
      is_super_admin: dto.is_super_admin,
    }
  }
}

impl From<Admin> for GetAdminRto {
  fn from(admin: Admin) -> Self {
    Self {
      uuid: admin.uuid,
      first_name: admin.first_name,
      last_name: admin.last_name,
      email: admin.email,
      phone: admin.phone,
      role: admin.role,
      username: admin.username,
      permissions: admin.permissions,
      is_super_admin: admin.is_super_admin,
      created_at: admin.created_at,
      updated_at: admin.updated_at,
    }
  }
}
