pub mod dto;
pub mod model;
pub mod repository;
pub mod rto;

use actix_web::{http::header, web, HttpResponse, Responder};
use dto::create_doctor_dto::CreateDoctorDto;
use log::{error, info, warn};
use model::Doctor;
use repository::doctor_repository::{
  CreateDoctor, DoctorRepository, DoctorRepositoryError,
};
use rto::get_doctor_rto::GetDoctorRto;

use crate::custom_nanoid;
use crate::shared::http_error::{conflict, internal_server_error};
use crate::shared::validated_json::ValidatedJson;

pub async fn list_doctors<DR: DoctorRepository + 'static>(
  doctor_repository: web::Data<DR>,
) -> impl Responder {
  doctor_repository
    .find_all()
    .await
    .map(|doctors| {
      let rtos: Vec<GetDoctorRto> =
        doctors.into_iter().map(GetDoctorRto::from).collect();
      HttpResponse::Ok().content_type("application/json").json(rtos)
    })
    .unwrap_or_else(failed_doctor_operation)
}

pub async fn create_doctor<DR: DoctorRepository + 'static>(
  doctor_repository: web::Data<DR>,
  dto: ValidatedJson<CreateDoctorDto>,
) -> impl Responder {
  doctor_repository
    .create(CreateDoctor::from(dto.into_inner()))
    .await
    .map(doctor_created)
    .unwrap_or_else(failed_doctor_operation)
}

fn doctor_created(doctor: Doctor) -> HttpResponse {
  info!("Created doctor {}", doctor.uuid);
  HttpResponse::Created()
    .content_type("application/json")
    .append_header((header::LOCATION, format!("/doctors/{}", doctor.uuid)))
    .json(GetDoctorRto::from(doctor))
}

fn failed_doctor_operation(error: DoctorRepositoryError) -> HttpResponse {
  match error {
    DoctorRepositoryError::UniqueViolation(field) => {
      warn!("Rejected duplicate doctor {}", field);
      conflict(&field)
    }
    DoctorRepositoryError::DatabaseError(error) => {
      error!("Doctor store failure: {}", error);
      internal_server_error()
    }
  }
}

impl From<CreateDoctorDto> for CreateDoctor {
  fn from(dto: CreateDoctorDto) -> Self {
    Self {
      uuid: custom_nanoid(),
      first_name: dto.first_name,
      last_name: dto.last_name,
      email: dto.email,
      phone: dto.phone,
      specialty: dto.specialty,
      license_number: dto.license_number,
      availability: dto.availability,
    }
  }
}

impl From<Doctor> for GetDoctorRto {
  fn from(doctor: Doctor) -> Self {
    Self {
      uuid: doctor.uuid,
      first_name: doctor.first_name,
      last_name: doctor.last_name,
      email: doctor.email,
      phone: doctor.phone,
      specialty: doctor.specialty,
      license_number: doctor.license_number,
      availability: doctor.availability,
      created_at: doctor.created_at,
      updated_at: doctor.updated_at,
    }
  }
}
