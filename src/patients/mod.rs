pub mod dto;
pub mod model;
pub mod repository;
pub mod rto;

use actix_web::{http::header, web, HttpResponse, Responder};
use dto::create_patient_dto::CreatePatientDto;
use log::{error, info, warn};
use model::Patient;
use repository::patient_repository::{
  CreatePatient, PatientRepository, PatientRepositoryError,
};
use rto::get_patient_rto::GetPatientRto;

use crate::custom_nanoid;
use crate::shared::http_error::{conflict, internal_server_error};
use crate::shared::validated_json::ValidatedJson;

pub async fn list_patients<PR: PatientRepository + 'static>(
  patient_repository: web::Data<PR>,
) -> impl Responder {
  patient_repository
    .find_all()
    .await
    .map(|patients| {
      let rtos: Vec<GetPatientRto> =
        patients.into_iter().map(GetPatientRto::from).collect();
      HttpResponse::Ok().content_type("application/json").json(rtos)
    })
    .unwrap_or_else(failed_patient_operation)
}

pub async fn create_patient<PR: PatientRepository + 'static>(
  patient_repository: web::Data<PR>,
  dto: ValidatedJson<CreatePatientDto>,
) -> impl Responder {
  patient_repository
    .create(CreatePatient::from(dto.into_inner()))
    .await
    .map(patient_created)
    .unwrap_or_else(failed_patient_operation)
}

fn patient_created(patient: Patient) -> HttpResponse {
  info!("Created patient {}", patient.uuid);
  HttpResponse::Created()
    .content_type("application/json")
    .append_header((header::LOCATION, format!("/patients/{}", patient.uuid)))
    .json(GetPatientRto::from(patient))
}

fn failed_patient_operation(error: PatientRepositoryError) -> HttpResponse {
  match error {
    PatientRepositoryError::UniqueViolation(field) => {
      warn!("Rejected duplicate patient {}", field);
      conflict(&field)
    }
    PatientRepositoryError::DatabaseError(error) => {
      error!("Patient store failure: {}", error);
      internal_server_error()
    }
  }
}

impl From<CreatePatientDto> for CreatePatient {
  fn from(dto: CreatePatientDto) -> Self {
    Self {
      uuid: custom_nanoid(),
      first_name: dto.first_name,
      last_name: dto.last_name,
      email: dto.email,
      phone: dto.phone,
      date_of_birth: dto.date_of_birth,
      gender: dto.gender,
      address: dto.address,
      medical_history: dto.medical_history,
    }
  }
}

impl From<Patient> for GetPatientRto {
  fn from(patient: Patient) -> Self {
    Self {
      uuid: patient.uuid,
      first_name: patient.first_name,
      last_name: patient.last_name,
      email: patient.email,
      phone: patient.phone,
      date_of_birth: patient.date_of_birth,
      gender: patient.gender,
      address: patient.address,
      medical_history: patient.medical_history,
      created_at: patient.created_at,
      updated_at: patient.updated_at,
    }
  }
}
