pub mod create_patient_dto;
