pub mod create_doctor_dto;
