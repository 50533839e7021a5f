pub mod create_admin_dto;
