pub mod register_user_dto;
pub mod update_permissions_dto;
pub mod update_role_dto;
pub mod update_user_dto;
pub mod user_path_dto;
