pub mod config;
pub mod database;
pub mod http_error;
pub mod password;
pub mod permission;
pub mod role;
pub mod validated_json;
