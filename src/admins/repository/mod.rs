pub mod admin_repository;
