//! Login and registration form state for the clinic front end.
//!
//! Each form keeps its values, touched flags and per-field errors, validates
//! synchronously with `validator` rules and only then issues a single request
//! through a [`api::ClinicApi`].

pub mod api;
pub mod form;
pub mod login;
pub mod registration;
