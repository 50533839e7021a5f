pub mod get_doctor_rto;
