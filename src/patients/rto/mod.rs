pub mod get_patient_rto;
