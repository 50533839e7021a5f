pub mod get_admin_rto;
