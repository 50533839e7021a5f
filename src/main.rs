use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};
use clinic_main::admins::repository::admin_repository::AdminRepositoryImpl;
use clinic_main::doctors::repository::doctor_repository::DoctorRepositoryImpl;
use clinic_main::patients::repository::patient_repository::PatientRepositoryImpl;
use clinic_main::shared::config::Config;
use clinic_main::shared::database::Database;
use clinic_main::users::repository::user_repository::UserRepositoryImpl;
use clinic_main::{config, Repositories};
use dotenv::dotenv;
use log::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  dotenv().ok();
  env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

  let app_config = Config::default();
  let server_address = app_config.server_address();

  let database = Database::new(&app_config).await.map_err(|err| {
    error!("Failed to prepare database: {}", err);
    std::io::Error::other(err.to_string())
  })?;
  let database = Arc::new(database);
  info!("Database ready, migrations applied");

  info!("Listening on http://{}", server_address);
  HttpServer::new(move || {
    App::new().wrap(Logger::default()).configure(|cfg| {
      let repositories = Repositories {
        users: UserRepositoryImpl::new(database.clone()),
        doctors: DoctorRepositoryImpl::new(database.clone()),
        patients: PatientRepositoryImpl::new(database.clone()),
        admins: AdminRepositoryImpl::new(database.clone()),
      };
      config(cfg, app_config.clone(), repositories)
    })
  })
  .bind(server_address)?
  .run()
  .await
}
