pub mod admins;
pub mod client;
pub mod doctors;
pub mod patients;
pub mod shared;
pub mod users;

use actix_governor::{Governor, GovernorConfig, GovernorConfigBuilder};
use actix_web::{web, HttpResponse, Responder};
use admins::repository::admin_repository::AdminRepository;
use admins::{create_admin, list_admins};
use doctors::repository::doctor_repository::DoctorRepository;
use doctors::{create_doctor, list_doctors};
use log::warn;
use nanoid::nanoid;
use patients::repository::patient_repository::PatientRepository;
use patients::{create_patient, list_patients};
use shared::config::Config;
use users::repository::user_repository::UserRepository;
use users::{
  list_users, register_user, update_user, update_user_permissions,
  update_user_role,
};

// This struct represents state
pub struct AppState<UR: UserRepository> {
  pub user_repository: UR,
  pub config: Config,
}

/// One store handle per collection, handed to the routes that use it.
pub struct Repositories<UR, DR, PR, AR> {
  pub users: UR,
  pub doctors: DR,
  pub patients: PR,
  pub admins: AR,
}

const ID_ALPHABET: [char; 62] = [
  '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e',
  'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't',
  'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
  'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X',
  'Y', 'Z',
];

/// URL-safe record identifier without `-` or `_`.
pub fn custom_nanoid() -> String {
  nanoid!(21, &ID_ALPHABET)
}

async fn health() -> impl Responder {
  HttpResponse::Ok()
    .json(serde_json::json!({ "status": "ok" }))
}

// Function to initialize the App
pub fn config<UR, DR, PR, AR>(
  cfg: &mut web::ServiceConfig,
  app_config: Config,
  repositories: Repositories<UR, DR, PR, AR>,
) where
  UR: UserRepository + 'static,
  DR: DoctorRepository + 'static,
  PR: PatientRepository + 'static,
  AR: AdminRepository + 'static,
{
  // Rate limit per peer IP address
  let governor_config = GovernorConfigBuilder::default()
    .requests_per_second(app_config.rate_limit_per_second)
    .burst_size(app_config.rate_limit_burst)
    .finish()
    .unwrap_or_else(|| {
      warn!("Rate limit settings must be non-zero, using defaults");
      GovernorConfig::default()
    });

  cfg
    .app_data(web::Data::new(AppState {
      user_repository: repositories.users,
      config: app_config.clone(),
    }))
    .app_data(web::Data::new(repositories.doctors))
    .app_data(web::Data::new(repositories.patients))
    .app_data(web::Data::new(repositories.admins))
    .app_data(web::Data::new(app_config))
    .route("/health", web::get().to(health))
    .service(
      web::resource("/register")
        .wrap(Governor::new(&governor_config))
        .route(web::post().to(register_user::<UR>)),
    )
    .service(
      web::scope("/users")
        .wrap(Governor::new(&governor_config))
        .route("", web::get().to(list_users::<UR>))
        .route("/{uuid}", web::put().to(update_user::<UR>))
        .route("/{uuid}/role", web::put().to(update_user_role::<UR>))
        .route(
          "/{uuid}/permissions",
          web::put().to(update_user_permissions::<UR>),
        ),
    )
    .service(
      web::scope("/admins")
        .wrap(Governor::new(&governor_config))
        .route("", web::get().to(list_admins::<AR>))
        .route("", web::post().to(create_admin::<AR>)),
    )
    .service(
      web::scope("/doctors")
        .wrap(Governor::new(&governor_config))
        .route("", web::get().to(list_doctors::<DR>))
        .route("", web::post().to(create_doctor::<DR>)),
    )
    .service(
      web::scope("/patients")
        .wrap(Governor::new(&governor_config))
        .route("", web::get().to(list_patients::<PR>))
        .route("", web::post().to(create_patient::<PR>)),
    );
}
