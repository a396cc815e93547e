use actix_web::{middleware::Condition, web};
use std::sync::Arc;

use super::errors::{
  json_error_handler, not_found_handler, path_error_handler, query_error_handler,
};
use super::handlers::{
  auth::{login_handler, register_handler},
  health_handler,
  medicines::add_medicine_handler,
  patients::{
    add_patient_handler, delete_patient_handler, get_patient_handler, list_patients_handler,
    restore_patient_handler, update_patient_handler,
  },
  ping_handler,
};
use super::middleware::{JwtAuthMiddleware, RoleGuard};
use crate::application::auth::{LoginUserUseCase, RegisterUserUseCase};
use crate::application::medicine::AddMedicineUseCase;
use crate::application::patient::{
  AddPatientUseCase, DeletePatientUseCase, GetPatientUseCase, ListPatientsUseCase,
  RestorePatientUseCase, UpdatePatientUseCase,
};
use crate::domain::Transactor;
use crate::domain::auth::{PasswordHasher, TokenService, UserRepository};
use crate::domain::medicine::MedicineRepository;
use crate::domain::patient::PatientRepository;

/// Every use case the API needs, built once per process and shared by workers
pub struct ApiDependencies<T: Transactor> {
  pub register_user: Arc<RegisterUserUseCase<T>>,
  pub login_user: Arc<LoginUserUseCase<T>>,
  pub add_patient: Arc<AddPatientUseCase<T>>,
  pub list_patients: Arc<ListPatientsUseCase<T>>,
  pub get_patient: Arc<GetPatientUseCase<T>>,
  pub update_patient: Arc<UpdatePatientUseCase<T>>,
  pub delete_patient: Arc<DeletePatientUseCase<T>>,
  pub restore_patient: Arc<RestorePatientUseCase<T>>,
  pub add_medicine: Arc<AddMedicineUseCase<T>>,
  pub tokens: Arc<dyn TokenService>,
  /// When set, only this role may call the medicine endpoints
  pub medicine_role_id: Option<i32>,
}

impl<T: Transactor> ApiDependencies<T> {
  pub fn new(
    transactor: Arc<T>,
    users: Arc<dyn UserRepository<T::Tx>>,
    patients: Arc<dyn PatientRepository<T::Tx>>,
    medicines: Arc<dyn MedicineRepository<T::Tx>>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    medicine_role_id: Option<i32>,
  ) -> Self {
    Self {
      register_user: Arc::new(RegisterUserUseCase::new(
        transactor.clone(),
        users.clone(),
        hasher.clone(),
      )),
      login_user: Arc::new(LoginUserUseCase::new(
        transactor.clone(),
        users,
        hasher,
        tokens.clone(),
      )),
      add_patient: Arc::new(AddPatientUseCase::new(transactor.clone(), patients.clone())),
      list_patients: Arc::new(ListPatientsUseCase::new(
        transactor.clone(),
        patients.clone(),
      )),
      get_patient: Arc::new(GetPatientUseCase::new(transactor.clone(), patients.clone())),
      update_patient: Arc::new(UpdatePatientUseCase::new(
        transactor.clone(),
        patients.clone(),
      )),
      delete_patient: Arc::new(DeletePatientUseCase::new(
        transactor.clone(),
        patients.clone(),
      )),
      restore_patient: Arc::new(RestorePatientUseCase::new(transactor.clone(), patients)),
      add_medicine: Arc::new(AddMedicineUseCase::new(transactor, medicines)),
      tokens,
      medicine_role_id,
    }
  }
}

// Manual impl: a derive would demand `T: Clone`.
impl<T: Transactor> Clone for ApiDependencies<T> {
  fn clone(&self) -> Self {
    Self {
      register_user: self.register_user.clone(),
      login_user: self.login_user.clone(),
      add_patient: self.add_patient.clone(),
      list_patients: self.list_patients.clone(),
      get_patient: self.get_patient.clone(),
      update_patient: self.update_patient.clone(),
      delete_patient: self.delete_patient.clone(),
      restore_patient: self.restore_patient.clone(),
      add_medicine: self.add_medicine.clone(),
      tokens: self.tokens.clone(),
      medicine_role_id: self.medicine_role_id,
    }
  }
}

/// Configure the whole application: probes, the versioned API and the
/// envelope-shaped 404 fallback
///
/// Must be used through `App::configure`, otherwise the default service
/// is ignored.
pub fn configure_app<T: Transactor>(cfg: &mut web::ServiceConfig, deps: &ApiDependencies<T>) {
  cfg
    .route("/ping", web::get().to(ping_handler))
    .route("/health", web::get().to(health_handler))
    .service(web::scope("/api/v1").configure(|api| configure_api_routes(api, deps)))
    .default_service(web::to(not_found_handler));
}

/// Configure the `/api/v1` routes
///
/// Public:
/// - POST /register
/// - POST /login
///
/// Bearer token required:
/// - POST, GET /patients
/// - GET, PATCH, DELETE /patients/{id}
/// - PATCH /patients/{id}/restore
/// - POST /medicines (also role-gated when `medicine_role_id` is set)
pub fn configure_api_routes<T: Transactor>(
  cfg: &mut web::ServiceConfig,
  deps: &ApiDependencies<T>,
) {
  let medicine_role = deps.medicine_role_id;

  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .app_data(web::Data::new(deps.register_user.clone()))
    .app_data(web::Data::new(deps.login_user.clone()))
    .app_data(web::Data::new(deps.add_patient.clone()))
    .app_data(web::Data::new(deps.list_patients.clone()))
    .app_data(web::Data::new(deps.get_patient.clone()))
    .app_data(web::Data::new(deps.update_patient.clone()))
    .app_data(web::Data::new(deps.delete_patient.clone()))
    .app_data(web::Data::new(deps.restore_patient.clone()))
    .app_data(web::Data::new(deps.add_medicine.clone()))
    .route("/register", web::post().to(register_handler::<T>))
    .route("/login", web::post().to(login_handler::<T>))
    .service(
      web::scope("/patients")
        .wrap(JwtAuthMiddleware::new(deps.tokens.clone()))
        .route("", web::post().to(add_patient_handler::<T>))
        .route("", web::get().to(list_patients_handler::<T>))
        .route("/{id}", web::get().to(get_patient_handler::<T>))
        .route("/{id}", web::patch().to(update_patient_handler::<T>))
        .route("/{id}", web::delete().to(delete_patient_handler::<T>))
        .route("/{id}/restore", web::patch().to(restore_patient_handler::<T>)),
    )
    .service(
      web::scope("/medicines")
        // Role check runs after authentication: the last `wrap` is outermost.
        .wrap(Condition::new(
          medicine_role.is_some(),
          RoleGuard::new(medicine_role.unwrap_or_default()),
        ))
        .wrap(JwtAuthMiddleware::new(deps.tokens.clone()))
        .route("", web::post().to(add_medicine_handler::<T>)),
    );
}
