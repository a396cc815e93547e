use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use super::required;
use crate::adapters::http::{
  dtos::{
    AddPatientRequest, ApiResponse, PageQuery, PatientResponse, UpdatePatientRequest, parse_dob,
  },
  errors::ApiError,
  middleware::AuthUser,
};
use crate::application::patient::{
  AddPatientCommand, AddPatientUseCase, DeletePatientUseCase, GetPatientUseCase,
  ListPatientsUseCase, RestorePatientUseCase, UpdatePatientCommand, UpdatePatientUseCase,
};
use crate::domain::pagination::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
use crate::domain::patient::PatientChanges;
use crate::domain::{ClinicError, PageFilter, Transactor};

/// Missing or empty values fall back to the default
fn parse_page_param(value: Option<&str>, default: u32, message: &str) -> Result<u32, ClinicError> {
  match value.map(str::trim) {
    None | Some("") => Ok(default),
    Some(raw) => raw
      .parse::<u32>()
      .map_err(|_| ClinicError::invalid_action(message)),
  }
}

/// POST /api/v1/patients
pub async fn add_patient_handler<T: Transactor>(
  req: HttpRequest,
  request: web::Json<AddPatientRequest>,
  use_case: web::Data<Arc<AddPatientUseCase<T>>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = req.authenticated_user()?;
  let request = request.into_inner();

  let dob = parse_dob(&required(request.dob, "dob")?)?;
  let command = AddPatientCommand {
    full_name: required(request.full_name, "full_name")?,
    dob,
    gender: required(request.gender, "gender")?,
    address: required(request.address, "address")?,
    phone: required(request.phone, "phone")?,
    created_by: user.user_id,
  };

  let patient = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(ApiResponse::ok(
    "patient added",
    PatientResponse::from(patient),
  )))
}

/// GET /api/v1/patients?page=1&limit=10
pub async fn list_patients_handler<T: Transactor>(
  query: web::Query<PageQuery>,
  use_case: web::Data<Arc<ListPatientsUseCase<T>>>,
) -> Result<HttpResponse, ApiError> {
  let page = parse_page_param(query.page.as_deref(), DEFAULT_PAGE, "page not valid")?;
  let limit = parse_page_param(query.limit.as_deref(), DEFAULT_PAGE_LIMIT, "limit not valid")?;
  let filter = PageFilter::new(page, limit)?;

  let patients = use_case.execute(filter).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::ok(
    "patients fetched",
    patients.map(PatientResponse::from),
  )))
}

/// GET /api/v1/patients/{id}
pub async fn get_patient_handler<T: Transactor>(
  path: web::Path<i64>,
  use_case: web::Data<Arc<GetPatientUseCase<T>>>,
) -> Result<HttpResponse, ApiError> {
  let patient = use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::ok(
    "patient fetched",
    PatientResponse::from(patient),
  )))
}

/// PATCH /api/v1/patients/{id}
pub async fn update_patient_handler<T: Transactor>(
  path: web::Path<i64>,
  request: web::Json<UpdatePatientRequest>,
  use_case: web::Data<Arc<UpdatePatientUseCase<T>>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let dob = request.dob.as_deref().map(parse_dob).transpose()?;
  let command = UpdatePatientCommand {
    patient_id: path.into_inner(),
    changes: PatientChanges {
      full_name: request.full_name,
      dob,
      gender: request.gender,
      address: request.address,
      phone: request.phone,
    },
  };

  use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::done("patient updated")))
}

/// DELETE /api/v1/patients/{id}
pub async fn delete_patient_handler<T: Transactor>(
  path: web::Path<i64>,
  use_case: web::Data<Arc<DeletePatientUseCase<T>>>,
) -> Result<HttpResponse, ApiError> {
  use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::done("patient deleted")))
}

/// PATCH /api/v1/patients/{id}/restore
pub async fn restore_patient_handler<T: Transactor>(
  path: web::Path<i64>,
  use_case: web::Data<Arc<RestorePatientUseCase<T>>>,
) -> Result<HttpResponse, ApiError> {
  use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::done("patient restored")))
}
