pub mod auth;
pub mod medicines;
pub mod patients;

use actix_web::HttpResponse;

use crate::adapters::http::{dtos::FieldError, errors::ApiError};

/// Unwraps a field that validation already marked `required`
pub(crate) fn required<V>(value: Option<V>, field: &str) -> Result<V, ApiError> {
  value.ok_or_else(|| ApiError::Validation(vec![FieldError::for_field(field)]))
}

/// Liveness probe used by load balancers
pub async fn ping_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "message": "pong" }))
}

pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().body("OK")
}
