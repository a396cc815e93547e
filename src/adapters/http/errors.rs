use actix_web::{
  HttpRequest, HttpResponse,
  error::{JsonPayloadError, PathError, QueryPayloadError, ResponseError},
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::{ClinicError, ErrorKind};

use super::dtos::{ApiResponse, FieldError};

/// The only error type rendered by the HTTP layer
#[derive(Debug)]
pub enum ApiError {
  /// Field validation failures (400), one entry per field
  Validation(Vec<FieldError>),

  /// Domain error, status taken from its kind
  Domain(ClinicError),

  /// Unexpected failure (500); the detail is logged, never returned
  Internal(String),
}

impl ApiError {
  pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
      ErrorKind::InvalidAction | ErrorKind::AlreadyExist => StatusCode::BAD_REQUEST,
      ErrorKind::NotExist => StatusCode::NOT_FOUND,
      ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
      ErrorKind::CommonErr | ErrorKind::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn envelope(&self) -> ApiResponse<()> {
    match self {
      ApiError::Validation(fields) => ApiResponse::failure("invalid input", fields.clone()),
      ApiError::Domain(err) => {
        ApiResponse::failure(err.message(), vec![FieldError::message(err.message())])
      }
      ApiError::Internal(_) => ApiResponse::failure(
        "internal server error",
        vec![FieldError::message("internal server error")],
      ),
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(fields) => write!(f, "Validation error on {} field(s)", fields.len()),
      ApiError::Domain(err) => write!(f, "{}: {}", err.kind(), err),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Domain(err) => Self::status_for(err.kind()),
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!("request failed: {}", self);
    }

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(self.envelope())
  }
}

impl From<ClinicError> for ApiError {
  fn from(error: ClinicError) -> Self {
    ApiError::Domain(error)
  }
}

/// All invalid fields of one validation pass, sorted by field name
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut fields: Vec<String> = errors
      .field_errors()
      .keys()
      .map(|field| field.to_string())
      .collect();
    fields.sort();

    ApiError::Validation(fields.into_iter().map(FieldError::for_field).collect())
  }
}

/// Malformed JSON bodies become a 400 envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  tracing::debug!("rejected request body: {}", err);
  ApiError::Domain(ClinicError::invalid_action("invalid request body")).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  tracing::debug!("rejected query string: {}", err);
  ApiError::Domain(ClinicError::invalid_action("invalid query parameters")).into()
}

/// Path segments are only ids
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
  tracing::debug!("rejected path: {}", err);
  ApiError::Domain(ClinicError::invalid_action("id not valid")).into()
}

/// Fallback for routes that do not exist
pub async fn not_found_handler() -> Result<HttpResponse, ApiError> {
  Err(ApiError::Domain(ClinicError::not_exist("route not found")))
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::to_bytes;
  use validator::Validate;

  #[test]
  fn test_kind_to_status_table() {
    let cases = [
      (ClinicError::invalid_action("x"), StatusCode::BAD_REQUEST),
      (ClinicError::already_exist("x"), StatusCode::BAD_REQUEST),
      (ClinicError::not_exist("x"), StatusCode::NOT_FOUND),
      (ClinicError::unauthorized("x"), StatusCode::UNAUTHORIZED),
      (ClinicError::common(), StatusCode::INTERNAL_SERVER_ERROR),
      (ClinicError::database(), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (err, status) in cases {
      assert_eq!(ApiError::from(err).status_code(), status);
    }
    assert_eq!(
      ApiError::Internal("boom".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[actix_web::test]
  async fn test_domain_error_envelope() {
    let response = ApiError::from(ClinicError::not_exist("patient not found")).error_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = to_bytes(response.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "patient not found");
    assert_eq!(json["error"][0]["message"], "patient not found");
    assert!(json.get("data").is_none());
  }

  #[actix_web::test]
  async fn test_internal_detail_is_not_leaked() {
    let response = ApiError::Internal("relation \"users\" does not exist".to_string())
      .error_response();

    let body = to_bytes(response.into_body()).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(!text.contains("relation"));
    assert!(text.contains("internal server error"));
  }

  #[derive(Validate)]
  struct Probe {
    #[validate(length(min = 3))]
    zeta: String,
    #[validate(range(min = 1))]
    alpha: i32,
  }

  #[test]
  fn test_validation_errors_are_sorted_per_field() {
    let probe = Probe {
      zeta: "a".to_string(),
      alpha: 0,
    };

    let ApiError::Validation(fields) = ApiError::from(probe.validate().unwrap_err()) else {
      panic!("expected validation error");
    };
    assert_eq!(
      fields,
      vec![
        FieldError::for_field("alpha"),
        FieldError::for_field("zeta")
      ]
    );
    assert_eq!(fields[0].message, "invalid input on field alpha");
  }
}
