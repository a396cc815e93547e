use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::application::auth::{LoginUserResponse, RegisterUserResponse};
use crate::domain::ClinicError;
use crate::domain::auth::entities::normalize_email;
use crate::domain::medicine::{Medicine, price_in_range};
use crate::domain::patient::Patient;

/// Envelope shared by every JSON response
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
  pub success: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<Vec<FieldError>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
}

impl<T> ApiResponse<T> {
  pub fn ok(message: impl Into<String>, data: T) -> Self {
    Self {
      success: true,
      message: message.into(),
      error: None,
      data: Some(data),
    }
  }
}

impl ApiResponse<()> {
  /// Success without a payload
  pub fn done(message: impl Into<String>) -> Self {
    Self {
      success: true,
      message: message.into(),
      error: None,
      data: None,
    }
  }

  pub fn failure(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
    Self {
      success: false,
      message: message.into(),
      error: Some(errors),
      data: None,
    }
  }
}

/// One entry of the envelope's `error` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
  pub message: String,
}

impl FieldError {
  pub fn for_field(field: impl Into<String>) -> Self {
    let field = field.into();
    Self {
      message: format!("invalid input on field {}", field),
      field: Some(field),
    }
  }

  pub fn message(message: impl Into<String>) -> Self {
    Self {
      field: None,
      message: message.into(),
    }
  }
}

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(required, email, length(max = 255))]
  pub email: Option<String>,

  #[validate(required, length(min = 6, max = 128))]
  pub password: Option<String>,

  #[validate(required, range(min = 1))]
  pub role_id: Option<i32>,
}

impl RegisterRequest {
  /// Trims and lower-cases the email so validation sees the stored form
  pub fn normalized(mut self) -> Self {
    self.email = self.email.as_deref().map(normalize_email);
    self
  }
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(required, length(min = 1))]
  pub email: Option<String>,

  #[validate(required, length(min = 1))]
  pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  pub user_id: i64,
  pub email: String,
  pub role_id: i32,
}

impl From<RegisterUserResponse> for RegisterResponse {
  fn from(response: RegisterUserResponse) -> Self {
    Self {
      user_id: response.user_id,
      email: response.email,
      role_id: response.role_id,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  pub token: String,
}

impl From<LoginUserResponse> for LoginResponse {
  fn from(response: LoginUserResponse) -> Self {
    Self {
      token: response.token,
    }
  }
}

/// Request for adding a patient; `dob` is `YYYY-MM-DD`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddPatientRequest {
  #[validate(required, length(min = 1, max = 255))]
  pub full_name: Option<String>,

  #[validate(required, length(min = 1))]
  pub dob: Option<String>,

  #[validate(required, length(min = 1, max = 32))]
  pub gender: Option<String>,

  #[validate(required, length(min = 1))]
  pub address: Option<String>,

  #[validate(required, length(min = 1, max = 32))]
  pub phone: Option<String>,
}

/// Partial patient update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePatientRequest {
  #[validate(length(min = 1, max = 255))]
  pub full_name: Option<String>,

  #[validate(length(min = 1))]
  pub dob: Option<String>,

  #[validate(length(min = 1, max = 32))]
  pub gender: Option<String>,

  #[validate(length(min = 1))]
  pub address: Option<String>,

  #[validate(length(min = 1, max = 32))]
  pub phone: Option<String>,
}

/// Raw pagination query; parsed by the handler so bad values get a
/// domain message instead of a deserializer error
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
  pub page: Option<String>,
  pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientResponse {
  pub patient_id: i64,
  pub full_name: String,
  pub dob: NaiveDate,
  pub gender: String,
  pub address: String,
  pub phone: String,
  pub created_by: i64,
}

impl From<Patient> for PatientResponse {
  fn from(patient: Patient) -> Self {
    Self {
      patient_id: patient.id,
      full_name: patient.full_name,
      dob: patient.dob,
      gender: patient.gender,
      address: patient.address,
      phone: patient.phone,
      created_by: patient.created_by,
    }
  }
}

/// Request for adding a medicine. `price` accepts a decimal string
/// ("12.50") or a JSON number; numbers are read from their literal digits,
/// never through `f64`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMedicineRequest {
  #[validate(required, length(min = 1, max = 255))]
  pub name: Option<String>,

  #[validate(required, range(min = 0))]
  pub stock: Option<i32>,

  #[serde(
    default,
    deserialize_with = "rust_decimal::serde::arbitrary_precision_option::deserialize"
  )]
  #[validate(required, custom(function = "validate_price"))]
  pub price: Option<Decimal>,
}

/// Non-negative, below 10^12, with at most two fractional digits
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
  if *price < Decimal::ZERO {
    return Err(ValidationError::new("price_negative"));
  }
  if !price_in_range(price) {
    return Err(ValidationError::new("price_too_large"));
  }
  if price.normalize().scale() > 2 {
    return Err(ValidationError::new("price_precision"));
  }
  Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicineResponse {
  pub id: i64,
  pub name: String,
  pub stock: i32,
  pub price: Decimal,
}

impl From<Medicine> for MedicineResponse {
  fn from(medicine: Medicine) -> Self {
    Self {
      id: medicine.id,
      name: medicine.name,
      stock: medicine.stock,
      price: medicine.price,
    }
  }
}

/// Parses a `YYYY-MM-DD` date of birth
pub fn parse_dob(value: &str) -> Result<NaiveDate, ClinicError> {
  NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
    .map_err(|_| ClinicError::invalid_action("dob format not valid"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_register_request_validation() {
    let valid = RegisterRequest {
      email: Some("a@x.com".to_string()),
      password: Some("secret1".to_string()),
      role_id: Some(2),
    };
    assert!(valid.validate().is_ok());

    let invalid = RegisterRequest {
      email: Some("not-an-email".to_string()),
      password: Some("short".to_string()),
      role_id: None,
    };
    let errors = invalid.validate().unwrap_err();
    let fields = errors.field_errors();
    assert!(fields.contains_key("email"));
    assert!(fields.contains_key("password"));
    assert!(fields.contains_key("role_id"));
  }

  #[test]
  fn test_register_email_is_normalized_before_validation() {
    let request = RegisterRequest {
      email: Some("  Doctor@Clinic.test ".to_string()),
      password: Some("secret1".to_string()),
      role_id: Some(1),
    }
    .normalized();

    assert_eq!(request.email.as_deref(), Some("doctor@clinic.test"));
    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_register_email_fits_column() {
    let request = RegisterRequest {
      email: Some(format!(
        "{}@{}.com",
        "a".repeat(60),
        vec!["b".repeat(50); 4].join(".")
      )),
      password: Some("secret1".to_string()),
      role_id: Some(1),
    }
    .normalized();

    let errors = request.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("email"));
  }

  #[test]
  fn test_medicine_price_keeps_literal_digits() {
    let request: AddMedicineRequest =
      serde_json::from_str(r#"{"name":"Saline","stock":1,"price":12345678901234567.5}"#).unwrap();
    assert_eq!(request.price, Some(dec!(12345678901234567.5)));

    let request: AddMedicineRequest =
      serde_json::from_str(r#"{"name":"Saline","stock":1,"price":"0.10"}"#).unwrap();
    assert_eq!(request.price, Some(dec!(0.10)));

    let request: AddMedicineRequest =
      serde_json::from_str(r#"{"name":"Saline","stock":1}"#).unwrap();
    assert_eq!(request.price, None);
    assert!(request.validate().unwrap_err().field_errors().contains_key("price"));
  }

  #[test]
  fn test_price_rules() {
    assert!(validate_price(&dec!(0)).is_ok());
    assert!(validate_price(&dec!(12.50)).is_ok());
    assert!(validate_price(&dec!(12.500)).is_ok());
    assert!(validate_price(&dec!(-1)).is_err());
    assert!(validate_price(&dec!(0.001)).is_err());
    assert!(validate_price(&dec!(999999999999.99)).is_ok());
    assert!(validate_price(&dec!(1000000000000.00)).is_err());
  }

  #[test]
  fn test_parse_dob() {
    assert_eq!(
      parse_dob("1990-05-01").unwrap(),
      NaiveDate::from_ymd_opt(1990, 5, 1).unwrap()
    );
    assert_eq!(
      parse_dob("01/05/1990").unwrap_err(),
      ClinicError::invalid_action("dob format not valid")
    );
    assert!(parse_dob("1990-02-30").is_err());
  }

  #[test]
  fn test_envelope_omits_empty_parts() {
    let json = serde_json::to_value(ApiResponse::done("patient deleted")).unwrap();
    assert_eq!(
      json,
      serde_json::json!({"success": true, "message": "patient deleted"})
    );

    let json = serde_json::to_value(ApiResponse::failure(
      "invalid input",
      vec![FieldError::for_field("email")],
    ))
    .unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"][0]["field"], "email");
    assert_eq!(json["error"][0]["message"], "invalid input on field email");
  }
}
