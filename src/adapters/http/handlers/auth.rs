use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use super::required;
use crate::adapters::http::{
  dtos::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
  errors::ApiError,
};
use crate::application::auth::{
  LoginUserCommand, LoginUserUseCase, RegisterUserCommand, RegisterUserUseCase,
};
use crate::domain::Transactor;

/// Handler for user registration
///
/// POST /api/v1/register
/// Body: RegisterRequest (JSON)
/// Response: RegisterResponse in the envelope, status 201
pub async fn register_handler<T: Transactor>(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase<T>>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner().normalized();
  request.validate()?;

  let command = RegisterUserCommand {
    email: required(request.email, "email")?,
    password: required(request.password, "password")?,
    role_id: required(request.role_id, "role_id")?,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(ApiResponse::ok(
    "user registered",
    RegisterResponse::from(response),
  )))
}

/// Handler for user login
///
/// POST /api/v1/login
/// Body: LoginRequest (JSON)
/// Response: `{token}` in the envelope, status 200
pub async fn login_handler<T: Transactor>(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase<T>>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = LoginUserCommand {
    email: required(request.email, "email")?,
    password: required(request.password, "password")?,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::ok(
    "login success",
    LoginResponse::from(response),
  )))
}
