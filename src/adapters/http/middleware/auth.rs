use actix_web::{
  Error, HttpMessage, HttpRequest, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header::AUTHORIZATION,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::adapters::http::errors::ApiError;
use crate::domain::auth::TokenService;
use crate::domain::{ClinicError, TokenError};

/// Identity attached to the request by `JwtAuthMiddleware`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
  pub user_id: i64,
  pub role_id: i32,
}

/// Bearer token authentication
///
/// Rejections, in the order they are checked (all 401):
/// 1. no `Authorization` header: "authorization header not found"
/// 2. not exactly `<scheme> <token>`: "invalid token format"
/// 3. scheme other than `bearer` (any case): "unsupported authorization type"
/// 4. expired token: "token has expired"
/// 5. any other verification failure: "cannot parse token"
///
/// On success an `AuthenticatedUser` is inserted into the request
/// extensions. A rejected request never reaches the handler.
pub struct JwtAuthMiddleware {
  tokens: Arc<dyn TokenService>,
}

impl JwtAuthMiddleware {
  pub fn new(tokens: Arc<dyn TokenService>) -> Self {
    Self { tokens }
  }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = JwtAuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(JwtAuthMiddlewareService {
      service: Rc::new(service),
      tokens: self.tokens.clone(),
    }))
  }
}

pub struct JwtAuthMiddlewareService<S> {
  service: Rc<S>,
  tokens: Arc<dyn TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);

    let user = match authenticate(&req, self.tokens.as_ref()) {
      Ok(user) => user,
      Err(err) => {
        tracing::debug!(path = %req.path(), "authentication rejected: {}", err);
        let (request, _) = req.into_parts();
        let response = ApiError::from(err).error_response().map_into_right_body();
        return Box::pin(async move { Ok(ServiceResponse::new(request, response)) });
      }
    };

    req.extensions_mut().insert(user);

    Box::pin(async move {
      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Runs the header checks and token verification
fn authenticate(
  req: &ServiceRequest,
  tokens: &dyn TokenService,
) -> Result<AuthenticatedUser, ClinicError> {
  let header = req
    .headers()
    .get(AUTHORIZATION)
    .ok_or_else(|| ClinicError::unauthorized("authorization header not found"))?;

  let value = header
    .to_str()
    .map_err(|_| ClinicError::unauthorized("invalid token format"))?;
  if value.trim().is_empty() {
    return Err(ClinicError::unauthorized("authorization header not found"));
  }

  let parts: Vec<&str> = value.split_whitespace().collect();
  let [scheme, token] = parts.as_slice() else {
    return Err(ClinicError::unauthorized("invalid token format"));
  };

  if !scheme.eq_ignore_ascii_case("bearer") {
    return Err(ClinicError::unauthorized("unsupported authorization type"));
  }

  let claims = tokens.verify(token).map_err(|err| match err {
    TokenError::Expired => ClinicError::unauthorized(TokenError::Expired.to_string()),
    TokenError::Invalid => ClinicError::unauthorized(TokenError::Invalid.to_string()),
  })?;

  Ok(AuthenticatedUser {
    user_id: claims.user_id,
    role_id: claims.role_id,
  })
}

/// Extension trait to read the authenticated user in handlers
pub trait AuthUser {
  /// `Common` error if the route is not behind `JwtAuthMiddleware`
  fn authenticated_user(&self) -> Result<AuthenticatedUser, ClinicError>;
}

impl AuthUser for HttpRequest {
  fn authenticated_user(&self) -> Result<AuthenticatedUser, ClinicError> {
    self
      .extensions()
      .get::<AuthenticatedUser>()
      .copied()
      .ok_or_else(|| {
        tracing::error!(path = %self.path(), "authenticated user missing from request");
        ClinicError::common()
      })
  }
}
