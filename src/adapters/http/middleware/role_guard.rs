use actix_web::{
  Error, HttpMessage, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
};

use super::auth::AuthenticatedUser;
use crate::adapters::http::errors::ApiError;
use crate::domain::ClinicError;

/// Admits only requests whose authenticated role equals `role_id`.
///
/// Must be registered inside `JwtAuthMiddleware` (i.e. `.wrap`ped before
/// it on the same scope) so the identity is already attached.
#[derive(Debug, Clone, Copy)]
pub struct RoleGuard {
  role_id: i32,
}

impl RoleGuard {
  pub fn new(role_id: i32) -> Self {
    Self { role_id }
  }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = RoleGuardService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(RoleGuardService {
      service: Rc::new(service),
      role_id: self.role_id,
    }))
  }
}

pub struct RoleGuardService<S> {
  service: Rc<S>,
  role_id: i32,
}

impl<S, B> Service<ServiceRequest> for RoleGuardService<S>
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
    let user = req.extensions().get::<AuthenticatedUser>().copied();

    let rejection = match user {
      None => Some(ClinicError::unauthorized("error auth")),
      Some(user) if user.role_id != self.role_id => {
        tracing::warn!(
          user_id = user.user_id,
          role_id = user.role_id,
          required = self.role_id,
          "role check failed"
        );
        Some(ClinicError::unauthorized("insufficient role"))
      }
      Some(_) => None,
    };

    if let Some(err) = rejection {
      let (request, _) = req.into_parts();
      let response = ApiError::from(err).error_response().map_into_right_body();
      return Box::pin(async move { Ok(ServiceResponse::new(request, response)) });
    }

    Box::pin(async move {
      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}
