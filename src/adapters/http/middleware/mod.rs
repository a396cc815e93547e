pub mod auth;
pub mod request_id;
pub mod role_guard;

pub use auth::{AuthUser, AuthenticatedUser, JwtAuthMiddleware};
pub use request_id::{RequestId, RequestIdMiddleware};
pub use role_guard::RoleGuard;
