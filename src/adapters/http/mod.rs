pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{ApiResponse, FieldError};
pub use errors::{ApiError, not_found_handler};
pub use middleware::{
  AuthUser, AuthenticatedUser, JwtAuthMiddleware, RequestId, RequestIdMiddleware, RoleGuard,
};
pub use routes::{ApiDependencies, configure_api_routes, configure_app};
