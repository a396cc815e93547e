pub mod entities;
pub mod ports;

// Re-export commonly used types
pub use entities::{NewUser, TokenClaims, User};
pub use ports::{PasswordHasher, TokenService, UserRepository};
