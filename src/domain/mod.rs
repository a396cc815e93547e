pub mod auth;
pub mod errors;
pub mod medicine;
pub mod pagination;
pub mod patient;
pub mod transactor;

pub use errors::{ClinicError, ErrorKind, TokenError};
pub use pagination::{Page, PageFilter};
pub use transactor::Transactor;
