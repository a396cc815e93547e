//! Authentication use cases

mod login_user;
mod register_user;

pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
