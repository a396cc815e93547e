//! Application layer
//!
//! Use cases orchestrate repositories and security ports. Each `execute`
//! runs its storage work in exactly one unit of work.

pub mod auth;
pub mod medicine;
pub mod patient;

#[cfg(test)]
pub(crate) mod test_support;
