//! Infrastructure layer
//!
//! Concrete adapters for the domain ports: configuration loading, storage
//! backends and the password/token primitives.

pub mod config;
pub mod persistence;
pub mod security;
