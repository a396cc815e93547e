//! Storage backends
//!
//! `postgres` is the production backend. `memory` keeps the same contracts
//! in-process and backs the test suites.

pub mod memory;
pub mod postgres;
