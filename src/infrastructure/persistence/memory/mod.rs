//! In-process backend with the same contracts as the PostgreSQL one.
//!
//! Units of work are serialized and run against a copy of the state, which
//! is published only when the work succeeds.

pub mod medicine_repository;
pub mod patient_repository;
pub mod transactor;
pub mod user_repository;

pub use medicine_repository::MemoryMedicineRepository;
pub use patient_repository::MemoryPatientRepository;
pub use transactor::{MemoryState, MemoryTransactor};
pub use user_repository::MemoryUserRepository;
