pub mod medicine_repository;
pub mod patient_repository;
pub mod transactor;
pub mod user_repository;

pub use medicine_repository::PostgresMedicineRepository;
pub use patient_repository::PostgresPatientRepository;
pub use transactor::PostgresTransactor;
pub use user_repository::PostgresUserRepository;
