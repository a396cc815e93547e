pub mod entities;
pub mod ports;

pub use entities::{NewPatient, Patient, PatientChanges};
pub use ports::PatientRepository;
