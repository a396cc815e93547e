//! Patient record use cases

mod add_patient;
mod delete_patient;
mod get_patient;
mod list_patients;
mod restore_patient;
mod update_patient;

pub use add_patient::{AddPatientCommand, AddPatientUseCase};
pub use delete_patient::DeletePatientUseCase;
pub use get_patient::GetPatientUseCase;
pub use list_patients::ListPatientsUseCase;
pub use restore_patient::RestorePatientUseCase;
pub use update_patient::{UpdatePatientCommand, UpdatePatientUseCase};
