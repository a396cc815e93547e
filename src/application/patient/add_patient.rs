use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::patient::{NewPatient, Patient, PatientRepository};
use crate::domain::{ClinicError, Transactor};

#[derive(Debug, Clone)]
pub struct AddPatientCommand {
  pub full_name: String,
  pub dob: NaiveDate,
  pub gender: String,
  pub address: String,
  pub phone: String,
  /// Authenticated caller, stamped as the record's creator
  pub created_by: i64,
}

pub struct AddPatientUseCase<T: Transactor> {
  transactor: Arc<T>,
  patients: Arc<dyn PatientRepository<T::Tx>>,
}

impl<T: Transactor> AddPatientUseCase<T> {
  pub fn new(transactor: Arc<T>, patients: Arc<dyn PatientRepository<T::Tx>>) -> Self {
    Self {
      transactor,
      patients,
    }
  }

  pub async fn execute(&self, command: AddPatientCommand) -> Result<Patient, ClinicError> {
    let patients = Arc::clone(&self.patients);
    let new_patient = NewPatient {
      full_name: command.full_name,
      dob: command.dob,
      gender: command.gender,
      address: command.address,
      phone: command.phone,
      created_by: command.created_by,
    };

    let patient = self
      .transactor
      .within_transaction(move |tx| Box::pin(async move { patients.create(tx, new_patient).await }))
      .await?;

    tracing::info!(
      patient_id = patient.id,
      created_by = patient.created_by,
      "patient added"
    );
    Ok(patient)
  }
}
