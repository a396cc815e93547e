use std::sync::Arc;

use crate::domain::patient::{Patient, PatientRepository};
use crate::domain::{ClinicError, Transactor};

pub struct GetPatientUseCase<T: Transactor> {
  transactor: Arc<T>,
  patients: Arc<dyn PatientRepository<T::Tx>>,
}

impl<T: Transactor> GetPatientUseCase<T> {
  pub fn new(transactor: Arc<T>, patients: Arc<dyn PatientRepository<T::Tx>>) -> Self {
    Self {
      transactor,
      patients,
    }
  }

  pub async fn execute(&self, patient_id: i64) -> Result<Patient, ClinicError> {
    let patients = Arc::clone(&self.patients);

    self
      .transactor
      .within_transaction(move |tx| {
        Box::pin(async move {
          patients
            .find_by_id(tx, patient_id)
            .await?
            .ok_or_else(|| ClinicError::not_exist("patient not found"))
        })
      })
      .await
  }
}
