use std::sync::Arc;

use crate::domain::patient::{Patient, PatientRepository};
use crate::domain::{ClinicError, Page, PageFilter, Transactor};

/// Lists live patients page by page, with the total count taken in the
/// same transaction.
pub struct ListPatientsUseCase<T: Transactor> {
  transactor: Arc<T>,
  patients: Arc<dyn PatientRepository<T::Tx>>,
}

impl<T: Transactor> ListPatientsUseCase<T> {
  pub fn new(transactor: Arc<T>, patients: Arc<dyn PatientRepository<T::Tx>>) -> Self {
    Self {
      transactor,
      patients,
    }
  }

  pub async fn execute(&self, filter: PageFilter) -> Result<Page<Patient>, ClinicError> {
    let patients = Arc::clone(&self.patients);

    self
      .transactor
      .within_transaction(move |tx| {
        Box::pin(async move {
          let data = patients.list(tx, &filter).await?;
          let total = patients.count(tx).await?;
          Ok(Page::new(filter, total, data))
        })
      })
      .await
  }
}
