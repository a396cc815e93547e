use async_trait::async_trait;

use super::entities::{NewPatient, Patient, PatientChanges};
use crate::domain::errors::ClinicError;
use crate::domain::pagination::PageFilter;

/// Repository trait for patient persistence operations.
///
/// Reads and updates only see live (not soft-deleted) records; `restore`
/// only sees deleted ones.
#[async_trait]
pub trait PatientRepository<Tx: Send>: Send + Sync {
  async fn create(&self, tx: &mut Tx, patient: NewPatient) -> Result<Patient, ClinicError>;

  /// Lists live patients ordered by id
  async fn list(&self, tx: &mut Tx, filter: &PageFilter) -> Result<Vec<Patient>, ClinicError>;

  /// Counts live patients
  async fn count(&self, tx: &mut Tx) -> Result<i64, ClinicError>;

  async fn find_by_id(&self, tx: &mut Tx, id: i64) -> Result<Option<Patient>, ClinicError>;

  /// Fails with `NotExist` unless exactly one live row was updated
  async fn update(
    &self,
    tx: &mut Tx,
    id: i64,
    changes: &PatientChanges,
  ) -> Result<(), ClinicError>;

  /// Sets the soft-delete marker; `NotExist` if no live row matched
  async fn soft_delete(&self, tx: &mut Tx, id: i64) -> Result<(), ClinicError>;

  /// Clears the soft-delete marker; `NotExist` if no deleted row matched
  async fn restore(&self, tx: &mut Tx, id: i64) -> Result<(), ClinicError>;
}
