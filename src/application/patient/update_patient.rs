use std::sync::Arc;

use crate::domain::patient::{PatientChanges, PatientRepository};
use crate::domain::{ClinicError, Transactor};

#[derive(Debug, Clone)]
pub struct UpdatePatientCommand {
  pub patient_id: i64,
  pub changes: PatientChanges,
}

pub struct UpdatePatientUseCase<T: Transactor> {
  transactor: Arc<T>,
  patients: Arc<dyn PatientRepository<T::Tx>>,
}

impl<T: Transactor> UpdatePatientUseCase<T> {
  pub fn new(transactor: Arc<T>, patients: Arc<dyn PatientRepository<T::Tx>>) -> Self {
    Self {
      transactor,
      patients,
    }
  }

  /// # Errors
  /// `InvalidAction` for an empty change set, `NotExist` when no live
  /// patient has the id.
  pub async fn execute(&self, command: UpdatePatientCommand) -> Result<(), ClinicError> {
    if command.changes.is_empty() {
      return Err(ClinicError::invalid_action("no fields to update"));
    }

    let patients = Arc::clone(&self.patients);
    let UpdatePatientCommand {
      patient_id,
      changes,
    } = command;

    self
      .transactor
      .within_transaction_unit(move |tx| {
        Box::pin(async move { patients.update(tx, patient_id, &changes).await })
      })
      .await?;

    tracing::info!(patient_id, "patient updated");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support::TestBackend;
  use crate::domain::ErrorKind;

  fn phone_change(patient_id: i64) -> UpdatePatientCommand {
    UpdatePatientCommand {
      patient_id,
      changes: PatientChanges {
        phone: Some("555-0199".to_string()),
        ..Default::default()
      },
    }
  }

  #[tokio::test]
  async fn test_partial_update() {
    let backend = TestBackend::new();
    let user_id = backend.seed_user("a@x.com").await;
    let ids = backend.seed_patients(user_id, 1).await;

    backend
      .update_patient()
      .execute(phone_change(ids[0]))
      .await
      .unwrap();

    let patient = backend.get_patient().execute(ids[0]).await.unwrap();
    assert_eq!(patient.phone, "555-0199");
    assert_eq!(patient.full_name, "Patient 0");
  }

  #[tokio::test]
  async fn test_update_of_missing_patient_fails() {
    let backend = TestBackend::new();

    let err = backend
      .update_patient()
      .execute(phone_change(999_999))
      .await
      .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotExist);
  }

  #[tokio::test]
  async fn test_empty_update_is_rejected() {
    let backend = TestBackend::new();

    let err = backend
      .update_patient()
      .execute(UpdatePatientCommand {
        patient_id: 1,
        changes: PatientChanges::default(),
      })
      .await
      .unwrap_err();

    assert_eq!(err, ClinicError::invalid_action("no fields to update"));
  }
}
