use async_trait::async_trait;
use chrono::Utc;

use super::transactor::MemoryState;
use crate::domain::patient::{NewPatient, Patient, PatientChanges, PatientRepository};
use crate::domain::{ClinicError, PageFilter};

#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryPatientRepository;

impl MemoryPatientRepository {
  pub fn new() -> Self {
    Self
  }
}

fn patient_not_found() -> ClinicError {
  ClinicError::not_exist("patient not found")
}

#[async_trait]
impl PatientRepository<MemoryState> for MemoryPatientRepository {
  async fn create(&self, tx: &mut MemoryState, patient: NewPatient) -> Result<Patient, ClinicError> {
    if !tx.users.contains_key(&patient.created_by) {
      // patients.created_by references users(id)
      tracing::error!(created_by = patient.created_by, "unknown patient creator");
      return Err(ClinicError::database());
    }

    let now = Utc::now();
    let created = Patient {
      id: tx.next_id(),
      full_name: patient.full_name,
      dob: patient.dob,
      gender: patient.gender,
      address: patient.address,
      phone: patient.phone,
      created_by: patient.created_by,
      created_at: now,
      updated_at: now,
      deleted_at: None,
    };
    tx.patients.insert(created.id, created.clone());
    Ok(created)
  }

  async fn list(&self, tx: &mut MemoryState, filter: &PageFilter) -> Result<Vec<Patient>, ClinicError> {
    let offset = usize::try_from(filter.offset()).unwrap_or(usize::MAX);
    Ok(
      tx.patients
        .values()
        .filter(|p| !p.is_deleted())
        .skip(offset)
        .take(filter.limit() as usize)
        .cloned()
        .collect(),
    )
  }

  async fn count(&self, tx: &mut MemoryState) -> Result<i64, ClinicError> {
    Ok(tx.patients.values().filter(|p| !p.is_deleted()).count() as i64)
  }

  async fn find_by_id(&self, tx: &mut MemoryState, id: i64) -> Result<Option<Patient>, ClinicError> {
    Ok(tx.patients.get(&id).filter(|p| !p.is_deleted()).cloned())
  }

  async fn update(
    &self,
    tx: &mut MemoryState,
    id: i64,
    changes: &PatientChanges,
  ) -> Result<(), ClinicError> {
    let patient = tx
      .patients
      .get_mut(&id)
      .filter(|p| !p.is_deleted())
      .ok_or_else(patient_not_found)?;
    patient.apply(changes, Utc::now());
    Ok(())
  }

  async fn soft_delete(&self, tx: &mut MemoryState, id: i64) -> Result<(), ClinicError> {
    let patient = tx
      .patients
      .get_mut(&id)
      .filter(|p| !p.is_deleted())
      .ok_or_else(patient_not_found)?;
    let now = Utc::now();
    patient.deleted_at = Some(now);
    patient.updated_at = now;
    Ok(())
  }

  async fn restore(&self, tx: &mut MemoryState, id: i64) -> Result<(), ClinicError> {
    let patient = tx
      .patients
      .get_mut(&id)
      .filter(|p| p.is_deleted())
      .ok_or_else(patient_not_found)?;
    patient.deleted_at = None;
    patient.updated_at = Utc::now();
    Ok(())
  }
}
