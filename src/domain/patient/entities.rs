use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Patient record owned by the clinic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
  pub id: i64,
  pub full_name: String,
  pub dob: NaiveDate,
  pub gender: String,
  pub address: String,
  pub phone: String,
  /// Id of the user that registered the patient
  pub created_by: i64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  /// Soft-delete marker; `None` while the record is live
  pub deleted_at: Option<DateTime<Utc>>,
}

impl Patient {
  pub fn is_deleted(&self) -> bool {
    self.deleted_at.is_some()
  }

  /// Applies a partial update in place, touching `updated_at`.
  pub fn apply(&mut self, changes: &PatientChanges, now: DateTime<Utc>) {
    if let Some(full_name) = &changes.full_name {
      self.full_name = full_name.clone();
    }
    if let Some(dob) = changes.dob {
      self.dob = dob;
    }
    if let Some(gender) = &changes.gender {
      self.gender = gender.clone();
    }
    if let Some(address) = &changes.address {
      self.address = address.clone();
    }
    if let Some(phone) = &changes.phone {
      self.phone = phone.clone();
    }
    self.updated_at = now;
  }
}

/// Data required to insert a patient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
  pub full_name: String,
  pub dob: NaiveDate,
  pub gender: String,
  pub address: String,
  pub phone: String,
  pub created_by: i64,
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientChanges {
  pub full_name: Option<String>,
  pub dob: Option<NaiveDate>,
  pub gender: Option<String>,
  pub address: Option<String>,
  pub phone: Option<String>,
}

impl PatientChanges {
  pub fn is_empty(&self) -> bool {
    self.full_name.is_none()
      && self.dob.is_none()
      && self.gender.is_none()
      && self.address.is_none()
      && self.phone.is_none()
  }
}
