use std::sync::Arc;

use chrono::NaiveDate;

use super::auth::{LoginUserUseCase, RegisterUserCommand, RegisterUserUseCase};
use super::medicine::AddMedicineUseCase;
use super::patient::{
  AddPatientCommand, AddPatientUseCase, DeletePatientUseCase, GetPatientUseCase,
  ListPatientsUseCase, RestorePatientUseCase, UpdatePatientUseCase,
};
use crate::domain::auth::{PasswordHasher, TokenService, UserRepository};
use crate::domain::medicine::MedicineRepository;
use crate::domain::patient::PatientRepository;
use crate::infrastructure::persistence::memory::{
  MemoryMedicineRepository, MemoryPatientRepository, MemoryState, MemoryTransactor,
  MemoryUserRepository,
};
use crate::infrastructure::security::{Argon2PasswordHasher, JwtTokenService};

/// Use cases wired over the in-memory backend
pub(crate) struct TestBackend {
  pub transactor: Arc<MemoryTransactor>,
  pub users: Arc<dyn UserRepository<MemoryState>>,
  pub patients: Arc<dyn PatientRepository<MemoryState>>,
  pub medicines: Arc<dyn MedicineRepository<MemoryState>>,
  pub hasher: Arc<dyn PasswordHasher>,
  pub tokens: Arc<dyn TokenService>,
}

impl TestBackend {
  pub fn new() -> Self {
    Self {
      transactor: Arc::new(MemoryTransactor::new()),
      users: Arc::new(MemoryUserRepository::new()),
      patients: Arc::new(MemoryPatientRepository::new()),
      medicines: Arc::new(MemoryMedicineRepository::new()),
      hasher: Arc::new(Argon2PasswordHasher::new().unwrap()),
      tokens: Arc::new(JwtTokenService::new("test-secret", "clinic", 3600)),
    }
  }

  pub fn register_user(&self) -> RegisterUserUseCase<MemoryTransactor> {
    RegisterUserUseCase::new(
      self.transactor.clone(),
      self.users.clone(),
      self.hasher.clone(),
    )
  }

  pub fn login_user(&self) -> LoginUserUseCase<MemoryTransactor> {
    LoginUserUseCase::new(
      self.transactor.clone(),
      self.users.clone(),
      self.hasher.clone(),
      self.tokens.clone(),
    )
  }

  pub fn add_patient(&self) -> AddPatientUseCase<MemoryTransactor> {
    AddPatientUseCase::new(self.transactor.clone(), self.patients.clone())
  }

  pub fn list_patients(&self) -> ListPatientsUseCase<MemoryTransactor> {
    ListPatientsUseCase::new(self.transactor.clone(), self.patients.clone())
  }

  pub fn get_patient(&self) -> GetPatientUseCase<MemoryTransactor> {
    GetPatientUseCase::new(self.transactor.clone(), self.patients.clone())
  }

  pub fn update_patient(&self) -> UpdatePatientUseCase<MemoryTransactor> {
    UpdatePatientUseCase::new(self.transactor.clone(), self.patients.clone())
  }

  pub fn delete_patient(&self) -> DeletePatientUseCase<MemoryTransactor> {
    DeletePatientUseCase::new(self.transactor.clone(), self.patients.clone())
  }

  pub fn restore_patient(&self) -> RestorePatientUseCase<MemoryTransactor> {
    RestorePatientUseCase::new(self.transactor.clone(), self.patients.clone())
  }

  pub fn add_medicine(&self) -> AddMedicineUseCase<MemoryTransactor> {
    AddMedicineUseCase::new(self.transactor.clone(), self.medicines.clone())
  }

  /// Registers a user and returns its id
  pub async fn seed_user(&self, email: &str) -> i64 {
    self
      .register_user()
      .execute(RegisterUserCommand {
        email: email.to_string(),
        password: "secret1".to_string(),
        role_id: 2,
      })
      .await
      .unwrap()
      .user_id
  }

  /// Adds `count` patients named "Patient 0".."Patient {count-1}"
  pub async fn seed_patients(&self, created_by: i64, count: usize) -> Vec<i64> {
    let use_case = self.add_patient();
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
      let patient = use_case
        .execute(patient_command(&format!("Patient {}", i), created_by))
        .await
        .unwrap();
      ids.push(patient.id);
    }
    ids
  }
}

pub(crate) fn patient_command(full_name: &str, created_by: i64) -> AddPatientCommand {
  AddPatientCommand {
    full_name: full_name.to_string(),
    dob: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
    gender: "F".to_string(),
    address: "1 Main St".to_string(),
    phone: "555-0100".to_string(),
    created_by,
  }
}
