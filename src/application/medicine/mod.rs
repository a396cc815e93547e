//! Medicine inventory use cases

mod add_medicine;

pub use add_medicine::{AddMedicineCommand, AddMedicineUseCase};
