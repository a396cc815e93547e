pub mod entities;
pub mod ports;

pub use entities::{Medicine, NewMedicine, price_in_range};
pub use ports::MedicineRepository;
