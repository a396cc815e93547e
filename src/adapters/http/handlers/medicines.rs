use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use super::required;
use crate::adapters::http::{
  dtos::{AddMedicineRequest, ApiResponse, MedicineResponse},
  errors::ApiError,
};
use crate::application::medicine::{AddMedicineCommand, AddMedicineUseCase};
use crate::domain::Transactor;

/// Handler for adding a medicine
///
/// POST /api/v1/medicines
/// Body: AddMedicineRequest (JSON)
/// Response: MedicineResponse in the envelope, status 201
pub async fn add_medicine_handler<T: Transactor>(
  request: web::Json<AddMedicineRequest>,
  use_case: web::Data<Arc<AddMedicineUseCase<T>>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = AddMedicineCommand {
    name: required(request.name, "name")?,
    stock: required(request.stock, "stock")?,
    price: required(request.price, "price")?,
  };

  let medicine = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(ApiResponse::ok(
    "medicine added",
    MedicineResponse::from(medicine),
  )))
}
