use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{CustomerRequest, SuccessResponse},
  errors::ApiError,
};
use crate::application::billing::{
  CreateCustomerCommand, CreateCustomerUseCase, DeleteCustomerCommand, DeleteCustomerUseCase,
  GetCustomerCommand, GetCustomerUseCase, ListCustomersUseCase, UpdateCustomerCommand,
  UpdateCustomerUseCase,
};

fn to_command(request: CustomerRequest) -> CreateCustomerCommand {
  CreateCustomerCommand {
    name: request.name,
    email: request.email,
    phone: request.phone,
    company: request.company,
    billing_address: request.billing_address,
    shipping_address: request.shipping_address,
    tax_number: request.tax_number,
    status: request.status,
  }
}

/// POST /api/v1/customers
pub async fn create_customer_handler(
  request: web::Json<CustomerRequest>,
  use_case: web::Data<Arc<CreateCustomerUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case.execute(to_command(request.into_inner())).await?;
  Ok(HttpResponse::Created().json(response))
}

/// GET /api/v1/customers
pub async fn list_customers_handler(
  use_case: web::Data<Arc<ListCustomersUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/customers/{customer_id}
pub async fn get_customer_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetCustomerUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(GetCustomerCommand {
      customer_id: path.into_inner(),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// PUT /api/v1/customers/{customer_id}
pub async fn update_customer_handler(
  path: web::Path<Uuid>,
  request: web::Json<CustomerRequest>,
  use_case: web::Data<Arc<UpdateCustomerUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case
    .execute(UpdateCustomerCommand {
      customer_id: path.into_inner(),
      details: to_command(request.into_inner()),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/v1/customers/{customer_id}
pub async fn delete_customer_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteCustomerUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(DeleteCustomerCommand {
      customer_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Customer deleted".to_string(),
  }))
}
