use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ProductRequest, SuccessResponse},
  errors::ApiError,
};
use crate::application::billing::{
  CreateProductCommand, CreateProductUseCase, DeleteProductCommand, DeleteProductUseCase,
  GetProductCommand, GetProductUseCase, ListProductsUseCase, UpdateProductCommand,
  UpdateProductUseCase,
};

fn to_command(request: ProductRequest) -> CreateProductCommand {
  CreateProductCommand {
    name: request.name,
    description: request.description,
    sku: request.sku,
    price: request.price,
    tax_rate: request.tax_rate,
    kind: request.kind,
    is_active: request.is_active,
  }
}

/// POST /api/v1/products
pub async fn create_product_handler(
  request: web::Json<ProductRequest>,
  use_case: web::Data<Arc<CreateProductUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case.execute(to_command(request.into_inner())).await?;
  Ok(HttpResponse::Created().json(response))
}

/// GET /api/v1/products
pub async fn list_products_handler(
  use_case: web::Data<Arc<ListProductsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/products/{product_id}
pub async fn get_product_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetProductUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(GetProductCommand {
      product_id: path.into_inner(),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// PUT /api/v1/products/{product_id}
pub async fn update_product_handler(
  path: web::Path<Uuid>,
  request: web::Json<ProductRequest>,
  use_case: web::Data<Arc<UpdateProductUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case
    .execute(UpdateProductCommand {
      product_id: path.into_inner(),
      details: to_command(request.into_inner()),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/v1/products/{product_id}
pub async fn delete_product_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteProductUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(DeleteProductCommand {
      product_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Product deleted".to_string(),
  }))
}
