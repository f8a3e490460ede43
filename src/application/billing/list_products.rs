use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService, Product};

#[derive(Debug, Serialize)]
pub struct ProductDto {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub sku: Option<String>,
  pub price: Decimal,
  pub tax_rate: Decimal,
  pub kind: String,
  pub is_active: bool,
}

impl From<Product> for ProductDto {
  fn from(product: Product) -> Self {
    Self {
      id: product.id,
      name: product.name.value().to_string(),
      description: product.description,
      sku: product.sku,
      price: product.price.value(),
      tax_rate: product.tax_rate.value(),
      kind: product.kind.as_str().to_string(),
      is_active: product.is_active,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListProductsResponse {
  pub products: Vec<ProductDto>,
}

pub struct ListProductsUseCase {
  billing_service: Arc<BillingService>,
}

impl ListProductsUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(&self) -> Result<ListProductsResponse, BillingError> {
    let products = self.billing_service.list_products().await?;

    Ok(ListProductsResponse {
      products: products.into_iter().map(ProductDto::from).collect(),
    })
  }
}
