use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{
  Amount, BillingError, BillingService, Percentage, ProductKind, ProductName,
  entities::ProductDetails,
};

#[derive(Debug, Deserialize)]
pub struct CreateProductCommand {
  pub name: String,
  pub description: Option<String>,
  pub sku: Option<String>,
  pub price: Decimal,
  pub tax_rate: Option<Decimal>,
  pub kind: String,
  pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
  pub product_id: Uuid,
  pub name: String,
}

pub struct CreateProductUseCase {
  billing_service: Arc<BillingService>,
}

impl CreateProductUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: CreateProductCommand,
  ) -> Result<CreateProductResponse, BillingError> {
    let details = parse_details(command)?;
    let product = self.billing_service.create_product(details).await?;

    Ok(CreateProductResponse {
      product_id: product.id,
      name: product.name.value().to_string(),
    })
  }
}

pub(super) fn parse_details(command: CreateProductCommand) -> Result<ProductDetails, BillingError> {
  let name = ProductName::new(command.name)?;
  let price = Amount::new(command.price)?;
  let tax_rate = match command.tax_rate {
    Some(rate) => Percentage::new(rate)?,
    None => Percentage::zero(),
  };
  let kind = ProductKind::from_str(&command.kind)?;

  Ok(ProductDetails {
    name,
    description: command.description,
    sku: command.sku,
    price,
    tax_rate,
    kind,
    is_active: command.is_active.unwrap_or(true),
  })
}
