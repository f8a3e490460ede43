use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService};

use super::create_product::{CreateProductCommand, parse_details};

#[derive(Debug)]
pub struct UpdateProductCommand {
  pub product_id: Uuid,
  pub details: CreateProductCommand,
}

#[derive(Debug, Serialize)]
pub struct UpdateProductResponse {
  pub product_id: Uuid,
  pub name: String,
}

pub struct UpdateProductUseCase {
  billing_service: Arc<BillingService>,
}

impl UpdateProductUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: UpdateProductCommand,
  ) -> Result<UpdateProductResponse, BillingError> {
    let details = parse_details(command.details)?;
    let product = self
      .billing_service
      .update_product(command.product_id, details)
      .await?;

    Ok(UpdateProductResponse {
      product_id: product.id,
      name: product.name.value().to_string(),
    })
  }
}
