use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService};

use super::list_products::ProductDto;

#[derive(Debug)]
pub struct GetProductCommand {
  pub product_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ProductStatsDto {
  pub times_sold: i64,
  pub total_revenue: Decimal,
}

#[derive(Debug, Serialize)]
pub struct GetProductResponse {
  pub product: ProductDto,
  pub stats: ProductStatsDto,
}

pub struct GetProductUseCase {
  billing_service: Arc<BillingService>,
}

impl GetProductUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(&self, command: GetProductCommand) -> Result<GetProductResponse, BillingError> {
    let (product, stats) = self.billing_service.get_product(command.product_id).await?;

    Ok(GetProductResponse {
      product: product.into(),
      stats: ProductStatsDto {
        times_sold: stats.times_sold,
        total_revenue: stats.total_revenue,
      },
    })
  }
}
