use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService};

#[derive(Debug)]
pub struct DeleteProductCommand {
  pub product_id: Uuid,
}

pub struct DeleteProductUseCase {
  billing_service: Arc<BillingService>,
}

impl DeleteProductUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(&self, command: DeleteProductCommand) -> Result<(), BillingError> {
    self.billing_service.delete_product(command.product_id).await
  }
}
