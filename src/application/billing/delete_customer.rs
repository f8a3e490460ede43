use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService};

#[derive(Debug)]
pub struct DeleteCustomerCommand {
  pub customer_id: Uuid,
}

pub struct DeleteCustomerUseCase {
  billing_service: Arc<BillingService>,
}

impl DeleteCustomerUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(&self, command: DeleteCustomerCommand) -> Result<(), BillingError> {
    self
      .billing_service
      .delete_customer(command.customer_id)
      .await
  }
}
