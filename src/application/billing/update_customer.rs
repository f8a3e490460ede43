use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService};

use super::create_customer::{CreateCustomerCommand, parse_details};

#[derive(Debug)]
pub struct UpdateCustomerCommand {
  pub customer_id: Uuid,
  pub details: CreateCustomerCommand,
}

#[derive(Debug, Serialize)]
pub struct UpdateCustomerResponse {
  pub customer_id: Uuid,
  pub name: String,
  pub status: String,
}

pub struct UpdateCustomerUseCase {
  billing_service: Arc<BillingService>,
}

impl UpdateCustomerUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: UpdateCustomerCommand,
  ) -> Result<UpdateCustomerResponse, BillingError> {
    let details = parse_details(command.details)?;
    let customer = self
      .billing_service
      .update_customer(command.customer_id, details)
      .await?;

    Ok(UpdateCustomerResponse {
      customer_id: customer.id,
      name: customer.name.into_inner(),
      status: customer.status.as_str().to_string(),
    })
  }
}
