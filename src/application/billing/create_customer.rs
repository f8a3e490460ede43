use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{
  BillingError, BillingService, CustomerName, CustomerStatus, entities::CustomerDetails,
};

#[derive(Debug, Deserialize)]
pub struct CreateCustomerCommand {
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub company: Option<String>,
  pub billing_address: Option<String>,
  pub shipping_address: Option<String>,
  pub tax_number: Option<String>,
  pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateCustomerResponse {
  pub customer_id: Uuid,
  pub name: String,
  pub status: String,
}

pub struct CreateCustomerUseCase {
  billing_service: Arc<BillingService>,
}

impl CreateCustomerUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: CreateCustomerCommand,
  ) -> Result<CreateCustomerResponse, BillingError> {
    let details = parse_details(command)?;
    let customer = self.billing_service.create_customer(details).await?;

    Ok(CreateCustomerResponse {
      customer_id: customer.id,
      name: customer.name.into_inner(),
      status: customer.status.as_str().to_string(),
    })
  }
}

pub(super) fn parse_details(
  command: CreateCustomerCommand,
) -> Result<CustomerDetails, BillingError> {
  let name = CustomerName::new(command.name)?;
  let status = match command.status.as_deref() {
    Some(raw) => CustomerStatus::from_str(raw)?,
    None => CustomerStatus::Active,
  };

  Ok(CustomerDetails {
    name,
    email: command.email,
    phone: command.phone,
    company: command.company,
    billing_address: command.billing_address,
    shipping_address: command.shipping_address,
    tax_number: command.tax_number,
    status,
  })
}
