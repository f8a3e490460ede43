use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService, Customer};

#[derive(Debug, Serialize)]
pub struct CustomerDto {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub company: Option<String>,
  pub billing_address: Option<String>,
  pub shipping_address: Option<String>,
  pub tax_number: Option<String>,
  pub status: String,
  pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDto {
  fn from(customer: Customer) -> Self {
    Self {
      id: customer.id,
      name: customer.name.into_inner(),
      email: customer.email,
      phone: customer.phone,
      company: customer.company,
      billing_address: customer.billing_address,
      shipping_address: customer.shipping_address,
      tax_number: customer.tax_number,
      status: customer.status.as_str().to_string(),
      created_at: customer.created_at,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListCustomersResponse {
  pub customers: Vec<CustomerDto>,
}

pub struct ListCustomersUseCase {
  billing_service: Arc<BillingService>,
}

impl ListCustomersUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(&self) -> Result<ListCustomersResponse, BillingError> {
    let customers = self.billing_service.list_customers().await?;

    Ok(ListCustomersResponse {
      customers: customers.into_iter().map(CustomerDto::from).collect(),
    })
  }
}
