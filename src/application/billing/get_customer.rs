use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService};

use super::list_customers::CustomerDto;

#[derive(Debug)]
pub struct GetCustomerCommand {
  pub customer_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CustomerStatsDto {
  pub invoice_count: i64,
  pub total_invoiced: Decimal,
  pub total_paid: Decimal,
  pub outstanding_balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct GetCustomerResponse {
  pub customer: CustomerDto,
  pub stats: CustomerStatsDto,
}

pub struct GetCustomerUseCase {
  billing_service: Arc<BillingService>,
}

impl GetCustomerUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(&self, command: GetCustomerCommand) -> Result<GetCustomerResponse, BillingError> {
    let (customer, stats) = self.billing_service.get_customer(command.customer_id).await?;

    Ok(GetCustomerResponse {
      customer: customer.into(),
      stats: CustomerStatsDto {
        invoice_count: stats.invoice_count,
        total_invoiced: stats.total_invoiced,
        total_paid: stats.total_paid,
        outstanding_balance: stats.outstanding_balance,
      },
    })
  }
}
