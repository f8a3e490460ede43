use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::payments::{PaymentError, PaymentService};

#[derive(Debug, Deserialize)]
pub struct AllocatePaymentCommand {
  pub payment_id: Uuid,
  pub invoice_id: Uuid,
  pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct AllocatePaymentResponse {
  pub allocation_id: Uuid,
  pub allocated_amount: Decimal,
  pub invoice_status: String,
  pub invoice_balance_due: Decimal,
}

pub struct AllocatePaymentUseCase {
  payment_service: Arc<PaymentService>,
}

impl AllocatePaymentUseCase {
  pub fn new(payment_service: Arc<PaymentService>) -> Self {
    Self { payment_service }
  }

  pub async fn execute(
    &self,
    command: AllocatePaymentCommand,
  ) -> Result<AllocatePaymentResponse, PaymentError> {
    let (allocation, invoice) = self
      .payment_service
      .allocate(command.payment_id, command.invoice_id, command.amount)
      .await?;

    Ok(AllocatePaymentResponse {
      allocation_id: allocation.id,
      allocated_amount: allocation.allocated_amount,
      invoice_status: invoice.status.as_str().to_string(),
      invoice_balance_due: invoice.balance_due,
    })
  }
}
