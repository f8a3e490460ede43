use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::payments::{PaymentAllocation, PaymentError, PaymentService};

use super::list_payments::PaymentDto;

#[derive(Debug)]
pub struct GetPaymentDetailsCommand {
  pub payment_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AllocationDto {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub allocated_amount: Decimal,
  pub allocated_at: DateTime<Utc>,
}

impl From<PaymentAllocation> for AllocationDto {
  fn from(allocation: PaymentAllocation) -> Self {
    Self {
      id: allocation.id,
      invoice_id: allocation.invoice_id,
      allocated_amount: allocation.allocated_amount,
      allocated_at: allocation.allocated_at,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct PaymentDetailsResponse {
  pub payment: PaymentDto,
  pub allocations: Vec<AllocationDto>,
  pub unallocated_amount: Decimal,
}

pub struct GetPaymentDetailsUseCase {
  payment_service: Arc<PaymentService>,
}

impl GetPaymentDetailsUseCase {
  pub fn new(payment_service: Arc<PaymentService>) -> Self {
    Self { payment_service }
  }

  pub async fn execute(
    &self,
    command: GetPaymentDetailsCommand,
  ) -> Result<PaymentDetailsResponse, PaymentError> {
    let (payment, allocations, unallocated) =
      self.payment_service.get_payment(command.payment_id).await?;

    Ok(PaymentDetailsResponse {
      payment: payment.into(),
      allocations: allocations.into_iter().map(AllocationDto::from).collect(),
      unallocated_amount: unallocated,
    })
  }
}
