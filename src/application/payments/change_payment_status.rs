use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::payments::{PaymentError, PaymentService, PaymentStatus};

#[derive(Debug)]
pub struct ChangePaymentStatusCommand {
  pub payment_id: Uuid,
  pub new_status: String,
}

#[derive(Debug, Serialize)]
pub struct ChangePaymentStatusResponse {
  pub payment_id: Uuid,
  pub status: String,
}

pub struct ChangePaymentStatusUseCase {
  payment_service: Arc<PaymentService>,
}

impl ChangePaymentStatusUseCase {
  pub fn new(payment_service: Arc<PaymentService>) -> Self {
    Self { payment_service }
  }

  pub async fn execute(
    &self,
    command: ChangePaymentStatusCommand,
  ) -> Result<ChangePaymentStatusResponse, PaymentError> {
    let new_status = PaymentStatus::from_str(&command.new_status)?;
    let payment = self
      .payment_service
      .change_payment_status(command.payment_id, new_status)
      .await?;

    Ok(ChangePaymentStatusResponse {
      payment_id: payment.id,
      status: payment.status.as_str().to_string(),
    })
  }
}
