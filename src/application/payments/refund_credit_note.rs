use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::payments::{PaymentError, PaymentService};

#[derive(Debug, Deserialize)]
pub struct RefundCreditNoteCommand {
  pub credit_note_id: Uuid,
  pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct RefundCreditNoteResponse {
  pub credit_note_id: Uuid,
  pub status: String,
  pub remaining_amount: Decimal,
}

pub struct RefundCreditNoteUseCase {
  payment_service: Arc<PaymentService>,
}

impl RefundCreditNoteUseCase {
  pub fn new(payment_service: Arc<PaymentService>) -> Self {
    Self { payment_service }
  }

  pub async fn execute(
    &self,
    command: RefundCreditNoteCommand,
  ) -> Result<RefundCreditNoteResponse, PaymentError> {
    let credit_note = self
      .payment_service
      .refund_credit_note(command.credit_note_id, command.amount)
      .await?;

    Ok(RefundCreditNoteResponse {
      credit_note_id: credit_note.id,
      status: credit_note.status.as_str().to_string(),
      remaining_amount: credit_note.remaining_amount(),
    })
  }
}
