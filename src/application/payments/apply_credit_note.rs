use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::payments::{PaymentError, PaymentService};

#[derive(Debug, Deserialize)]
pub struct ApplyCreditNoteCommand {
  pub credit_note_id: Uuid,
  pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ApplyCreditNoteResponse {
  pub credit_note_id: Uuid,
  pub status: String,
  pub remaining_amount: Decimal,
  pub invoice_status: String,
  pub invoice_balance_due: Decimal,
}

pub struct ApplyCreditNoteUseCase {
  payment_service: Arc<PaymentService>,
}

impl ApplyCreditNoteUseCase {
  pub fn new(payment_service: Arc<PaymentService>) -> Self {
    Self { payment_service }
  }

  pub async fn execute(
    &self,
    command: ApplyCreditNoteCommand,
  ) -> Result<ApplyCreditNoteResponse, PaymentError> {
    let (credit_note, invoice) = self
      .payment_service
      .apply_credit_note(command.credit_note_id, command.amount)
      .await?;

    Ok(ApplyCreditNoteResponse {
      credit_note_id: credit_note.id,
      status: credit_note.status.as_str().to_string(),
      remaining_amount: credit_note.remaining_amount(),
      invoice_status: invoice.status.as_str().to_string(),
      invoice_balance_due: invoice.balance_due,
    })
  }
}
