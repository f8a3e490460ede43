use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::Currency;
use crate::domain::payments::{
  CreditReason, PaymentError, PaymentService, services::CreditNoteData,
};

#[derive(Debug, Deserialize)]
pub struct CreateCreditNoteCommand {
  pub customer_id: Uuid,
  pub invoice_id: Option<Uuid>,
  pub issue_date: NaiveDate,
  pub amount: Decimal,
  pub currency: String,
  pub reason: String,
  pub description: String,
}

#[derive(Debug, Serialize)]
pub struct CreateCreditNoteResponse {
  pub credit_note_id: Uuid,
  pub credit_note_number: String,
  pub status: String,
}

pub struct CreateCreditNoteUseCase {
  payment_service: Arc<PaymentService>,
}

impl CreateCreditNoteUseCase {
  pub fn new(payment_service: Arc<PaymentService>) -> Self {
    Self { payment_service }
  }

  pub async fn execute(
    &self,
    command: CreateCreditNoteCommand,
  ) -> Result<CreateCreditNoteResponse, PaymentError> {
    let currency = Currency::from_str(&command.currency)?;
    let reason = CreditReason::from_str(&command.reason)?;

    let credit_note = self
      .payment_service
      .create_credit_note(CreditNoteData {
        customer_id: command.customer_id,
        invoice_id: command.invoice_id,
        issue_date: command.issue_date,
        amount: command.amount,
        currency,
        reason,
        description: command.description,
      })
      .await?;

    Ok(CreateCreditNoteResponse {
      credit_note_id: credit_note.id,
      credit_note_number: credit_note.credit_note_number.value().to_string(),
      status: credit_note.status.as_str().to_string(),
    })
  }
}
