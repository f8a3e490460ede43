use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::payments::{CreditNote, PaymentError, PaymentService};

#[derive(Debug, Serialize)]
pub struct CreditNoteDto {
  pub id: Uuid,
  pub credit_note_number: String,
  pub customer_id: Uuid,
  pub invoice_id: Option<Uuid>,
  pub issue_date: NaiveDate,
  pub amount: Decimal,
  pub currency: String,
  pub reason: String,
  pub description: String,
  pub status: String,
  pub applied_amount: Decimal,
  pub refunded_amount: Decimal,
  pub remaining_amount: Decimal,
}

impl From<CreditNote> for CreditNoteDto {
  fn from(note: CreditNote) -> Self {
    let remaining_amount = note.remaining_amount();
    Self {
      id: note.id,
      credit_note_number: note.credit_note_number.value().to_string(),
      customer_id: note.customer_id,
      invoice_id: note.invoice_id,
      issue_date: note.issue_date,
      amount: note.amount,
      currency: note.currency.as_str().to_string(),
      reason: note.reason.as_str().to_string(),
      description: note.description,
      status: note.status.as_str().to_string(),
      applied_amount: note.applied_amount,
      refunded_amount: note.refunded_amount,
      remaining_amount,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListCreditNotesResponse {
  pub credit_notes: Vec<CreditNoteDto>,
}

pub struct ListCreditNotesUseCase {
  payment_service: Arc<PaymentService>,
}

impl ListCreditNotesUseCase {
  pub fn new(payment_service: Arc<PaymentService>) -> Self {
    Self { payment_service }
  }

  pub async fn execute(&self) -> Result<ListCreditNotesResponse, PaymentError> {
    let credit_notes = self.payment_service.list_credit_notes().await?;

    Ok(ListCreditNotesResponse {
      credit_notes: credit_notes.into_iter().map(CreditNoteDto::from).collect(),
    })
  }
}
