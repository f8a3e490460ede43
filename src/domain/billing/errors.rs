use thiserror::Error;
use uuid::Uuid;

use super::value_objects::{InvoiceStatus, ValueObjectError};

#[derive(Debug, Error)]
pub enum BillingError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invalid line item: {0}")]
  InvalidLineItem(String),

  #[error("An invoice needs at least one line item")]
  NoLineItems,

  #[error("Invoice {invoice_id} is {status:?} and can no longer be modified")]
  ImmutableInvoiceState {
    invoice_id: Uuid,
    status: InvoiceStatus,
  },

  #[error("Invalid status transition: {from:?} -> {to:?}")]
  InvalidStatusTransition {
    from: InvoiceStatus,
    to: InvoiceStatus,
  },

  #[error("Invoice {0} is still a draft and cannot receive reminders")]
  ReminderOnDraft(Uuid),

  #[error("Customer not found: {0}")]
  CustomerNotFound(Uuid),

  #[error("Product not found: {0}")]
  ProductNotFound(Uuid),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("{0}")]
  ReferentialConflict(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}
