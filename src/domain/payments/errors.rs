use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::billing::errors::BillingError;
use crate::domain::billing::value_objects::{Currency, InvoiceStatus, ValueObjectError};

use super::value_objects::PaymentStatus;

#[derive(Debug, Error)]
pub enum PaymentError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Allocation of {requested} exceeds the payment's unallocated amount of {unallocated}")]
  OverAllocation {
    requested: Decimal,
    unallocated: Decimal,
  },

  #[error("Allocation of {requested} exceeds the invoice balance due of {balance_due}")]
  AllocationExceedsBalance {
    requested: Decimal,
    balance_due: Decimal,
  },

  #[error("Payment is {0:?} and cannot be allocated")]
  PaymentNotAllocatable(PaymentStatus),

  #[error("Invoice {invoice_id} is {status:?} and cannot receive payments")]
  InvoiceNotPayable {
    invoice_id: Uuid,
    status: InvoiceStatus,
  },

  #[error("Currency mismatch: expected {expected}, got {actual}")]
  CurrencyMismatch { expected: Currency, actual: Currency },

  #[error("Invalid payment status change: {from:?} -> {to:?}")]
  InvalidPaymentStatusChange {
    from: PaymentStatus,
    to: PaymentStatus,
  },

  #[error("Credit of {requested} exceeds the remaining amount of {remaining}")]
  CreditExhausted {
    requested: Decimal,
    remaining: Decimal,
  },

  #[error("Credit note is not linked to an invoice")]
  CreditNoteUnlinked,

  #[error("Payment not found: {0}")]
  PaymentNotFound(Uuid),

  #[error("Credit note not found: {0}")]
  CreditNoteNotFound(Uuid),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Customer not found: {0}")]
  CustomerNotFound(Uuid),

  #[error(transparent)]
  Billing(#[from] BillingError),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
