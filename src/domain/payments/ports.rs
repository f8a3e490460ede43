use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::billing::entities::Invoice;

use super::entities::{CreditNote, Payment, PaymentAllocation};
use super::errors::PaymentError;
use super::value_objects::{CreditNoteNumber, PaymentReference};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
  /// Allocates the next value of the payment reference sequence.
  async fn next_payment_reference(&self) -> Result<PaymentReference, PaymentError>;
  async fn create(&self, payment: Payment) -> Result<Payment, PaymentError>;
  async fn update(&self, payment: Payment) -> Result<Payment, PaymentError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, PaymentError>;
  async fn list(&self) -> Result<Vec<Payment>, PaymentError>;
  async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Payment>, PaymentError>;
}

#[async_trait]
pub trait PaymentAllocationRepository: Send + Sync {
  async fn find_by_payment_id(
    &self,
    payment_id: Uuid,
  ) -> Result<Vec<PaymentAllocation>, PaymentError>;
  async fn find_by_invoice_id(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<PaymentAllocation>, PaymentError>;

  /// Persists the allocation row and the recomputed invoice in one atomic
  /// unit. The (payment, invoice) pair is unique at the data layer; the
  /// caller passes the already-merged row for repeat allocations.
  async fn record(
    &self,
    allocation: PaymentAllocation,
    invoice: &Invoice,
  ) -> Result<PaymentAllocation, PaymentError>;
}

#[async_trait]
pub trait CreditNoteRepository: Send + Sync {
  async fn next_credit_note_number(&self) -> Result<CreditNoteNumber, PaymentError>;
  async fn create(&self, credit_note: CreditNote) -> Result<CreditNote, PaymentError>;
  async fn update(&self, credit_note: CreditNote) -> Result<CreditNote, PaymentError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<CreditNote>, PaymentError>;
  async fn list(&self) -> Result<Vec<CreditNote>, PaymentError>;

  /// Persists the drawn-down credit note and the recomputed invoice in one
  /// atomic unit.
  async fn apply(
    &self,
    credit_note: &CreditNote,
    invoice: &Invoice,
  ) -> Result<CreditNote, PaymentError>;
}
