use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::entities::Invoice;
use crate::domain::billing::ports::{CustomerRepository, InvoiceRepository};
use crate::domain::billing::value_objects::Currency;

use super::entities::{CreditNote, Payment, PaymentAllocation};
use super::errors::PaymentError;
use super::ports::{CreditNoteRepository, PaymentAllocationRepository, PaymentRepository};
use super::value_objects::{CreditReason, PaymentMethod, PaymentStatus};

/// Payment creation data.
#[derive(Debug, Clone)]
pub struct PaymentData {
  pub customer_id: Uuid,
  pub amount: Decimal,
  pub currency: Currency,
  pub method: PaymentMethod,
  pub payment_date: Option<DateTime<Utc>>,
  pub notes: Option<String>,
}

/// Credit note creation data.
#[derive(Debug, Clone)]
pub struct CreditNoteData {
  pub customer_id: Uuid,
  pub invoice_id: Option<Uuid>,
  pub issue_date: NaiveDate,
  pub amount: Decimal,
  pub currency: Currency,
  pub reason: CreditReason,
  pub description: String,
}

pub struct PaymentServiceDependencies {
  pub payment_repo: Arc<dyn PaymentRepository>,
  pub allocation_repo: Arc<dyn PaymentAllocationRepository>,
  pub credit_note_repo: Arc<dyn CreditNoteRepository>,
  pub invoice_repo: Arc<dyn InvoiceRepository>,
  pub customer_repo: Arc<dyn CustomerRepository>,
}

pub struct PaymentService {
  payment_repo: Arc<dyn PaymentRepository>,
  allocation_repo: Arc<dyn PaymentAllocationRepository>,
  credit_note_repo: Arc<dyn CreditNoteRepository>,
  invoice_repo: Arc<dyn InvoiceRepository>,
  customer_repo: Arc<dyn CustomerRepository>,
}

impl PaymentService {
  pub fn new(deps: PaymentServiceDependencies) -> Self {
    Self {
      payment_repo: deps.payment_repo,
      allocation_repo: deps.allocation_repo,
      credit_note_repo: deps.credit_note_repo,
      invoice_repo: deps.invoice_repo,
      customer_repo: deps.customer_repo,
    }
  }

  // Payment operations

  pub async fn record_payment(&self, data: PaymentData) -> Result<Payment, PaymentError> {
    self
      .customer_repo
      .find_by_id(data.customer_id)
      .await?
      .ok_or(PaymentError::CustomerNotFound(data.customer_id))?;

    let reference = self.payment_repo.next_payment_reference().await?;
    let payment = Payment::new(
      data.customer_id,
      reference,
      data.amount,
      data.currency,
      data.method,
      data.payment_date,
      data.notes,
    )?;

    self.payment_repo.create(payment).await
  }

  pub async fn change_payment_status(
    &self,
    payment_id: Uuid,
    new_status: PaymentStatus,
  ) -> Result<Payment, PaymentError> {
    let mut payment = self
      .payment_repo
      .find_by_id(payment_id)
      .await?
      .ok_or(PaymentError::PaymentNotFound(payment_id))?;

    payment.change_status(new_status)?;
    self.payment_repo.update(payment).await
  }

  pub async fn get_payment(
    &self,
    payment_id: Uuid,
  ) -> Result<(Payment, Vec<PaymentAllocation>, Decimal), PaymentError> {
    let payment = self
      .payment_repo
      .find_by_id(payment_id)
      .await?
      .ok_or(PaymentError::PaymentNotFound(payment_id))?;

    let allocations = self.allocation_repo.find_by_payment_id(payment_id).await?;
    let unallocated = payment.unallocated_amount(&allocations);

    Ok((payment, allocations, unallocated))
  }

  pub async fn list_payments(&self) -> Result<Vec<Payment>, PaymentError> {
    self.payment_repo.list().await
  }

  pub async fn list_payments_for_customer(
    &self,
    customer_id: Uuid,
  ) -> Result<Vec<Payment>, PaymentError> {
    self.payment_repo.find_by_customer(customer_id).await
  }

  pub async fn allocations_for_invoice(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<PaymentAllocation>, PaymentError> {
    self.allocation_repo.find_by_invoice_id(invoice_id).await
  }

  /// Allocates part of a payment to an invoice.
  ///
  /// Guards, in order: the payment must be completed, the invoice payable
  /// and in the payment's currency, the amount within the payment's
  /// unallocated remainder and within the invoice's balance due. The
  /// allocation row and the recomputed invoice (paid_amount, balance_due,
  /// and the status derived from the new balance) are persisted atomically.
  pub async fn allocate(
    &self,
    payment_id: Uuid,
    invoice_id: Uuid,
    amount: Decimal,
  ) -> Result<(PaymentAllocation, Invoice), PaymentError> {
    if amount <= Decimal::ZERO {
      return Err(PaymentError::Validation(
        crate::domain::billing::value_objects::ValueObjectError::InvalidAmount(
          "Allocation amount must be positive".to_string(),
        ),
      ));
    }

    let payment = self
      .payment_repo
      .find_by_id(payment_id)
      .await?
      .ok_or(PaymentError::PaymentNotFound(payment_id))?;

    if !payment.status.is_allocatable() {
      return Err(PaymentError::PaymentNotAllocatable(payment.status));
    }

    let mut invoice = self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(PaymentError::InvoiceNotFound(invoice_id))?;

    if invoice.currency != payment.currency {
      return Err(PaymentError::CurrencyMismatch {
        expected: invoice.currency,
        actual: payment.currency,
      });
    }

    if !invoice.is_payable() {
      return Err(PaymentError::InvoiceNotPayable {
        invoice_id: invoice.id,
        status: invoice.status,
      });
    }

    let allocations = self.allocation_repo.find_by_payment_id(payment_id).await?;
    let unallocated = payment.unallocated_amount(&allocations);
    if amount > unallocated {
      return Err(PaymentError::OverAllocation {
        requested: amount,
        unallocated,
      });
    }

    if amount > invoice.balance_due {
      return Err(PaymentError::AllocationExceedsBalance {
        requested: amount,
        balance_due: invoice.balance_due,
      });
    }

    let allocation = match allocations.into_iter().find(|a| a.invoice_id == invoice_id) {
      Some(mut existing) => {
        existing.merge(amount);
        existing
      }
      None => PaymentAllocation::new(payment_id, invoice_id, amount),
    };

    invoice.apply_payment(amount);

    let recorded = self.allocation_repo.record(allocation, &invoice).await?;
    Ok((recorded, invoice))
  }

  // Credit note operations

  pub async fn create_credit_note(&self, data: CreditNoteData) -> Result<CreditNote, PaymentError> {
    self
      .customer_repo
      .find_by_id(data.customer_id)
      .await?
      .ok_or(PaymentError::CustomerNotFound(data.customer_id))?;

    if let Some(invoice_id) = data.invoice_id {
      self
        .invoice_repo
        .find_by_id(invoice_id)
        .await?
        .ok_or(PaymentError::InvoiceNotFound(invoice_id))?;
    }

    let number = self.credit_note_repo.next_credit_note_number().await?;
    let credit_note = CreditNote::new(
      number,
      data.customer_id,
      data.invoice_id,
      data.issue_date,
      data.amount,
      data.currency,
      data.reason,
      data.description,
    )?;

    self.credit_note_repo.create(credit_note).await
  }

  /// Applies part of a credit note against its linked invoice. The credit
  /// draw-down and the invoice recomputation mirror payment allocation and
  /// are persisted atomically.
  pub async fn apply_credit_note(
    &self,
    credit_note_id: Uuid,
    amount: Decimal,
  ) -> Result<(CreditNote, Invoice), PaymentError> {
    let mut credit_note = self
      .credit_note_repo
      .find_by_id(credit_note_id)
      .await?
      .ok_or(PaymentError::CreditNoteNotFound(credit_note_id))?;

    let invoice_id = credit_note
      .invoice_id
      .ok_or(PaymentError::CreditNoteUnlinked)?;

    let mut invoice = self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(PaymentError::InvoiceNotFound(invoice_id))?;

    if invoice.currency != credit_note.currency {
      return Err(PaymentError::CurrencyMismatch {
        expected: invoice.currency,
        actual: credit_note.currency,
      });
    }

    if !invoice.is_payable() {
      return Err(PaymentError::InvoiceNotPayable {
        invoice_id: invoice.id,
        status: invoice.status,
      });
    }

    if amount > invoice.balance_due {
      return Err(PaymentError::AllocationExceedsBalance {
        requested: amount,
        balance_due: invoice.balance_due,
      });
    }

    credit_note.apply(amount)?;
    invoice.apply_payment(amount);

    let applied = self.credit_note_repo.apply(&credit_note, &invoice).await?;
    Ok((applied, invoice))
  }

  pub async fn refund_credit_note(
    &self,
    credit_note_id: Uuid,
    amount: Decimal,
  ) -> Result<CreditNote, PaymentError> {
    let mut credit_note = self
      .credit_note_repo
      .find_by_id(credit_note_id)
      .await?
      .ok_or(PaymentError::CreditNoteNotFound(credit_note_id))?;

    credit_note.refund(amount)?;
    self.credit_note_repo.update(credit_note).await
  }

  pub async fn list_credit_notes(&self) -> Result<Vec<CreditNote>, PaymentError> {
    self.credit_note_repo.list().await
  }
}
