use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::billing::value_objects::{Currency, ValueObjectError};

use super::errors::PaymentError;
use super::value_objects::{
  CreditNoteNumber, CreditNoteStatus, CreditReason, PaymentMethod, PaymentReference, PaymentStatus,
};

// Payment - money received from a customer, not yet tied to invoices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub payment_reference: PaymentReference,
  pub amount: Decimal,
  pub currency: Currency,
  pub method: PaymentMethod,
  pub status: PaymentStatus,
  pub payment_date: Option<DateTime<Utc>>,
  pub notes: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Payment {
  pub fn new(
    customer_id: Uuid,
    payment_reference: PaymentReference,
    amount: Decimal,
    currency: Currency,
    method: PaymentMethod,
    payment_date: Option<DateTime<Utc>>,
    notes: Option<String>,
  ) -> Result<Self, ValueObjectError> {
    if amount <= Decimal::ZERO {
      return Err(ValueObjectError::InvalidAmount(
        "Payment amount must be positive".to_string(),
      ));
    }
    if amount.scale() > 2 {
      return Err(ValueObjectError::InvalidAmount(
        "Payment amount cannot have more than 2 decimal places".to_string(),
      ));
    }

    let now = Utc::now();
    Ok(Self {
      id: Uuid::new_v4(),
      customer_id,
      payment_reference,
      amount,
      currency,
      method,
      status: PaymentStatus::Pending,
      payment_date,
      notes,
      created_at: now,
      updated_at: now,
    })
  }

  /// Pending payments settle into a terminal state exactly once.
  pub fn change_status(&mut self, new_status: PaymentStatus) -> Result<(), PaymentError> {
    if self.status != PaymentStatus::Pending || new_status == PaymentStatus::Pending {
      return Err(PaymentError::InvalidPaymentStatusChange {
        from: self.status,
        to: new_status,
      });
    }

    self.status = new_status;
    if new_status == PaymentStatus::Completed && self.payment_date.is_none() {
      self.payment_date = Some(Utc::now());
    }
    self.updated_at = Utc::now();
    Ok(())
  }

  pub fn allocated_amount(&self, allocations: &[PaymentAllocation]) -> Decimal {
    allocations
      .iter()
      .filter(|a| a.payment_id == self.id)
      .map(|a| a.allocated_amount)
      .sum()
  }

  pub fn unallocated_amount(&self, allocations: &[PaymentAllocation]) -> Decimal {
    self.amount - self.allocated_amount(allocations)
  }
}

// Payment Allocation - one row per (payment, invoice) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAllocation {
  pub id: Uuid,
  pub payment_id: Uuid,
  pub invoice_id: Uuid,
  pub allocated_amount: Decimal,
  pub allocated_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl PaymentAllocation {
  pub fn new(payment_id: Uuid, invoice_id: Uuid, allocated_amount: Decimal) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      payment_id,
      invoice_id,
      allocated_amount,
      allocated_at: now,
      created_at: now,
    }
  }

  /// A repeat allocation against the same (payment, invoice) pair merges
  /// additively into the existing row instead of creating a duplicate.
  pub fn merge(&mut self, additional: Decimal) {
    self.allocated_amount += additional;
    self.allocated_at = Utc::now();
  }
}

// Credit Note - issued credit drawn down by application or refund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditNote {
  pub id: Uuid,
  pub credit_note_number: CreditNoteNumber,
  pub customer_id: Uuid,
  pub invoice_id: Option<Uuid>,
  pub issue_date: NaiveDate,
  pub amount: Decimal,
  pub currency: Currency,
  pub reason: CreditReason,
  pub description: String,
  pub status: CreditNoteStatus,
  pub applied_amount: Decimal,
  pub refunded_amount: Decimal,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl CreditNote {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    credit_note_number: CreditNoteNumber,
    customer_id: Uuid,
    invoice_id: Option<Uuid>,
    issue_date: NaiveDate,
    amount: Decimal,
    currency: Currency,
    reason: CreditReason,
    description: String,
  ) -> Result<Self, ValueObjectError> {
    if amount <= Decimal::ZERO {
      return Err(ValueObjectError::InvalidAmount(
        "Credit note amount must be positive".to_string(),
      ));
    }
    if amount.scale() > 2 {
      return Err(ValueObjectError::InvalidAmount(
        "Credit note amount cannot have more than 2 decimal places".to_string(),
      ));
    }

    let now = Utc::now();
    Ok(Self {
      id: Uuid::new_v4(),
      credit_note_number,
      customer_id,
      invoice_id,
      issue_date,
      amount,
      currency,
      reason,
      description,
      status: CreditNoteStatus::Pending,
      applied_amount: Decimal::ZERO,
      refunded_amount: Decimal::ZERO,
      created_at: now,
      updated_at: now,
    })
  }

  pub fn remaining_amount(&self) -> Decimal {
    self.amount - self.applied_amount - self.refunded_amount
  }

  pub fn apply(&mut self, amount: Decimal) -> Result<(), PaymentError> {
    self.draw_down(amount)?;
    self.applied_amount += amount;
    if self.remaining_amount().is_zero() {
      self.status = CreditNoteStatus::Applied;
    }
    self.updated_at = Utc::now();
    Ok(())
  }

  pub fn refund(&mut self, amount: Decimal) -> Result<(), PaymentError> {
    self.draw_down(amount)?;
    self.refunded_amount += amount;
    if self.remaining_amount().is_zero() {
      self.status = CreditNoteStatus::Refunded;
    }
    self.updated_at = Utc::now();
    Ok(())
  }

  fn draw_down(&self, amount: Decimal) -> Result<(), PaymentError> {
    if amount <= Decimal::ZERO {
      return Err(PaymentError::Validation(ValueObjectError::InvalidAmount(
        "Amount must be positive".to_string(),
      )));
    }
    let remaining = self.remaining_amount();
    if amount > remaining {
      return Err(PaymentError::CreditExhausted {
        requested: amount,
        remaining,
      });
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn payment(amount: Decimal) -> Payment {
    Payment::new(
      Uuid::new_v4(),
      PaymentReference::from_sequence(1),
      amount,
      Currency::USD,
      PaymentMethod::BankTransfer,
      None,
      None,
    )
    .unwrap()
  }

  #[test]
  fn test_payment_rejects_non_positive_amount() {
    assert!(
      Payment::new(
        Uuid::new_v4(),
        PaymentReference::from_sequence(1),
        dec!(0),
        Currency::USD,
        PaymentMethod::Cash,
        None,
        None,
      )
      .is_err()
    );
  }

  #[test]
  fn test_payment_status_settles_once() {
    let mut p = payment(dec!(100));
    assert!(p.change_status(PaymentStatus::Completed).is_ok());
    assert!(p.payment_date.is_some());
    assert!(p.change_status(PaymentStatus::Failed).is_err());

    let mut p = payment(dec!(100));
    assert!(p.change_status(PaymentStatus::Cancelled).is_ok());
    assert!(p.change_status(PaymentStatus::Completed).is_err());
  }

  #[test]
  fn test_unallocated_amount() {
    let p = payment(dec!(500));
    let allocations = vec![
      PaymentAllocation::new(p.id, Uuid::new_v4(), dec!(300)),
      // Belongs to a different payment, must not count
      PaymentAllocation::new(Uuid::new_v4(), Uuid::new_v4(), dec!(50)),
    ];
    assert_eq!(p.allocated_amount(&allocations), dec!(300));
    assert_eq!(p.unallocated_amount(&allocations), dec!(200));
  }

  #[test]
  fn test_allocation_merge() {
    let mut allocation = PaymentAllocation::new(Uuid::new_v4(), Uuid::new_v4(), dec!(100));
    allocation.merge(dec!(50));
    assert_eq!(allocation.allocated_amount, dec!(150));
  }

  fn credit_note(amount: Decimal) -> CreditNote {
    CreditNote::new(
      CreditNoteNumber::from_sequence(1),
      Uuid::new_v4(),
      None,
      NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
      amount,
      Currency::USD,
      CreditReason::Adjustment,
      "Price correction".to_string(),
    )
    .unwrap()
  }

  #[test]
  fn test_credit_note_remaining_accounting() {
    let mut note = credit_note(dec!(100));
    assert_eq!(note.remaining_amount(), dec!(100));

    note.apply(dec!(40)).unwrap();
    assert_eq!(note.remaining_amount(), dec!(60));
    assert_eq!(note.status, CreditNoteStatus::Pending);

    note.refund(dec!(20)).unwrap();
    assert_eq!(note.remaining_amount(), dec!(40));

    assert!(matches!(
      note.apply(dec!(50)),
      Err(PaymentError::CreditExhausted { .. })
    ));

    note.apply(dec!(40)).unwrap();
    assert_eq!(note.remaining_amount(), dec!(0));
    assert_eq!(note.status, CreditNoteStatus::Applied);
  }
}
