use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::billing::value_objects::ValueObjectError;

// Payment Reference - generated from a database sequence, e.g. PAY-000042
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReference(String);

impl PaymentReference {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidStatus(
        "Payment reference cannot be empty".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn from_sequence(value: i64) -> Self {
    Self(format!("PAY-{:06}", value))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for PaymentReference {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Credit Note Number, e.g. CN-000042
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditNoteNumber(String);

impl CreditNoteNumber {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidStatus(
        "Credit note number cannot be empty".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn from_sequence(value: i64) -> Self {
    Self(format!("CN-{:06}", value))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// Payment Method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
  MobileMoney,
  Card,
  BankTransfer,
  Cash,
  Check,
}

impl PaymentMethod {
  pub fn as_str(&self) -> &'static str {
    match self {
      PaymentMethod::MobileMoney => "mobile_money",
      PaymentMethod::Card => "card",
      PaymentMethod::BankTransfer => "bank_transfer",
      PaymentMethod::Cash => "cash",
      PaymentMethod::Check => "check",
    }
  }
}

impl FromStr for PaymentMethod {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "mobile_money" => Ok(PaymentMethod::MobileMoney),
      "card" => Ok(PaymentMethod::Card),
      "bank_transfer" => Ok(PaymentMethod::BankTransfer),
      "cash" => Ok(PaymentMethod::Cash),
      "check" => Ok(PaymentMethod::Check),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown payment method: {}",
        s
      ))),
    }
  }
}

// Payment Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
  Pending,
  Completed,
  Failed,
  Cancelled,
}

impl PaymentStatus {
  /// Only completed payments may be allocated to invoices.
  pub fn is_allocatable(&self) -> bool {
    matches!(self, PaymentStatus::Completed)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      PaymentStatus::Pending => "pending",
      PaymentStatus::Completed => "completed",
      PaymentStatus::Failed => "failed",
      PaymentStatus::Cancelled => "cancelled",
    }
  }
}

impl FromStr for PaymentStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "pending" => Ok(PaymentStatus::Pending),
      "completed" => Ok(PaymentStatus::Completed),
      "failed" => Ok(PaymentStatus::Failed),
      "cancelled" => Ok(PaymentStatus::Cancelled),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown payment status: {}",
        s
      ))),
    }
  }
}

// Credit Note Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditNoteStatus {
  Pending,
  Applied,
  Refunded,
}

impl CreditNoteStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      CreditNoteStatus::Pending => "pending",
      CreditNoteStatus::Applied => "applied",
      CreditNoteStatus::Refunded => "refunded",
    }
  }
}

impl FromStr for CreditNoteStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "pending" => Ok(CreditNoteStatus::Pending),
      "applied" => Ok(CreditNoteStatus::Applied),
      "refunded" => Ok(CreditNoteStatus::Refunded),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown credit note status: {}",
        s
      ))),
    }
  }
}

// Credit Note Reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditReason {
  Refund,
  Adjustment,
  Cancellation,
  Discount,
  Other,
}

impl CreditReason {
  pub fn as_str(&self) -> &'static str {
    match self {
      CreditReason::Refund => "refund",
      CreditReason::Adjustment => "adjustment",
      CreditReason::Cancellation => "cancellation",
      CreditReason::Discount => "discount",
      CreditReason::Other => "other",
    }
  }
}

impl FromStr for CreditReason {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "refund" => Ok(CreditReason::Refund),
      "adjustment" => Ok(CreditReason::Adjustment),
      "cancellation" => Ok(CreditReason::Cancellation),
      "discount" => Ok(CreditReason::Discount),
      "other" => Ok(CreditReason::Other),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown credit reason: {}",
        s
      ))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_reference_formats() {
    assert_eq!(PaymentReference::from_sequence(7).value(), "PAY-000007");
    assert_eq!(CreditNoteNumber::from_sequence(12).value(), "CN-000012");
  }

  #[test]
  fn test_payment_status_allocatable() {
    assert!(PaymentStatus::Completed.is_allocatable());
    assert!(!PaymentStatus::Pending.is_allocatable());
    assert!(!PaymentStatus::Failed.is_allocatable());
    assert!(!PaymentStatus::Cancelled.is_allocatable());
  }

  #[test]
  fn test_parsing() {
    assert_eq!(
      PaymentMethod::from_str("bank_transfer").unwrap(),
      PaymentMethod::BankTransfer
    );
    assert!(PaymentMethod::from_str("crypto").is_err());
    assert_eq!(
      PaymentStatus::from_str("completed").unwrap(),
      PaymentStatus::Completed
    );
    assert_eq!(
      CreditReason::from_str("adjustment").unwrap(),
      CreditReason::Adjustment
    );
  }
}
