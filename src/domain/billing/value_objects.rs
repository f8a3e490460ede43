use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
  #[error("Invalid currency code: {0}")]
  InvalidCurrency(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid rate: {0}")]
  InvalidRate(String),
  #[error("Invalid description: {0}")]
  InvalidDescription(String),
  #[error("Invalid customer name: {0}")]
  InvalidCustomerName(String),
  #[error("Invalid product name: {0}")]
  InvalidProductName(String),
  #[error("Invalid status: {0}")]
  InvalidStatus(String),
  #[error("Invalid reminder level: {0}")]
  InvalidReminderLevel(String),
}

/// Rounds a monetary value to 2 decimal places, half away from zero.
///
/// Applied only when a derived figure becomes a persisted field; intermediate
/// arithmetic stays at full precision.
pub fn round_money(value: Decimal) -> Decimal {
  value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// Invoice Number - generated from a database sequence, e.g. INV-000042
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 100 {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot exceed 100 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn from_sequence(value: i64) -> Self {
    Self(format!("INV-{:06}", value))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Invoice Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
  Draft,
  Issued,
  PartiallyPaid,
  FullyPaid,
  Overdue,
  Cancelled,
}

impl InvoiceStatus {
  pub fn can_transition_to(&self, new_status: InvoiceStatus) -> bool {
    use InvoiceStatus::*;
    match (self, new_status) {
      (Draft, Issued) | (Draft, Cancelled) => true,
      (Issued, PartiallyPaid) | (Issued, FullyPaid) | (Issued, Overdue) | (Issued, Cancelled) => {
        true
      }
      (PartiallyPaid, FullyPaid) | (PartiallyPaid, Overdue) => true,
      (Overdue, PartiallyPaid) | (Overdue, FullyPaid) | (Overdue, Cancelled) => true,
      // FullyPaid and Cancelled are terminal states
      _ => false,
    }
  }

  pub fn is_editable(&self) -> bool {
    matches!(self, InvoiceStatus::Draft)
  }

  /// Whether the invoice can receive payment allocations.
  pub fn is_payable(&self) -> bool {
    matches!(
      self,
      InvoiceStatus::Issued | InvoiceStatus::PartiallyPaid | InvoiceStatus::Overdue
    )
  }

  /// Statuses that count towards outstanding balances.
  pub fn is_outstanding(&self) -> bool {
    self.is_payable()
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Draft => "draft",
      InvoiceStatus::Issued => "issued",
      InvoiceStatus::PartiallyPaid => "partially_paid",
      InvoiceStatus::FullyPaid => "fully_paid",
      InvoiceStatus::Overdue => "overdue",
      InvoiceStatus::Cancelled => "cancelled",
    }
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "draft" => Ok(InvoiceStatus::Draft),
      "issued" => Ok(InvoiceStatus::Issued),
      "partially_paid" => Ok(InvoiceStatus::PartiallyPaid),
      "fully_paid" => Ok(InvoiceStatus::FullyPaid),
      "overdue" => Ok(InvoiceStatus::Overdue),
      "cancelled" => Ok(InvoiceStatus::Cancelled),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown invoice status: {}",
        s
      ))),
    }
  }
}

// Currency - ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
  USD,
  EUR,
  GBP,
  TZS,
  KES,
}

impl Currency {
  pub fn as_str(&self) -> &'static str {
    match self {
      Currency::USD => "USD",
      Currency::EUR => "EUR",
      Currency::GBP => "GBP",
      Currency::TZS => "TZS",
      Currency::KES => "KES",
    }
  }
}

impl FromStr for Currency {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "USD" => Ok(Currency::USD),
      "EUR" => Ok(Currency::EUR),
      "GBP" => Ok(Currency::GBP),
      "TZS" => Ok(Currency::TZS),
      "KES" => Ok(Currency::KES),
      _ => Err(ValueObjectError::InvalidCurrency(format!(
        "Unsupported currency: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for Currency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Amount - non-negative monetary value, at most 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() {
      return Err(ValueObjectError::InvalidAmount(
        "Amount cannot be negative".to_string(),
      ));
    }
    if value.scale() > 2 {
      return Err(ValueObjectError::InvalidAmount(
        "Amount cannot have more than 2 decimal places".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Quantity - whole units, never negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(i32);

impl Quantity {
  pub fn new(value: i32) -> Result<Self, ValueObjectError> {
    if value < 0 {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity cannot be negative".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> i32 {
    self.0
  }

  pub fn as_decimal(&self) -> Decimal {
    Decimal::from(self.0)
  }
}

// Percentage - tax or discount rate, 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentage(Decimal);

impl Percentage {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
      return Err(ValueObjectError::InvalidRate(
        "Rate must be between 0 and 100".to_string(),
      ));
    }
    if value.scale() > 2 {
      return Err(ValueObjectError::InvalidRate(
        "Rate cannot have more than 2 decimal places".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn as_multiplier(&self) -> Decimal {
    self.0 / Decimal::from(100)
  }
}

// Line Item Description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemDescription(String);

impl LineItemDescription {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidDescription(
        "Description cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 500 {
      return Err(ValueObjectError::InvalidDescription(
        "Description cannot exceed 500 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// Customer Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerName(String);

impl CustomerName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidCustomerName(
        "Customer name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 255 {
      return Err(ValueObjectError::InvalidCustomerName(
        "Customer name cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Product Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductName(String);

impl ProductName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidProductName(
        "Product name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 255 {
      return Err(ValueObjectError::InvalidProductName(
        "Product name cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// Customer Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
  Active,
  Inactive,
}

impl CustomerStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      CustomerStatus::Active => "active",
      CustomerStatus::Inactive => "inactive",
    }
  }
}

impl FromStr for CustomerStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "active" => Ok(CustomerStatus::Active),
      "inactive" => Ok(CustomerStatus::Inactive),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown customer status: {}",
        s
      ))),
    }
  }
}

// Product Kind - goods vs. services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
  Product,
  Service,
}

impl ProductKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ProductKind::Product => "product",
      ProductKind::Service => "service",
    }
  }
}

impl FromStr for ProductKind {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "product" => Ok(ProductKind::Product),
      "service" => Ok(ProductKind::Service),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown product kind: {}",
        s
      ))),
    }
  }
}

// Dunning reminder delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderChannel {
  Email,
  Sms,
  Both,
}

impl ReminderChannel {
  pub fn as_str(&self) -> &'static str {
    match self {
      ReminderChannel::Email => "email",
      ReminderChannel::Sms => "sms",
      ReminderChannel::Both => "both",
    }
  }
}

impl FromStr for ReminderChannel {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "email" => Ok(ReminderChannel::Email),
      "sms" => Ok(ReminderChannel::Sms),
      "both" => Ok(ReminderChannel::Both),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown reminder channel: {}",
        s
      ))),
    }
  }
}

// Dunning reminder delivery status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
  Sent,
  Delivered,
  Failed,
}

impl ReminderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      ReminderStatus::Sent => "sent",
      ReminderStatus::Delivered => "delivered",
      ReminderStatus::Failed => "failed",
    }
  }
}

impl FromStr for ReminderStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "sent" => Ok(ReminderStatus::Sent),
      "delivered" => Ok(ReminderStatus::Delivered),
      "failed" => Ok(ReminderStatus::Failed),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown reminder status: {}",
        s
      ))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_round_money() {
    assert_eq!(round_money(dec!(10.005)), dec!(10.01));
    assert_eq!(round_money(dec!(10.004)), dec!(10.00));
    assert_eq!(round_money(dec!(2.675)), dec!(2.68));
    assert_eq!(round_money(dec!(100)), dec!(100.00));
  }

  #[test]
  fn test_invoice_number() {
    assert!(InvoiceNumber::new("INV-000001".to_string()).is_ok());
    assert!(InvoiceNumber::new("  ".to_string()).is_err());
    assert_eq!(InvoiceNumber::from_sequence(42).value(), "INV-000042");
  }

  #[test]
  fn test_invoice_status_transitions() {
    assert!(InvoiceStatus::Draft.can_transition_to(InvoiceStatus::Issued));
    assert!(InvoiceStatus::Draft.can_transition_to(InvoiceStatus::Cancelled));
    assert!(!InvoiceStatus::Draft.can_transition_to(InvoiceStatus::FullyPaid));

    assert!(InvoiceStatus::Issued.can_transition_to(InvoiceStatus::PartiallyPaid));
    assert!(InvoiceStatus::Issued.can_transition_to(InvoiceStatus::Overdue));
    assert!(InvoiceStatus::PartiallyPaid.can_transition_to(InvoiceStatus::FullyPaid));
    assert!(InvoiceStatus::Overdue.can_transition_to(InvoiceStatus::FullyPaid));

    assert!(!InvoiceStatus::FullyPaid.can_transition_to(InvoiceStatus::Issued));
    assert!(!InvoiceStatus::Cancelled.can_transition_to(InvoiceStatus::Draft));
  }

  #[test]
  fn test_invoice_status_predicates() {
    assert!(InvoiceStatus::Draft.is_editable());
    assert!(!InvoiceStatus::Issued.is_editable());

    assert!(InvoiceStatus::Issued.is_payable());
    assert!(InvoiceStatus::PartiallyPaid.is_payable());
    assert!(InvoiceStatus::Overdue.is_payable());
    assert!(!InvoiceStatus::Draft.is_payable());
    assert!(!InvoiceStatus::FullyPaid.is_payable());
    assert!(!InvoiceStatus::Cancelled.is_payable());
  }

  #[test]
  fn test_currency() {
    assert_eq!(Currency::USD.as_str(), "USD");
    assert_eq!(Currency::from_str("usd").unwrap(), Currency::USD);
    assert!(Currency::from_str("JPY").is_err());
  }

  #[test]
  fn test_amount() {
    assert!(Amount::new(dec!(100.50)).is_ok());
    assert!(Amount::new(dec!(0)).is_ok());
    assert!(Amount::new(dec!(-10)).is_err());
    assert!(Amount::new(dec!(1.999)).is_err());
  }

  #[test]
  fn test_quantity() {
    assert!(Quantity::new(0).is_ok());
    assert!(Quantity::new(3).is_ok());
    assert!(Quantity::new(-1).is_err());
    assert_eq!(Quantity::new(2).unwrap().as_decimal(), dec!(2));
  }

  #[test]
  fn test_percentage() {
    assert!(Percentage::new(dec!(0)).is_ok());
    assert!(Percentage::new(dec!(100)).is_ok());
    assert!(Percentage::new(dec!(-1)).is_err());
    assert!(Percentage::new(dec!(101)).is_err());
    assert!(Percentage::new(dec!(18.125)).is_err());
    assert_eq!(Percentage::new(dec!(10)).unwrap().as_multiplier(), dec!(0.1));
  }

  #[test]
  fn test_status_parsing() {
    assert_eq!(
      InvoiceStatus::from_str("partially_paid").unwrap(),
      InvoiceStatus::PartiallyPaid
    );
    assert!(InvoiceStatus::from_str("unknown").is_err());
    assert_eq!(
      CustomerStatus::from_str("active").unwrap(),
      CustomerStatus::Active
    );
    assert_eq!(
      ProductKind::from_str("service").unwrap(),
      ProductKind::Service
    );
    assert_eq!(
      ReminderChannel::from_str("both").unwrap(),
      ReminderChannel::Both
    );
  }
}
