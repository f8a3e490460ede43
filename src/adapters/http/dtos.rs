use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to create or update a customer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerRequest {
  /// Customer's display name
  #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
  pub name: String,

  /// Customer's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  pub phone: Option<String>,
  pub company: Option<String>,
  pub billing_address: Option<String>,
  pub shipping_address: Option<String>,
  pub tax_number: Option<String>,

  /// Either "active" or "inactive"; defaults to active
  pub status: Option<String>,
}

/// Request to create or update a product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductRequest {
  /// Product's display name
  #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
  pub name: String,

  pub description: Option<String>,
  pub sku: Option<String>,

  /// Unit price, non-negative with at most 2 decimal places
  pub price: Decimal,

  /// Default tax rate percentage, 0 to 100
  pub tax_rate: Option<Decimal>,

  /// Either "product" or "service"
  pub kind: String,

  /// Defaults to true
  pub is_active: Option<bool>,
}

/// One invoice line item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LineItemRequest {
  pub product_id: Option<Uuid>,

  #[validate(length(
    min = 1,
    max = 500,
    message = "Description must be between 1 and 500 characters"
  ))]
  pub description: String,

  pub quantity: i32,
  pub unit_price: Decimal,
  pub tax_rate: Option<Decimal>,
  pub discount_rate: Option<Decimal>,
}

/// Request to create or update an invoice
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceRequest {
  pub customer_id: Uuid,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,

  /// ISO 4217 currency code
  pub currency: String,

  pub notes: Option<String>,

  #[validate(length(min = 1, message = "At least one line item is required"))]
  #[validate(nested)]
  pub items: Vec<LineItemRequest>,
}

/// Request to change an invoice's status
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeInvoiceStatusRequest {
  #[validate(length(min = 1, message = "Status is required"))]
  pub status: String,
}

/// Request to record a dunning reminder against an invoice
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordReminderRequest {
  /// One of "email", "sms", "both"
  #[validate(length(min = 1, message = "Channel is required"))]
  pub channel: String,

  /// Escalation level, starting at 1
  #[validate(range(min = 1, message = "Reminder level starts at 1"))]
  pub reminder_level: i32,

  pub message: Option<String>,
  pub next_reminder_at: Option<DateTime<Utc>>,
}

/// Request to record an incoming payment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordPaymentRequest {
  pub customer_id: Uuid,
  pub amount: Decimal,

  /// ISO 4217 currency code
  pub currency: String,

  /// One of "mobile_money", "card", "bank_transfer", "cash", "check"
  #[validate(length(min = 1, message = "Payment method is required"))]
  pub method: String,

  pub payment_date: Option<DateTime<Utc>>,
  pub notes: Option<String>,
}

/// Request to change a payment's status
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePaymentStatusRequest {
  #[validate(length(min = 1, message = "Status is required"))]
  pub status: String,
}

/// Request to allocate part of a payment to an invoice
#[derive(Debug, Clone, Deserialize)]
pub struct AllocatePaymentRequest {
  pub invoice_id: Uuid,
  pub amount: Decimal,
}

/// Request to create a credit note
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCreditNoteRequest {
  pub customer_id: Uuid,
  pub invoice_id: Option<Uuid>,
  pub issue_date: NaiveDate,
  pub amount: Decimal,

  /// ISO 4217 currency code
  pub currency: String,

  /// One of "refund", "adjustment", "cancellation", "discount", "other"
  #[validate(length(min = 1, message = "Reason is required"))]
  pub reason: String,

  #[validate(length(min = 1, max = 1000, message = "Description is required"))]
  pub description: String,
}

/// Request to apply or refund part of a credit note
#[derive(Debug, Clone, Deserialize)]
pub struct CreditNoteAmountRequest {
  pub amount: Decimal,
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  /// Success message
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}
