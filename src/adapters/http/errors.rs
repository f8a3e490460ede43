use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::billing::BillingError;
use crate::domain::payments::PaymentError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Resource not found (404 Not Found)
  NotFound(String),

  /// State conflict, e.g. immutable invoice or over-allocation (409 Conflict)
  Conflict(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert BillingError to ApiError
impl From<BillingError> for ApiError {
  fn from(error: BillingError) -> Self {
    match error {
      BillingError::Validation(e) => ApiError::Validation(e.to_string()),
      BillingError::InvalidLineItem(msg) => ApiError::Validation(msg),
      BillingError::NoLineItems => {
        ApiError::Validation("An invoice requires at least one line item".to_string())
      }
      BillingError::ImmutableInvoiceState { .. } => ApiError::Conflict(error.to_string()),
      BillingError::InvalidStatusTransition { .. } => ApiError::Conflict(error.to_string()),
      BillingError::ReminderOnDraft(_) => ApiError::Conflict(error.to_string()),
      BillingError::CustomerNotFound(_)
      | BillingError::ProductNotFound(_)
      | BillingError::InvoiceNotFound(_) => ApiError::NotFound(error.to_string()),
      BillingError::ReferentialConflict(msg) => ApiError::Conflict(msg),
      BillingError::Database(e) => ApiError::Internal(e.to_string()),
      BillingError::Internal(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert PaymentError to ApiError
impl From<PaymentError> for ApiError {
  fn from(error: PaymentError) -> Self {
    match error {
      PaymentError::Validation(e) => ApiError::Validation(e.to_string()),
      PaymentError::OverAllocation { .. }
      | PaymentError::AllocationExceedsBalance { .. }
      | PaymentError::PaymentNotAllocatable(_)
      | PaymentError::InvoiceNotPayable { .. }
      | PaymentError::InvalidPaymentStatusChange { .. }
      | PaymentError::CreditExhausted { .. } => ApiError::Conflict(error.to_string()),
      PaymentError::CurrencyMismatch { .. } | PaymentError::CreditNoteUnlinked => {
        ApiError::Validation(error.to_string())
      }
      PaymentError::PaymentNotFound(_)
      | PaymentError::CreditNoteNotFound(_)
      | PaymentError::InvoiceNotFound(_)
      | PaymentError::CustomerNotFound(_) => ApiError::NotFound(error.to_string()),
      PaymentError::Billing(e) => ApiError::from(e),
      PaymentError::Database(e) => ApiError::Internal(e.to_string()),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::NotFound("test".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Conflict("test".to_string()).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_billing_error_conversion() {
    let api_error: ApiError = BillingError::CustomerNotFound(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = BillingError::NoLineItems.into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError =
      BillingError::ReferentialConflict("in use".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);
  }

  #[test]
  fn test_payment_error_conversion() {
    let api_error: ApiError = PaymentError::OverAllocation {
      requested: dec!(550),
      unallocated: dec!(200),
    }
    .into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    let api_error: ApiError = PaymentError::PaymentNotFound(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);
  }
}
