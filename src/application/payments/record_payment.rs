use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::Currency;
use crate::domain::payments::{
  PaymentError, PaymentMethod, PaymentService, services::PaymentData,
};

#[derive(Debug, Deserialize)]
pub struct RecordPaymentCommand {
  pub customer_id: Uuid,
  pub amount: Decimal,
  pub currency: String,
  pub method: String,
  pub payment_date: Option<DateTime<Utc>>,
  pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordPaymentResponse {
  pub payment_id: Uuid,
  pub payment_reference: String,
  pub status: String,
}

pub struct RecordPaymentUseCase {
  payment_service: Arc<PaymentService>,
}

impl RecordPaymentUseCase {
  pub fn new(payment_service: Arc<PaymentService>) -> Self {
    Self { payment_service }
  }

  pub async fn execute(
    &self,
    command: RecordPaymentCommand,
  ) -> Result<RecordPaymentResponse, PaymentError> {
    let currency = Currency::from_str(&command.currency)?;
    let method = PaymentMethod::from_str(&command.method)?;

    let payment = self
      .payment_service
      .record_payment(PaymentData {
        customer_id: command.customer_id,
        amount: command.amount,
        currency,
        method,
        payment_date: command.payment_date,
        notes: command.notes,
      })
      .await?;

    Ok(RecordPaymentResponse {
      payment_id: payment.id,
      payment_reference: payment.payment_reference.value().to_string(),
      status: payment.status.as_str().to_string(),
    })
  }
}
