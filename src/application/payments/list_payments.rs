use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::payments::{Payment, PaymentError, PaymentService};

#[derive(Debug, Serialize)]
pub struct PaymentDto {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub payment_reference: String,
  pub amount: Decimal,
  pub currency: String,
  pub method: String,
  pub status: String,
  pub payment_date: Option<DateTime<Utc>>,
  pub notes: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
  fn from(payment: Payment) -> Self {
    Self {
      id: payment.id,
      customer_id: payment.customer_id,
      payment_reference: payment.payment_reference.value().to_string(),
      amount: payment.amount,
      currency: payment.currency.as_str().to_string(),
      method: payment.method.as_str().to_string(),
      status: payment.status.as_str().to_string(),
      payment_date: payment.payment_date,
      notes: payment.notes,
      created_at: payment.created_at,
    }
  }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPaymentsCommand {
  pub customer_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ListPaymentsResponse {
  pub payments: Vec<PaymentDto>,
}

pub struct ListPaymentsUseCase {
  payment_service: Arc<PaymentService>,
}

impl ListPaymentsUseCase {
  pub fn new(payment_service: Arc<PaymentService>) -> Self {
    Self { payment_service }
  }

  pub async fn execute(
    &self,
    command: ListPaymentsCommand,
  ) -> Result<ListPaymentsResponse, PaymentError> {
    let payments = match command.customer_id {
      Some(customer_id) => {
        self
          .payment_service
          .list_payments_for_customer(customer_id)
          .await?
      }
      None => self.payment_service.list_payments().await?,
    };

    Ok(ListPaymentsResponse {
      payments: payments.into_iter().map(PaymentDto::from).collect(),
    })
  }
}
