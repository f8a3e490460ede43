use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::billing::Currency;
use crate::domain::payments::{
  Payment, PaymentError, PaymentMethod, PaymentReference, PaymentStatus, ports::PaymentRepository,
};

#[derive(Debug, FromRow)]
struct PaymentRow {
  id: Uuid,
  customer_id: Uuid,
  payment_reference: String,
  amount: Decimal,
  currency: String,
  method: String,
  status: String,
  payment_date: Option<DateTime<Utc>>,
  notes: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
  type Error = PaymentError;

  fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
    let payment_reference = PaymentReference::new(row.payment_reference)?;
    let currency = Currency::from_str(&row.currency)?;
    let method = PaymentMethod::from_str(&row.method)?;
    let status = PaymentStatus::from_str(&row.status)?;

    Ok(Payment {
      id: row.id,
      customer_id: row.customer_id,
      payment_reference,
      amount: row.amount,
      currency,
      method,
      status,
      payment_date: row.payment_date,
      notes: row.notes,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresPaymentRepository {
  pool: PgPool,
}

impl PostgresPaymentRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
  async fn next_payment_reference(&self) -> Result<PaymentReference, PaymentError> {
    let (next,): (i64,) = sqlx::query_as("SELECT nextval('payment_reference_seq')")
      .fetch_one(&self.pool)
      .await?;

    Ok(PaymentReference::from_sequence(next))
  }

  async fn create(&self, payment: Payment) -> Result<Payment, PaymentError> {
    let row = sqlx::query_as::<_, PaymentRow>(
      r#"
            INSERT INTO payments (
                id, customer_id, payment_reference, amount, currency, method,
                status, payment_date, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, customer_id, payment_reference, amount, currency, method,
                      status, payment_date, notes, created_at, updated_at
            "#,
    )
    .bind(payment.id)
    .bind(payment.customer_id)
    .bind(payment.payment_reference.value())
    .bind(payment.amount)
    .bind(payment.currency.as_str())
    .bind(payment.method.as_str())
    .bind(payment.status.as_str())
    .bind(payment.payment_date)
    .bind(payment.notes)
    .bind(payment.created_at)
    .bind(payment.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, payment: Payment) -> Result<Payment, PaymentError> {
    let row = sqlx::query_as::<_, PaymentRow>(
      r#"
            UPDATE payments
            SET status = $2, payment_date = $3, notes = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, customer_id, payment_reference, amount, currency, method,
                      status, payment_date, notes, created_at, updated_at
            "#,
    )
    .bind(payment.id)
    .bind(payment.status.as_str())
    .bind(payment.payment_date)
    .bind(payment.notes)
    .bind(payment.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, PaymentError> {
    let row = sqlx::query_as::<_, PaymentRow>(
      r#"
            SELECT id, customer_id, payment_reference, amount, currency, method,
                   status, payment_date, notes, created_at, updated_at
            FROM payments
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn list(&self) -> Result<Vec<Payment>, PaymentError> {
    let rows = sqlx::query_as::<_, PaymentRow>(
      r#"
            SELECT id, customer_id, payment_reference, amount, currency, method,
                   status, payment_date, notes, created_at, updated_at
            FROM payments
            ORDER BY created_at DESC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Payment>, PaymentError> {
    let rows = sqlx::query_as::<_, PaymentRow>(
      r#"
            SELECT id, customer_id, payment_reference, amount, currency, method,
                   status, payment_date, notes, created_at, updated_at
            FROM payments
            WHERE customer_id = $1
            ORDER BY created_at DESC
            "#,
    )
    .bind(customer_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}
