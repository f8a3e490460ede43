use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::billing::Invoice;
use crate::domain::payments::{
  PaymentAllocation, PaymentError, ports::PaymentAllocationRepository,
};

#[derive(Debug, FromRow)]
struct PaymentAllocationRow {
  id: Uuid,
  payment_id: Uuid,
  invoice_id: Uuid,
  allocated_amount: Decimal,
  allocated_at: DateTime<Utc>,
  created_at: DateTime<Utc>,
}

impl From<PaymentAllocationRow> for PaymentAllocation {
  fn from(row: PaymentAllocationRow) -> Self {
    PaymentAllocation {
      id: row.id,
      payment_id: row.payment_id,
      invoice_id: row.invoice_id,
      allocated_amount: row.allocated_amount,
      allocated_at: row.allocated_at,
      created_at: row.created_at,
    }
  }
}

/// Writes the invoice's payment bookkeeping fields inside an open transaction.
/// Shared with the credit note repository, which settles invoices the same way.
pub(super) async fn settle_invoice(
  tx: &mut Transaction<'_, Postgres>,
  invoice: &Invoice,
) -> Result<(), sqlx::Error> {
  sqlx::query(
    r#"
        UPDATE invoices
        SET status = $2, paid_amount = $3, balance_due = $4, updated_at = $5
        WHERE id = $1
        "#,
  )
  .bind(invoice.id)
  .bind(invoice.status.as_str())
  .bind(invoice.paid_amount)
  .bind(invoice.balance_due)
  .bind(invoice.updated_at)
  .execute(&mut **tx)
  .await?;

  Ok(())
}

pub struct PostgresPaymentAllocationRepository {
  pool: PgPool,
}

impl PostgresPaymentAllocationRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl PaymentAllocationRepository for PostgresPaymentAllocationRepository {
  async fn find_by_payment_id(
    &self,
    payment_id: Uuid,
  ) -> Result<Vec<PaymentAllocation>, PaymentError> {
    let rows = sqlx::query_as::<_, PaymentAllocationRow>(
      r#"
            SELECT id, payment_id, invoice_id, allocated_amount, allocated_at, created_at
            FROM payment_allocations
            WHERE payment_id = $1
            ORDER BY allocated_at ASC
            "#,
    )
    .bind(payment_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
  }

  async fn find_by_invoice_id(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<PaymentAllocation>, PaymentError> {
    let rows = sqlx::query_as::<_, PaymentAllocationRow>(
      r#"
            SELECT id, payment_id, invoice_id, allocated_amount, allocated_at, created_at
            FROM payment_allocations
            WHERE invoice_id = $1
            ORDER BY allocated_at ASC
            "#,
    )
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
  }

  async fn record(
    &self,
    allocation: PaymentAllocation,
    invoice: &Invoice,
  ) -> Result<PaymentAllocation, PaymentError> {
    let mut tx = self.pool.begin().await?;

    // The (payment_id, invoice_id) pair is unique; a concurrent insert of the
    // same pair lands on the conflict arm and overwrites with the merged row
    let row = sqlx::query_as::<_, PaymentAllocationRow>(
      r#"
            INSERT INTO payment_allocations (
                id, payment_id, invoice_id, allocated_amount, allocated_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (payment_id, invoice_id)
            DO UPDATE SET allocated_amount = $4, allocated_at = $5
            RETURNING id, payment_id, invoice_id, allocated_amount, allocated_at, created_at
            "#,
    )
    .bind(allocation.id)
    .bind(allocation.payment_id)
    .bind(allocation.invoice_id)
    .bind(allocation.allocated_amount)
    .bind(allocation.allocated_at)
    .bind(allocation.created_at)
    .fetch_one(&mut *tx)
    .await?;

    settle_invoice(&mut tx, invoice).await?;

    tx.commit().await?;
    Ok(row.into())
  }
}
