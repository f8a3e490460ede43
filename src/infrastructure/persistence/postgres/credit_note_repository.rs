use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::billing::{Currency, Invoice};
use crate::domain::payments::{
  CreditNote, CreditNoteNumber, CreditNoteStatus, CreditReason, PaymentError,
  ports::CreditNoteRepository,
};

use super::payment_allocation_repository::settle_invoice;

#[derive(Debug, FromRow)]
struct CreditNoteRow {
  id: Uuid,
  credit_note_number: String,
  customer_id: Uuid,
  invoice_id: Option<Uuid>,
  issue_date: NaiveDate,
  amount: Decimal,
  currency: String,
  reason: String,
  description: String,
  status: String,
  applied_amount: Decimal,
  refunded_amount: Decimal,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<CreditNoteRow> for CreditNote {
  type Error = PaymentError;

  fn try_from(row: CreditNoteRow) -> Result<Self, Self::Error> {
    let credit_note_number = CreditNoteNumber::new(row.credit_note_number)?;
    let currency = Currency::from_str(&row.currency)?;
    let reason = CreditReason::from_str(&row.reason)?;
    let status = CreditNoteStatus::from_str(&row.status)?;

    Ok(CreditNote {
      id: row.id,
      credit_note_number,
      customer_id: row.customer_id,
      invoice_id: row.invoice_id,
      issue_date: row.issue_date,
      amount: row.amount,
      currency,
      reason,
      description: row.description,
      status,
      applied_amount: row.applied_amount,
      refunded_amount: row.refunded_amount,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresCreditNoteRepository {
  pool: PgPool,
}

impl PostgresCreditNoteRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn update_in(
    tx: &mut Transaction<'_, Postgres>,
    credit_note: &CreditNote,
  ) -> Result<CreditNoteRow, sqlx::Error> {
    sqlx::query_as::<_, CreditNoteRow>(
      r#"
            UPDATE credit_notes
            SET status = $2, applied_amount = $3, refunded_amount = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, credit_note_number, customer_id, invoice_id, issue_date,
                      amount, currency, reason, description, status,
                      applied_amount, refunded_amount, created_at, updated_at
            "#,
    )
    .bind(credit_note.id)
    .bind(credit_note.status.as_str())
    .bind(credit_note.applied_amount)
    .bind(credit_note.refunded_amount)
    .bind(credit_note.updated_at)
    .fetch_one(&mut **tx)
    .await
  }
}

#[async_trait]
impl CreditNoteRepository for PostgresCreditNoteRepository {
  async fn next_credit_note_number(&self) -> Result<CreditNoteNumber, PaymentError> {
    let (next,): (i64,) = sqlx::query_as("SELECT nextval('credit_note_number_seq')")
      .fetch_one(&self.pool)
      .await?;

    Ok(CreditNoteNumber::from_sequence(next))
  }

  async fn create(&self, credit_note: CreditNote) -> Result<CreditNote, PaymentError> {
    let row = sqlx::query_as::<_, CreditNoteRow>(
      r#"
            INSERT INTO credit_notes (
                id, credit_note_number, customer_id, invoice_id, issue_date,
                amount, currency, reason, description, status,
                applied_amount, refunded_amount, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, credit_note_number, customer_id, invoice_id, issue_date,
                      amount, currency, reason, description, status,
                      applied_amount, refunded_amount, created_at, updated_at
            "#,
    )
    .bind(credit_note.id)
    .bind(credit_note.credit_note_number.value())
    .bind(credit_note.customer_id)
    .bind(credit_note.invoice_id)
    .bind(credit_note.issue_date)
    .bind(credit_note.amount)
    .bind(credit_note.currency.as_str())
    .bind(credit_note.reason.as_str())
    .bind(credit_note.description)
    .bind(credit_note.status.as_str())
    .bind(credit_note.applied_amount)
    .bind(credit_note.refunded_amount)
    .bind(credit_note.created_at)
    .bind(credit_note.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, credit_note: CreditNote) -> Result<CreditNote, PaymentError> {
    let mut tx = self.pool.begin().await?;
    let row = Self::update_in(&mut tx, &credit_note).await?;
    tx.commit().await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<CreditNote>, PaymentError> {
    let row = sqlx::query_as::<_, CreditNoteRow>(
      r#"
            SELECT id, credit_note_number, customer_id, invoice_id, issue_date,
                   amount, currency, reason, description, status,
                   applied_amount, refunded_amount, created_at, updated_at
            FROM credit_notes
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn list(&self) -> Result<Vec<CreditNote>, PaymentError> {
    let rows = sqlx::query_as::<_, CreditNoteRow>(
      r#"
            SELECT id, credit_note_number, customer_id, invoice_id, issue_date,
                   amount, currency, reason, description, status,
                   applied_amount, refunded_amount, created_at, updated_at
            FROM credit_notes
            ORDER BY created_at DESC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn apply(
    &self,
    credit_note: &CreditNote,
    invoice: &Invoice,
  ) -> Result<CreditNote, PaymentError> {
    let mut tx = self.pool.begin().await?;

    let row = Self::update_in(&mut tx, credit_note).await?;
    settle_invoice(&mut tx, invoice).await?;

    tx.commit().await?;
    row.try_into()
  }
}
