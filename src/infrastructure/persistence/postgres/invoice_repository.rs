use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::billing::{
  Amount, Currency, Invoice, InvoiceItem, InvoiceNumber, InvoiceStatus, LineItemDescription,
  Percentage, Quantity,
  errors::BillingError,
  ports::{CustomerStats, InvoiceFilter, InvoiceListStats, InvoiceRepository},
};

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  invoice_number: String,
  customer_id: Uuid,
  issue_date: NaiveDate,
  due_date: NaiveDate,
  status: String,
  subtotal: Decimal,
  tax_amount: Decimal,
  discount_amount: Decimal,
  total_amount: Decimal,
  paid_amount: Decimal,
  balance_due: Decimal,
  currency: String,
  notes: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = BillingError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    let invoice_number = InvoiceNumber::new(row.invoice_number)?;
    let status = InvoiceStatus::from_str(&row.status)?;
    let currency = Currency::from_str(&row.currency)?;

    Ok(Invoice {
      id: row.id,
      invoice_number,
      customer_id: row.customer_id,
      issue_date: row.issue_date,
      due_date: row.due_date,
      status,
      subtotal: row.subtotal,
      tax_amount: row.tax_amount,
      discount_amount: row.discount_amount,
      total_amount: row.total_amount,
      paid_amount: row.paid_amount,
      balance_due: row.balance_due,
      currency,
      notes: row.notes,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct InvoiceItemRow {
  id: Uuid,
  invoice_id: Uuid,
  product_id: Option<Uuid>,
  description: String,
  quantity: i32,
  unit_price: Decimal,
  line_total: Decimal,
  tax_rate: Decimal,
  tax_amount: Decimal,
  discount_rate: Decimal,
  discount_amount: Decimal,
}

impl TryFrom<InvoiceItemRow> for InvoiceItem {
  type Error = BillingError;

  fn try_from(row: InvoiceItemRow) -> Result<Self, Self::Error> {
    let description = LineItemDescription::new(row.description)?;
    let quantity = Quantity::new(row.quantity)?;
    let unit_price = Amount::new(row.unit_price)?;
    let tax_rate = Percentage::new(row.tax_rate)?;
    let discount_rate = Percentage::new(row.discount_rate)?;

    Ok(InvoiceItem {
      id: row.id,
      invoice_id: row.invoice_id,
      product_id: row.product_id,
      description,
      quantity,
      unit_price,
      line_total: row.line_total,
      tax_rate,
      tax_amount: row.tax_amount,
      discount_rate,
      discount_amount: row.discount_amount,
    })
  }
}

#[derive(Debug, FromRow)]
struct InvoiceListStatsRow {
  total_invoices: i64,
  total_amount: Option<Decimal>,
  outstanding_amount: Option<Decimal>,
  overdue_count: i64,
}

#[derive(Debug, FromRow)]
struct CustomerStatsRow {
  invoice_count: i64,
  total_invoiced: Option<Decimal>,
  total_paid: Option<Decimal>,
  outstanding_balance: Option<Decimal>,
}

const INVOICE_COLUMNS: &str = r#"id, invoice_number, customer_id, issue_date, due_date, status,
                   subtotal, tax_amount, discount_amount, total_amount,
                   paid_amount, balance_due, currency, notes, created_at, updated_at"#;

pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn insert_invoice(
    tx: &mut Transaction<'_, Postgres>,
    invoice: &Invoice,
  ) -> Result<InvoiceRow, sqlx::Error> {
    sqlx::query_as::<_, InvoiceRow>(
      r#"
            INSERT INTO invoices (
                id, invoice_number, customer_id, issue_date, due_date, status,
                subtotal, tax_amount, discount_amount, total_amount,
                paid_amount, balance_due, currency, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id, invoice_number, customer_id, issue_date, due_date, status,
                      subtotal, tax_amount, discount_amount, total_amount,
                      paid_amount, balance_due, currency, notes, created_at, updated_at
            "#,
    )
    .bind(invoice.id)
    .bind(invoice.invoice_number.value())
    .bind(invoice.customer_id)
    .bind(invoice.issue_date)
    .bind(invoice.due_date)
    .bind(invoice.status.as_str())
    .bind(invoice.subtotal)
    .bind(invoice.tax_amount)
    .bind(invoice.discount_amount)
    .bind(invoice.total_amount)
    .bind(invoice.paid_amount)
    .bind(invoice.balance_due)
    .bind(invoice.currency.as_str())
    .bind(invoice.notes.as_deref())
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .fetch_one(&mut **tx)
    .await
  }

  async fn insert_items(
    tx: &mut Transaction<'_, Postgres>,
    items: &[InvoiceItem],
  ) -> Result<Vec<InvoiceItemRow>, sqlx::Error> {
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
      let row = sqlx::query_as::<_, InvoiceItemRow>(
        r#"
                INSERT INTO invoice_items (
                    id, invoice_id, product_id, description, quantity, unit_price,
                    line_total, tax_rate, tax_amount, discount_rate, discount_amount
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING id, invoice_id, product_id, description, quantity, unit_price,
                          line_total, tax_rate, tax_amount, discount_rate, discount_amount
                "#,
      )
      .bind(item.id)
      .bind(item.invoice_id)
      .bind(item.product_id)
      .bind(item.description.value())
      .bind(item.quantity.value())
      .bind(item.unit_price.value())
      .bind(item.line_total)
      .bind(item.tax_rate.value())
      .bind(item.tax_amount)
      .bind(item.discount_rate.value())
      .bind(item.discount_amount)
      .fetch_one(&mut **tx)
      .await?;
      rows.push(row);
    }
    Ok(rows)
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn next_invoice_number(&self) -> Result<InvoiceNumber, BillingError> {
    let (next,): (i64,) = sqlx::query_as("SELECT nextval('invoice_number_seq')")
      .fetch_one(&self.pool)
      .await?;

    Ok(InvoiceNumber::from_sequence(next))
  }

  async fn create_with_items(
    &self,
    invoice: Invoice,
    items: Vec<InvoiceItem>,
  ) -> Result<(Invoice, Vec<InvoiceItem>), BillingError> {
    let mut tx = self.pool.begin().await?;

    let invoice_row = Self::insert_invoice(&mut tx, &invoice).await?;
    let item_rows = Self::insert_items(&mut tx, &items).await?;

    tx.commit().await?;

    let invoice = invoice_row.try_into()?;
    let items = item_rows
      .into_iter()
      .map(|r| r.try_into())
      .collect::<Result<Vec<_>, _>>()?;
    Ok((invoice, items))
  }

  async fn update_with_items(
    &self,
    invoice: Invoice,
    items: Vec<InvoiceItem>,
  ) -> Result<(Invoice, Vec<InvoiceItem>), BillingError> {
    let mut tx = self.pool.begin().await?;

    let invoice_row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            UPDATE invoices
            SET customer_id = $2, issue_date = $3, due_date = $4, status = $5,
                subtotal = $6, tax_amount = $7, discount_amount = $8,
                total_amount = $9, paid_amount = $10, balance_due = $11,
                currency = $12, notes = $13, updated_at = $14
            WHERE id = $1
            RETURNING id, invoice_number, customer_id, issue_date, due_date, status,
                      subtotal, tax_amount, discount_amount, total_amount,
                      paid_amount, balance_due, currency, notes, created_at, updated_at
            "#,
    )
    .bind(invoice.id)
    .bind(invoice.customer_id)
    .bind(invoice.issue_date)
    .bind(invoice.due_date)
    .bind(invoice.status.as_str())
    .bind(invoice.subtotal)
    .bind(invoice.tax_amount)
    .bind(invoice.discount_amount)
    .bind(invoice.total_amount)
    .bind(invoice.paid_amount)
    .bind(invoice.balance_due)
    .bind(invoice.currency.as_str())
    .bind(invoice.notes.as_deref())
    .bind(invoice.updated_at)
    .fetch_one(&mut *tx)
    .await?;

    // Replace the whole item set; readers see either the old set or the new one
    sqlx::query(
      r#"
      DELETE FROM invoice_items
      WHERE invoice_id = $1
      "#,
    )
    .bind(invoice.id)
    .execute(&mut *tx)
    .await?;

    let item_rows = Self::insert_items(&mut tx, &items).await?;

    tx.commit().await?;

    let invoice = invoice_row.try_into()?;
    let items = item_rows
      .into_iter()
      .map(|r| r.try_into())
      .collect::<Result<Vec<_>, _>>()?;
    Ok((invoice, items))
  }

  async fn update(&self, invoice: Invoice) -> Result<Invoice, BillingError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            UPDATE invoices
            SET status = $2, paid_amount = $3, balance_due = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, invoice_number, customer_id, issue_date, due_date, status,
                      subtotal, tax_amount, discount_amount, total_amount,
                      paid_amount, balance_due, currency, notes, created_at, updated_at
            "#,
    )
    .bind(invoice.id)
    .bind(invoice.status.as_str())
    .bind(invoice.paid_amount)
    .bind(invoice.balance_due)
    .bind(invoice.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, BillingError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE id = $1
            "#
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_items(&self, invoice_id: Uuid) -> Result<Vec<InvoiceItem>, BillingError> {
    let rows = sqlx::query_as::<_, InvoiceItemRow>(
      r#"
            SELECT id, invoice_id, product_id, description, quantity, unit_price,
                   line_total, tax_rate, tax_amount, discount_rate, discount_amount
            FROM invoice_items
            WHERE invoice_id = $1
            ORDER BY description ASC
            "#,
    )
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn list(&self, filter: InvoiceFilter) -> Result<Vec<Invoice>, BillingError> {
    let rows = match (filter.status, filter.customer_id) {
      (Some(status), _) => {
        sqlx::query_as::<_, InvoiceRow>(&format!(
          r#"
                SELECT {INVOICE_COLUMNS}
                FROM invoices
                WHERE status = $1
                ORDER BY invoice_number DESC
                "#
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?
      }
      (None, Some(customer_id)) => {
        sqlx::query_as::<_, InvoiceRow>(&format!(
          r#"
                SELECT {INVOICE_COLUMNS}
                FROM invoices
                WHERE customer_id = $1
                ORDER BY invoice_number DESC
                "#
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?
      }
      (None, None) => {
        sqlx::query_as::<_, InvoiceRow>(&format!(
          r#"
                SELECT {INVOICE_COLUMNS}
                FROM invoices
                ORDER BY invoice_number DESC
                "#
        ))
        .fetch_all(&self.pool)
        .await?
      }
    };

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn delete(&self, id: Uuid) -> Result<(), BillingError> {
    let mut tx = self.pool.begin().await?;

    sqlx::query(
      r#"
      DELETE FROM invoice_items
      WHERE invoice_id = $1
      "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
      r#"
      DELETE FROM invoices
      WHERE id = $1
      "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
  }

  async fn exists_for_customer(&self, customer_id: Uuid) -> Result<bool, BillingError> {
    let exists: (bool,) = sqlx::query_as(
      r#"
            SELECT EXISTS(
                SELECT 1 FROM invoices WHERE customer_id = $1
            )
            "#,
    )
    .bind(customer_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(exists.0)
  }

  async fn list_stats(&self) -> Result<InvoiceListStats, BillingError> {
    let row = sqlx::query_as::<_, InvoiceListStatsRow>(
      r#"
            SELECT COUNT(*) AS total_invoices,
                   SUM(total_amount) AS total_amount,
                   SUM(balance_due) FILTER (
                       WHERE status IN ('issued', 'partially_paid', 'overdue')
                   ) AS outstanding_amount,
                   COUNT(*) FILTER (WHERE status = 'overdue') AS overdue_count
            FROM invoices
            "#,
    )
    .fetch_one(&self.pool)
    .await?;

    Ok(InvoiceListStats {
      total_invoices: row.total_invoices,
      total_amount: row.total_amount.unwrap_or(Decimal::ZERO),
      outstanding_amount: row.outstanding_amount.unwrap_or(Decimal::ZERO),
      overdue_count: row.overdue_count,
    })
  }

  async fn stats_for_customer(&self, customer_id: Uuid) -> Result<CustomerStats, BillingError> {
    let row = sqlx::query_as::<_, CustomerStatsRow>(
      r#"
            SELECT COUNT(*) AS invoice_count,
                   SUM(total_amount) AS total_invoiced,
                   SUM(paid_amount) AS total_paid,
                   SUM(balance_due) FILTER (
                       WHERE status IN ('issued', 'partially_paid', 'overdue')
                   ) AS outstanding_balance
            FROM invoices
            WHERE customer_id = $1
            "#,
    )
    .bind(customer_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(CustomerStats {
      invoice_count: row.invoice_count,
      total_invoiced: row.total_invoiced.unwrap_or(Decimal::ZERO),
      total_paid: row.total_paid.unwrap_or(Decimal::ZERO),
      outstanding_balance: row.outstanding_balance.unwrap_or(Decimal::ZERO),
    })
  }
}
