use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::billing::{
  Currency, Invoice, InvoiceNumber, InvoiceStatus,
  errors::BillingError,
  ports::{DashboardSummary, MonthlyRevenue, PaymentMethodBreakdown, ReportingRepository},
};
use crate::domain::payments::{Payment, PaymentMethod, PaymentReference, PaymentStatus};

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
  type Error = BillingError;

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

#[derive(Debug, FromRow)]
struct DashboardSummaryRow {
  total_customers: i64,
  active_customers: i64,
  active_products: i64,
  total_invoices: i64,
  draft_invoices: i64,
  outstanding_invoices: i64,
  overdue_invoices: i64,
  total_revenue: Option<Decimal>,
  outstanding_amount: Option<Decimal>,
  payments_received: Option<Decimal>,
}

#[derive(Debug, FromRow)]
struct MonthlyRevenueRow {
  year: i32,
  month: i32,
  revenue: Option<Decimal>,
}

#[derive(Debug, FromRow)]
struct MethodBreakdownRow {
  method: String,
  count: i64,
  total: Option<Decimal>,
}

const INVOICE_COLUMNS: &str = r#"id, invoice_number, customer_id, issue_date, due_date, status,
                   subtotal, tax_amount, discount_amount, total_amount,
                   paid_amount, balance_due, currency, notes, created_at, updated_at"#;

pub struct PostgresReportingRepository {
  pool: PgPool,
}

impl PostgresReportingRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ReportingRepository for PostgresReportingRepository {
  async fn dashboard_summary(&self) -> Result<DashboardSummary, BillingError> {
    let row = sqlx::query_as::<_, DashboardSummaryRow>(
      r#"
            SELECT
                (SELECT COUNT(*) FROM customers) AS total_customers,
                (SELECT COUNT(*) FROM customers WHERE status = 'active') AS active_customers,
                (SELECT COUNT(*) FROM products WHERE is_active) AS active_products,
                (SELECT COUNT(*) FROM invoices) AS total_invoices,
                (SELECT COUNT(*) FROM invoices WHERE status = 'draft') AS draft_invoices,
                (SELECT COUNT(*) FROM invoices
                 WHERE status IN ('issued', 'partially_paid', 'overdue')) AS outstanding_invoices,
                (SELECT COUNT(*) FROM invoices WHERE status = 'overdue') AS overdue_invoices,
                (SELECT SUM(total_amount) FROM invoices
                 WHERE status = 'fully_paid') AS total_revenue,
                (SELECT SUM(balance_due) FROM invoices
                 WHERE status IN ('issued', 'partially_paid', 'overdue')) AS outstanding_amount,
                (SELECT SUM(amount) FROM payments WHERE status = 'completed') AS payments_received
            "#,
    )
    .fetch_one(&self.pool)
    .await?;

    Ok(DashboardSummary {
      total_customers: row.total_customers,
      active_customers: row.active_customers,
      active_products: row.active_products,
      total_invoices: row.total_invoices,
      draft_invoices: row.draft_invoices,
      outstanding_invoices: row.outstanding_invoices,
      overdue_invoices: row.overdue_invoices,
      total_revenue: row.total_revenue.unwrap_or(Decimal::ZERO),
      outstanding_amount: row.outstanding_amount.unwrap_or(Decimal::ZERO),
      payments_received: row.payments_received.unwrap_or(Decimal::ZERO),
    })
  }

  async fn monthly_revenue(&self, months_back: u32) -> Result<Vec<MonthlyRevenue>, BillingError> {
    let rows = sqlx::query_as::<_, MonthlyRevenueRow>(
      r#"
            SELECT EXTRACT(YEAR FROM payment_date)::INT AS year,
                   EXTRACT(MONTH FROM payment_date)::INT AS month,
                   SUM(amount) AS revenue
            FROM payments
            WHERE status = 'completed'
              AND payment_date >= date_trunc('month', NOW()) - ($1 * INTERVAL '1 month')
            GROUP BY 1, 2
            ORDER BY 1, 2
            "#,
    )
    .bind(months_back as i32)
    .fetch_all(&self.pool)
    .await?;

    Ok(
      rows
        .into_iter()
        .map(|r| MonthlyRevenue {
          year: r.year,
          month: r.month as u32,
          revenue: r.revenue.unwrap_or(Decimal::ZERO),
        })
        .collect(),
    )
  }

  async fn payment_method_breakdown(
    &self,
  ) -> Result<Vec<PaymentMethodBreakdown>, BillingError> {
    let rows = sqlx::query_as::<_, MethodBreakdownRow>(
      r#"
            SELECT method, COUNT(*) AS count, SUM(amount) AS total
            FROM payments
            WHERE status = 'completed'
            GROUP BY method
            ORDER BY total DESC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows
      .into_iter()
      .map(|r| {
        Ok(PaymentMethodBreakdown {
          method: PaymentMethod::from_str(&r.method)?,
          count: r.count,
          total: r.total.unwrap_or(Decimal::ZERO),
        })
      })
      .collect()
  }

  async fn recent_invoices(&self, limit: i64) -> Result<Vec<Invoice>, BillingError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            ORDER BY created_at DESC
            LIMIT $1
            "#
    ))
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn recent_payments(&self, limit: i64) -> Result<Vec<Payment>, BillingError> {
    let rows = sqlx::query_as::<_, PaymentRow>(
      r#"
            SELECT id, customer_id, payment_reference, amount, currency, method,
                   status, payment_date, notes, created_at, updated_at
            FROM payments
            WHERE status = 'completed'
            ORDER BY payment_date DESC
            LIMIT $1
            "#,
    )
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn overdue_invoices(&self, limit: i64) -> Result<Vec<Invoice>, BillingError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE status IN ('issued', 'partially_paid', 'overdue')
              AND due_date < CURRENT_DATE
            ORDER BY due_date ASC
            LIMIT $1
            "#
    ))
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}
