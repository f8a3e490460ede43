use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::payments::entities::Payment;
use crate::domain::payments::value_objects::PaymentMethod;

use super::entities::{Customer, DunningReminder, Invoice, InvoiceItem, Product};
use super::errors::BillingError;
use super::value_objects::{InvoiceNumber, InvoiceStatus};

/// Optional list filters; at most one is applied, status taking precedence.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceFilter {
  pub status: Option<InvoiceStatus>,
  pub customer_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerStats {
  pub invoice_count: i64,
  pub total_invoiced: Decimal,
  pub total_paid: Decimal,
  pub outstanding_balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductStats {
  pub times_sold: i64,
  pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceListStats {
  pub total_invoices: i64,
  pub total_amount: Decimal,
  pub outstanding_amount: Decimal,
  pub overdue_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
  pub total_customers: i64,
  pub active_customers: i64,
  pub active_products: i64,
  pub total_invoices: i64,
  pub draft_invoices: i64,
  pub outstanding_invoices: i64,
  pub overdue_invoices: i64,
  pub total_revenue: Decimal,
  pub outstanding_amount: Decimal,
  pub payments_received: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyRevenue {
  pub year: i32,
  pub month: u32,
  pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodBreakdown {
  pub method: PaymentMethod,
  pub count: i64,
  pub total: Decimal,
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
  async fn create(&self, customer: Customer) -> Result<Customer, BillingError>;
  async fn update(&self, customer: Customer) -> Result<Customer, BillingError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, BillingError>;
  async fn list(&self) -> Result<Vec<Customer>, BillingError>;
  async fn delete(&self, id: Uuid) -> Result<(), BillingError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
  async fn create(&self, product: Product) -> Result<Product, BillingError>;
  async fn update(&self, product: Product) -> Result<Product, BillingError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, BillingError>;
  async fn list(&self) -> Result<Vec<Product>, BillingError>;
  async fn delete(&self, id: Uuid) -> Result<(), BillingError>;
  /// Whether any invoice item references the product.
  async fn is_referenced(&self, product_id: Uuid) -> Result<bool, BillingError>;
  async fn stats_for(&self, product_id: Uuid) -> Result<ProductStats, BillingError>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Allocates the next value of the invoice number sequence. Atomic under
  /// concurrent creation.
  async fn next_invoice_number(&self) -> Result<InvoiceNumber, BillingError>;

  /// Persists the invoice and its items in one atomic unit.
  async fn create_with_items(
    &self,
    invoice: Invoice,
    items: Vec<InvoiceItem>,
  ) -> Result<(Invoice, Vec<InvoiceItem>), BillingError>;

  /// Persists the edited invoice and replaces its whole item set in one
  /// atomic unit; an interruption leaves either the old set or the new one.
  async fn update_with_items(
    &self,
    invoice: Invoice,
    items: Vec<InvoiceItem>,
  ) -> Result<(Invoice, Vec<InvoiceItem>), BillingError>;

  async fn update(&self, invoice: Invoice) -> Result<Invoice, BillingError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, BillingError>;
  async fn find_items(&self, invoice_id: Uuid) -> Result<Vec<InvoiceItem>, BillingError>;
  async fn list(&self, filter: InvoiceFilter) -> Result<Vec<Invoice>, BillingError>;
  /// Deletes the invoice together with its items.
  async fn delete(&self, id: Uuid) -> Result<(), BillingError>;
  async fn exists_for_customer(&self, customer_id: Uuid) -> Result<bool, BillingError>;
  async fn list_stats(&self) -> Result<InvoiceListStats, BillingError>;
  async fn stats_for_customer(&self, customer_id: Uuid) -> Result<CustomerStats, BillingError>;
}

#[async_trait]
pub trait DunningReminderRepository: Send + Sync {
  async fn create(&self, reminder: DunningReminder) -> Result<DunningReminder, BillingError>;
  async fn find_by_invoice_id(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<DunningReminder>, BillingError>;
}

/// Read-only aggregates backing the dashboard.
#[async_trait]
pub trait ReportingRepository: Send + Sync {
  async fn dashboard_summary(&self) -> Result<DashboardSummary, BillingError>;
  async fn monthly_revenue(&self, months_back: u32) -> Result<Vec<MonthlyRevenue>, BillingError>;
  async fn payment_method_breakdown(&self)
  -> Result<Vec<PaymentMethodBreakdown>, BillingError>;
  async fn recent_invoices(&self, limit: i64) -> Result<Vec<Invoice>, BillingError>;
  async fn recent_payments(&self, limit: i64) -> Result<Vec<Payment>, BillingError>;
  async fn overdue_invoices(&self, limit: i64) -> Result<Vec<Invoice>, BillingError>;
}
