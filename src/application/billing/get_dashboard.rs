use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::billing::{BillingError, ports::ReportingRepository};

use super::get_invoice_details::InvoiceDto;
use crate::application::payments::list_payments::PaymentDto;

#[derive(Debug, Serialize)]
pub struct DashboardSummaryDto {
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

#[derive(Debug, Serialize)]
pub struct MonthlyRevenueDto {
  pub year: i32,
  pub month: u32,
  pub revenue: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PaymentMethodBreakdownDto {
  pub method: String,
  pub count: i64,
  pub total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
  pub summary: DashboardSummaryDto,
  pub monthly_revenue: Vec<MonthlyRevenueDto>,
  pub payment_methods: Vec<PaymentMethodBreakdownDto>,
  pub recent_invoices: Vec<InvoiceDto>,
  pub recent_payments: Vec<PaymentDto>,
  pub overdue_invoices: Vec<InvoiceDto>,
}

pub struct GetDashboardUseCase {
  reporting_repo: Arc<dyn ReportingRepository>,
  recent_activity_limit: i64,
}

impl GetDashboardUseCase {
  pub fn new(reporting_repo: Arc<dyn ReportingRepository>, recent_activity_limit: i64) -> Self {
    Self {
      reporting_repo,
      recent_activity_limit,
    }
  }

  pub async fn execute(&self) -> Result<DashboardResponse, BillingError> {
    let summary = self.reporting_repo.dashboard_summary().await?;
    let monthly_revenue = self.reporting_repo.monthly_revenue(12).await?;
    let payment_methods = self.reporting_repo.payment_method_breakdown().await?;
    let recent_invoices = self
      .reporting_repo
      .recent_invoices(self.recent_activity_limit)
      .await?;
    let recent_payments = self
      .reporting_repo
      .recent_payments(self.recent_activity_limit)
      .await?;
    let overdue_invoices = self
      .reporting_repo
      .overdue_invoices(self.recent_activity_limit)
      .await?;

    Ok(DashboardResponse {
      summary: DashboardSummaryDto {
        total_customers: summary.total_customers,
        active_customers: summary.active_customers,
        active_products: summary.active_products,
        total_invoices: summary.total_invoices,
        draft_invoices: summary.draft_invoices,
        outstanding_invoices: summary.outstanding_invoices,
        overdue_invoices: summary.overdue_invoices,
        total_revenue: summary.total_revenue,
        outstanding_amount: summary.outstanding_amount,
        payments_received: summary.payments_received,
      },
      monthly_revenue: monthly_revenue
        .into_iter()
        .map(|m| MonthlyRevenueDto {
          year: m.year,
          month: m.month,
          revenue: m.revenue,
        })
        .collect(),
      payment_methods: payment_methods
        .into_iter()
        .map(|p| PaymentMethodBreakdownDto {
          method: p.method.as_str().to_string(),
          count: p.count,
          total: p.total,
        })
        .collect(),
      recent_invoices: recent_invoices.into_iter().map(InvoiceDto::from).collect(),
      recent_payments: recent_payments.into_iter().map(PaymentDto::from).collect(),
      overdue_invoices: overdue_invoices.into_iter().map(InvoiceDto::from).collect(),
    })
  }
}
