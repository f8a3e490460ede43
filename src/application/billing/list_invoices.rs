use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{
  BillingError, BillingService, InvoiceFilter, InvoiceStatus,
};

use super::get_invoice_details::InvoiceDto;

#[derive(Debug, Default, Deserialize)]
pub struct ListInvoicesCommand {
  pub status: Option<String>,
  pub customer_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceListStatsDto {
  pub total_invoices: i64,
  pub total_amount: Decimal,
  pub outstanding_amount: Decimal,
  pub overdue_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceDto>,
  pub stats: InvoiceListStatsDto,
}

pub struct ListInvoicesUseCase {
  billing_service: Arc<BillingService>,
}

impl ListInvoicesUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: ListInvoicesCommand,
  ) -> Result<ListInvoicesResponse, BillingError> {
    let status = command
      .status
      .as_deref()
      .map(InvoiceStatus::from_str)
      .transpose()?;

    let filter = InvoiceFilter {
      status,
      customer_id: command.customer_id,
    };

    let invoices = self.billing_service.list_invoices(filter).await?;
    let stats = self.billing_service.invoice_stats().await?;

    Ok(ListInvoicesResponse {
      invoices: invoices.into_iter().map(InvoiceDto::from).collect(),
      stats: InvoiceListStatsDto {
        total_invoices: stats.total_invoices,
        total_amount: stats.total_amount,
        outstanding_amount: stats.outstanding_amount,
        overdue_count: stats.overdue_count,
      },
    })
  }
}
