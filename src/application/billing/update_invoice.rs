use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService, Currency, services::InvoiceData};

use super::create_invoice::{CreateInvoiceCommand, to_input};

#[derive(Debug)]
pub struct UpdateInvoiceCommand {
  pub invoice_id: Uuid,
  pub details: CreateInvoiceCommand,
}

#[derive(Debug, Serialize)]
pub struct UpdateInvoiceResponse {
  pub invoice_id: Uuid,
  pub invoice_number: String,
  pub total_amount: Decimal,
  pub balance_due: Decimal,
}

pub struct UpdateInvoiceUseCase {
  billing_service: Arc<BillingService>,
}

impl UpdateInvoiceUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: UpdateInvoiceCommand,
  ) -> Result<UpdateInvoiceResponse, BillingError> {
    let details = command.details;
    let currency = Currency::from_str(&details.currency)?;

    let data = InvoiceData {
      customer_id: details.customer_id,
      issue_date: details.issue_date,
      due_date: details.due_date,
      currency,
      notes: details.notes,
      items: details.items.into_iter().map(to_input).collect(),
    };

    let (invoice, _items) = self
      .billing_service
      .update_invoice(command.invoice_id, data)
      .await?;

    Ok(UpdateInvoiceResponse {
      invoice_id: invoice.id,
      invoice_number: invoice.invoice_number.into_inner(),
      total_amount: invoice.total_amount,
      balance_due: invoice.balance_due,
    })
  }
}
