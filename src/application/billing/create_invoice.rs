use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{
  BillingError, BillingService, Currency, services::InvoiceData, services::LineItemInput,
};

#[derive(Debug, Deserialize)]
pub struct InvoiceLineItemDto {
  pub product_id: Option<Uuid>,
  pub description: String,
  pub quantity: i32,
  pub unit_price: Decimal,
  pub tax_rate: Option<Decimal>,
  pub discount_rate: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceCommand {
  pub customer_id: Uuid,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub currency: String,
  pub notes: Option<String>,
  pub items: Vec<InvoiceLineItemDto>,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
  pub invoice_id: Uuid,
  pub invoice_number: String,
  pub total_amount: Decimal,
  pub created_at: DateTime<Utc>,
}

pub struct CreateInvoiceUseCase {
  billing_service: Arc<BillingService>,
}

impl CreateInvoiceUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: CreateInvoiceCommand,
  ) -> Result<CreateInvoiceResponse, BillingError> {
    let currency = Currency::from_str(&command.currency)?;

    let data = InvoiceData {
      customer_id: command.customer_id,
      issue_date: command.issue_date,
      due_date: command.due_date,
      currency,
      notes: command.notes,
      items: command.items.into_iter().map(to_input).collect(),
    };

    let (invoice, _items) = self.billing_service.create_invoice(data).await?;

    Ok(CreateInvoiceResponse {
      invoice_id: invoice.id,
      invoice_number: invoice.invoice_number.into_inner(),
      total_amount: invoice.total_amount,
      created_at: invoice.created_at,
    })
  }
}

pub(super) fn to_input(item: InvoiceLineItemDto) -> LineItemInput {
  LineItemInput {
    product_id: item.product_id,
    description: item.description,
    quantity: item.quantity,
    unit_price: item.unit_price,
    tax_rate: item.tax_rate,
    discount_rate: item.discount_rate,
  }
}
