use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService, Invoice, InvoiceItem};

use super::list_customers::CustomerDto;

#[derive(Debug)]
pub struct GetInvoiceDetailsCommand {
  pub invoice_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct InvoiceItemDto {
  pub id: Uuid,
  pub product_id: Option<Uuid>,
  pub description: String,
  pub quantity: i32,
  pub unit_price: Decimal,
  pub line_total: Decimal,
  pub tax_rate: Decimal,
  pub tax_amount: Decimal,
  pub discount_rate: Decimal,
  pub discount_amount: Decimal,
}

impl From<InvoiceItem> for InvoiceItemDto {
  fn from(item: InvoiceItem) -> Self {
    Self {
      id: item.id,
      product_id: item.product_id,
      description: item.description.value().to_string(),
      quantity: item.quantity.value(),
      unit_price: item.unit_price.value(),
      line_total: item.line_total,
      tax_rate: item.tax_rate.value(),
      tax_amount: item.tax_amount,
      discount_rate: item.discount_rate.value(),
      discount_amount: item.discount_amount,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct InvoiceDto {
  pub id: Uuid,
  pub invoice_number: String,
  pub customer_id: Uuid,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub status: String,
  pub subtotal: Decimal,
  pub tax_amount: Decimal,
  pub discount_amount: Decimal,
  pub total_amount: Decimal,
  pub paid_amount: Decimal,
  pub balance_due: Decimal,
  pub currency: String,
  pub notes: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceDto {
  fn from(invoice: Invoice) -> Self {
    Self {
      id: invoice.id,
      invoice_number: invoice.invoice_number.into_inner(),
      customer_id: invoice.customer_id,
      issue_date: invoice.issue_date,
      due_date: invoice.due_date,
      status: invoice.status.as_str().to_string(),
      subtotal: invoice.subtotal,
      tax_amount: invoice.tax_amount,
      discount_amount: invoice.discount_amount,
      total_amount: invoice.total_amount,
      paid_amount: invoice.paid_amount,
      balance_due: invoice.balance_due,
      currency: invoice.currency.as_str().to_string(),
      notes: invoice.notes,
      created_at: invoice.created_at,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ReminderDto {
  pub id: Uuid,
  pub channel: String,
  pub reminder_level: i32,
  pub sent_at: DateTime<Utc>,
  pub status: String,
  pub message: Option<String>,
  pub next_reminder_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceDetailsResponse {
  pub invoice: InvoiceDto,
  pub items: Vec<InvoiceItemDto>,
  pub customer: CustomerDto,
  pub reminders: Vec<ReminderDto>,
}

pub struct GetInvoiceDetailsUseCase {
  billing_service: Arc<BillingService>,
}

impl GetInvoiceDetailsUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: GetInvoiceDetailsCommand,
  ) -> Result<InvoiceDetailsResponse, BillingError> {
    let (invoice, items, customer, reminders) = self
      .billing_service
      .get_invoice_details(command.invoice_id)
      .await?;

    Ok(InvoiceDetailsResponse {
      invoice: invoice.into(),
      items: items.into_iter().map(InvoiceItemDto::from).collect(),
      customer: customer.into(),
      reminders: reminders
        .into_iter()
        .map(|r| ReminderDto {
          id: r.id,
          channel: r.channel.as_str().to_string(),
          reminder_level: r.reminder_level,
          sent_at: r.sent_at,
          status: r.status.as_str().to_string(),
          message: r.message,
          next_reminder_at: r.next_reminder_at,
        })
        .collect(),
    })
  }
}
