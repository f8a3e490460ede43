use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{
  Customer, CustomerDetails, DunningReminder, Invoice, InvoiceItem, InvoiceTotals, Product,
  ProductDetails,
};
use super::errors::BillingError;
use super::ports::{
  CustomerRepository, CustomerStats, DunningReminderRepository, InvoiceFilter, InvoiceListStats,
  InvoiceRepository, ProductRepository, ProductStats,
};
use super::value_objects::{
  Amount, Currency, InvoiceStatus, LineItemDescription, Percentage, Quantity, ReminderChannel,
};

/// Raw line item input as supplied by the caller. Rates default to zero when
/// omitted. Validated into value objects before any persistence happens.
#[derive(Debug, Clone)]
pub struct LineItemInput {
  pub product_id: Option<Uuid>,
  pub description: String,
  pub quantity: i32,
  pub unit_price: Decimal,
  pub tax_rate: Option<Decimal>,
  pub discount_rate: Option<Decimal>,
}

/// Invoice creation/edit data.
#[derive(Debug, Clone)]
pub struct InvoiceData {
  pub customer_id: Uuid,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub currency: Currency,
  pub notes: Option<String>,
  pub items: Vec<LineItemInput>,
}

pub struct BillingServiceDependencies {
  pub customer_repo: Arc<dyn CustomerRepository>,
  pub product_repo: Arc<dyn ProductRepository>,
  pub invoice_repo: Arc<dyn InvoiceRepository>,
  pub reminder_repo: Arc<dyn DunningReminderRepository>,
}

pub struct BillingService {
  customer_repo: Arc<dyn CustomerRepository>,
  product_repo: Arc<dyn ProductRepository>,
  invoice_repo: Arc<dyn InvoiceRepository>,
  reminder_repo: Arc<dyn DunningReminderRepository>,
}

impl BillingService {
  pub fn new(deps: BillingServiceDependencies) -> Self {
    Self {
      customer_repo: deps.customer_repo,
      product_repo: deps.product_repo,
      invoice_repo: deps.invoice_repo,
      reminder_repo: deps.reminder_repo,
    }
  }

  // Customer operations

  pub async fn create_customer(&self, details: CustomerDetails) -> Result<Customer, BillingError> {
    let customer = Customer::new(details);
    self.customer_repo.create(customer).await
  }

  pub async fn update_customer(
    &self,
    customer_id: Uuid,
    details: CustomerDetails,
  ) -> Result<Customer, BillingError> {
    let mut customer = self
      .customer_repo
      .find_by_id(customer_id)
      .await?
      .ok_or(BillingError::CustomerNotFound(customer_id))?;

    customer.update(details);
    self.customer_repo.update(customer).await
  }

  pub async fn delete_customer(&self, customer_id: Uuid) -> Result<(), BillingError> {
    let customer = self
      .customer_repo
      .find_by_id(customer_id)
      .await?
      .ok_or(BillingError::CustomerNotFound(customer_id))?;

    if self.invoice_repo.exists_for_customer(customer.id).await? {
      return Err(BillingError::ReferentialConflict(
        "Cannot delete customer with existing invoices".to_string(),
      ));
    }

    self.customer_repo.delete(customer.id).await
  }

  pub async fn get_customer(
    &self,
    customer_id: Uuid,
  ) -> Result<(Customer, CustomerStats), BillingError> {
    let customer = self
      .customer_repo
      .find_by_id(customer_id)
      .await?
      .ok_or(BillingError::CustomerNotFound(customer_id))?;

    let stats = self.invoice_repo.stats_for_customer(customer_id).await?;
    Ok((customer, stats))
  }

  pub async fn list_customers(&self) -> Result<Vec<Customer>, BillingError> {
    self.customer_repo.list().await
  }

  // Product operations

  pub async fn create_product(&self, details: ProductDetails) -> Result<Product, BillingError> {
    let product = Product::new(details);
    self.product_repo.create(product).await
  }

  pub async fn update_product(
    &self,
    product_id: Uuid,
    details: ProductDetails,
  ) -> Result<Product, BillingError> {
    let mut product = self
      .product_repo
      .find_by_id(product_id)
      .await?
      .ok_or(BillingError::ProductNotFound(product_id))?;

    product.update(details);
    self.product_repo.update(product).await
  }

  pub async fn delete_product(&self, product_id: Uuid) -> Result<(), BillingError> {
    let product = self
      .product_repo
      .find_by_id(product_id)
      .await?
      .ok_or(BillingError::ProductNotFound(product_id))?;

    if self.product_repo.is_referenced(product.id).await? {
      return Err(BillingError::ReferentialConflict(
        "Cannot delete product that has been used in invoices".to_string(),
      ));
    }

    self.product_repo.delete(product.id).await
  }

  pub async fn get_product(
    &self,
    product_id: Uuid,
  ) -> Result<(Product, ProductStats), BillingError> {
    let product = self
      .product_repo
      .find_by_id(product_id)
      .await?
      .ok_or(BillingError::ProductNotFound(product_id))?;

    let stats = self.product_repo.stats_for(product_id).await?;
    Ok((product, stats))
  }

  pub async fn list_products(&self) -> Result<Vec<Product>, BillingError> {
    self.product_repo.list().await
  }

  // Invoice operations

  pub async fn create_invoice(
    &self,
    data: InvoiceData,
  ) -> Result<(Invoice, Vec<InvoiceItem>), BillingError> {
    self
      .customer_repo
      .find_by_id(data.customer_id)
      .await?
      .ok_or(BillingError::CustomerNotFound(data.customer_id))?;

    // Items are built before the invoice row exists; the id is stamped on
    // afterwards, before anything is persisted.
    let mut items = validate_items(&data.items)?;
    let totals = InvoiceTotals::calculate(&items);

    let invoice_number = self.invoice_repo.next_invoice_number().await?;
    let invoice = Invoice::new(
      invoice_number,
      data.customer_id,
      data.issue_date,
      data.due_date,
      data.currency,
      data.notes,
      &totals,
    );
    for item in &mut items {
      item.invoice_id = invoice.id;
    }

    self.invoice_repo.create_with_items(invoice, items).await
  }

  pub async fn update_invoice(
    &self,
    invoice_id: Uuid,
    data: InvoiceData,
  ) -> Result<(Invoice, Vec<InvoiceItem>), BillingError> {
    let mut invoice = self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(BillingError::InvoiceNotFound(invoice_id))?;

    self
      .customer_repo
      .find_by_id(data.customer_id)
      .await?
      .ok_or(BillingError::CustomerNotFound(data.customer_id))?;

    let mut items = validate_items(&data.items)?;
    for item in &mut items {
      item.invoice_id = invoice.id;
    }
    let totals = InvoiceTotals::calculate(&items);

    invoice.apply_edit(
      data.customer_id,
      data.issue_date,
      data.due_date,
      data.currency,
      data.notes,
      &totals,
    )?;

    // The previous item set is discarded and replaced wholesale, never merged.
    self.invoice_repo.update_with_items(invoice, items).await
  }

  pub async fn delete_invoice(&self, invoice_id: Uuid) -> Result<(), BillingError> {
    let invoice = self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(BillingError::InvoiceNotFound(invoice_id))?;

    if !invoice.is_editable() {
      return Err(BillingError::ImmutableInvoiceState {
        invoice_id: invoice.id,
        status: invoice.status,
      });
    }

    self.invoice_repo.delete(invoice.id).await
  }

  pub async fn change_invoice_status(
    &self,
    invoice_id: Uuid,
    new_status: InvoiceStatus,
  ) -> Result<Invoice, BillingError> {
    let mut invoice = self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(BillingError::InvoiceNotFound(invoice_id))?;

    // Paid statuses are derived from balance_due when payments land,
    // never set by hand
    if matches!(
      new_status,
      InvoiceStatus::PartiallyPaid | InvoiceStatus::FullyPaid
    ) {
      return Err(BillingError::InvalidStatusTransition {
        from: invoice.status,
        to: new_status,
      });
    }

    invoice.change_status(new_status)?;
    self.invoice_repo.update(invoice).await
  }

  pub async fn get_invoice_details(
    &self,
    invoice_id: Uuid,
  ) -> Result<(Invoice, Vec<InvoiceItem>, Customer, Vec<DunningReminder>), BillingError> {
    let invoice = self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(BillingError::InvoiceNotFound(invoice_id))?;

    let items = self.invoice_repo.find_items(invoice_id).await?;
    let customer = self
      .customer_repo
      .find_by_id(invoice.customer_id)
      .await?
      .ok_or(BillingError::CustomerNotFound(invoice.customer_id))?;
    let reminders = self.reminder_repo.find_by_invoice_id(invoice_id).await?;

    Ok((invoice, items, customer, reminders))
  }

  pub async fn list_invoices(&self, filter: InvoiceFilter) -> Result<Vec<Invoice>, BillingError> {
    self.invoice_repo.list(filter).await
  }

  pub async fn invoice_stats(&self) -> Result<InvoiceListStats, BillingError> {
    self.invoice_repo.list_stats().await
  }

  // Dunning reminders

  pub async fn record_reminder(
    &self,
    invoice_id: Uuid,
    channel: ReminderChannel,
    reminder_level: i32,
    message: Option<String>,
    next_reminder_at: Option<chrono::DateTime<chrono::Utc>>,
  ) -> Result<DunningReminder, BillingError> {
    let invoice = self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(BillingError::InvoiceNotFound(invoice_id))?;

    // Drafts have not been sent to the customer yet
    if invoice.status == InvoiceStatus::Draft {
      return Err(BillingError::ReminderOnDraft(invoice_id));
    }

    let reminder =
      DunningReminder::new(invoice_id, channel, reminder_level, message, next_reminder_at)?;
    self.reminder_repo.create(reminder).await
  }
}

/// Validates raw line items into entities. Fails with `InvalidLineItem`
/// before any persistence occurs; a missing rate counts as zero.
fn validate_items(inputs: &[LineItemInput]) -> Result<Vec<InvoiceItem>, BillingError> {
  if inputs.is_empty() {
    return Err(BillingError::NoLineItems);
  }

  inputs
    .iter()
    .enumerate()
    .map(|(idx, input)| {
      let bad = |e: super::value_objects::ValueObjectError| {
        BillingError::InvalidLineItem(format!("item {}: {}", idx + 1, e))
      };

      let description = LineItemDescription::new(input.description.clone()).map_err(bad)?;
      let quantity = Quantity::new(input.quantity).map_err(bad)?;
      let unit_price = Amount::new(input.unit_price).map_err(bad)?;
      let tax_rate = match input.tax_rate {
        Some(rate) => Percentage::new(rate).map_err(bad)?,
        None => Percentage::zero(),
      };
      let discount_rate = match input.discount_rate {
        Some(rate) => Percentage::new(rate).map_err(bad)?,
        None => Percentage::zero(),
      };

      Ok(InvoiceItem::new(
        Uuid::nil(),
        input.product_id,
        description,
        quantity,
        unit_price,
        tax_rate,
        discount_rate,
      ))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn input(quantity: i32, unit_price: Decimal) -> LineItemInput {
    LineItemInput {
      product_id: None,
      description: "Consulting".to_string(),
      quantity,
      unit_price,
      tax_rate: None,
      discount_rate: None,
    }
  }

  #[test]
  fn test_validate_items_rejects_empty_list() {
    assert!(matches!(
      validate_items(&[]),
      Err(BillingError::NoLineItems)
    ));
  }

  #[test]
  fn test_validate_items_rejects_negative_quantity() {
    let err = validate_items(&[input(-1, dec!(10))]).unwrap_err();
    assert!(matches!(err, BillingError::InvalidLineItem(_)));
  }

  #[test]
  fn test_validate_items_rejects_negative_price() {
    let err = validate_items(&[input(1, dec!(-10))]).unwrap_err();
    assert!(matches!(err, BillingError::InvalidLineItem(_)));
  }

  #[test]
  fn test_validate_items_rejects_out_of_range_rate() {
    let mut item = input(1, dec!(10));
    item.tax_rate = Some(dec!(120));
    assert!(matches!(
      validate_items(&[item]),
      Err(BillingError::InvalidLineItem(_))
    ));
  }

  #[test]
  fn test_validate_items_defaults_rates_to_zero() {
    let items = validate_items(&[input(2, dec!(100))]).unwrap();
    assert_eq!(items[0].tax_amount, dec!(0.00));
    assert_eq!(items[0].discount_amount, dec!(0.00));
    assert_eq!(items[0].line_total, dec!(200.00));
  }
}
