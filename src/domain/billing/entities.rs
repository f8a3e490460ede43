use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::BillingError;
use super::value_objects::{
  Amount, Currency, CustomerName, CustomerStatus, InvoiceNumber, InvoiceStatus,
  LineItemDescription, Percentage, ProductKind, ProductName, Quantity, ReminderChannel,
  ReminderStatus, ValueObjectError, round_money,
};

// Customer - invoiced party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
  pub id: Uuid,
  pub name: CustomerName,
  pub email: String,
  pub phone: Option<String>,
  pub company: Option<String>,
  pub billing_address: Option<String>,
  pub shipping_address: Option<String>,
  pub tax_number: Option<String>,
  pub status: CustomerStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Customer attributes shared by create and update.
#[derive(Debug, Clone)]
pub struct CustomerDetails {
  pub name: CustomerName,
  pub email: String,
  pub phone: Option<String>,
  pub company: Option<String>,
  pub billing_address: Option<String>,
  pub shipping_address: Option<String>,
  pub tax_number: Option<String>,
  pub status: CustomerStatus,
}

impl Customer {
  pub fn new(details: CustomerDetails) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      name: details.name,
      email: details.email,
      phone: details.phone,
      company: details.company,
      billing_address: details.billing_address,
      shipping_address: details.shipping_address,
      tax_number: details.tax_number,
      status: details.status,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn update(&mut self, details: CustomerDetails) {
    self.name = details.name;
    self.email = details.email;
    self.phone = details.phone;
    self.company = details.company;
    self.billing_address = details.billing_address;
    self.shipping_address = details.shipping_address;
    self.tax_number = details.tax_number;
    self.status = details.status;
    self.updated_at = Utc::now();
  }

  pub fn is_active(&self) -> bool {
    self.status == CustomerStatus::Active
  }
}

// Product - catalog entry referenced by invoice items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: Uuid,
  pub name: ProductName,
  pub description: Option<String>,
  pub sku: Option<String>,
  pub price: Amount,
  pub tax_rate: Percentage,
  pub kind: ProductKind,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProductDetails {
  pub name: ProductName,
  pub description: Option<String>,
  pub sku: Option<String>,
  pub price: Amount,
  pub tax_rate: Percentage,
  pub kind: ProductKind,
  pub is_active: bool,
}

impl Product {
  pub fn new(details: ProductDetails) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      name: details.name,
      description: details.description,
      sku: details.sku,
      price: details.price,
      tax_rate: details.tax_rate,
      kind: details.kind,
      is_active: details.is_active,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn update(&mut self, details: ProductDetails) {
    self.name = details.name;
    self.description = details.description;
    self.sku = details.sku;
    self.price = details.price;
    self.tax_rate = details.tax_rate;
    self.kind = details.kind;
    self.is_active = details.is_active;
    self.updated_at = Utc::now();
  }
}

// Invoice - billing document with denormalized totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub invoice_number: InvoiceNumber,
  pub customer_id: Uuid,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub status: InvoiceStatus,
  pub subtotal: Decimal,
  pub tax_amount: Decimal,
  pub discount_amount: Decimal,
  pub total_amount: Decimal,
  pub paid_amount: Decimal,
  pub balance_due: Decimal,
  pub currency: Currency,
  pub notes: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Invoice {
  pub fn new(
    invoice_number: InvoiceNumber,
    customer_id: Uuid,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    currency: Currency,
    notes: Option<String>,
    totals: &InvoiceTotals,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      invoice_number,
      customer_id,
      issue_date,
      due_date,
      status: InvoiceStatus::Draft,
      subtotal: totals.subtotal,
      tax_amount: totals.tax_amount,
      discount_amount: totals.discount_amount,
      total_amount: totals.total_amount,
      paid_amount: Decimal::ZERO,
      balance_due: totals.total_amount,
      currency,
      notes,
      created_at: now,
      updated_at: now,
    }
  }

  /// Rewrites header fields and totals on edit. Paid amount is preserved and
  /// the balance recomputed against it. Only draft invoices may change.
  pub fn apply_edit(
    &mut self,
    customer_id: Uuid,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    currency: Currency,
    notes: Option<String>,
    totals: &InvoiceTotals,
  ) -> Result<(), BillingError> {
    if !self.status.is_editable() {
      return Err(BillingError::ImmutableInvoiceState {
        invoice_id: self.id,
        status: self.status,
      });
    }

    self.customer_id = customer_id;
    self.issue_date = issue_date;
    self.due_date = due_date;
    self.currency = currency;
    self.notes = notes;
    self.subtotal = totals.subtotal;
    self.tax_amount = totals.tax_amount;
    self.discount_amount = totals.discount_amount;
    self.total_amount = totals.total_amount;
    self.balance_due = self.total_amount - self.paid_amount;
    self.updated_at = Utc::now();

    Ok(())
  }

  pub fn change_status(&mut self, new_status: InvoiceStatus) -> Result<(), BillingError> {
    if !self.status.can_transition_to(new_status) {
      return Err(BillingError::InvalidStatusTransition {
        from: self.status,
        to: new_status,
      });
    }

    self.status = new_status;
    self.updated_at = Utc::now();
    Ok(())
  }

  /// Books an allocated payment amount against this invoice and derives the
  /// payment status from the resulting balance. Callers guard payability and
  /// the balance ceiling before invoking this.
  pub fn apply_payment(&mut self, amount: Decimal) {
    self.paid_amount += amount;
    self.balance_due = self.total_amount - self.paid_amount;
    self.status = if self.balance_due.is_zero() {
      InvoiceStatus::FullyPaid
    } else {
      InvoiceStatus::PartiallyPaid
    };
    self.updated_at = Utc::now();
  }

  pub fn is_editable(&self) -> bool {
    self.status.is_editable()
  }

  pub fn is_payable(&self) -> bool {
    self.status.is_payable()
  }

  pub fn is_overdue(&self, current_date: NaiveDate) -> bool {
    self.due_date < current_date
      && matches!(
        self.status,
        InvoiceStatus::Issued | InvoiceStatus::PartiallyPaid
      )
  }
}

// Invoice Item - line item with derived monetary fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub product_id: Option<Uuid>,
  pub description: LineItemDescription,
  pub quantity: Quantity,
  pub unit_price: Amount,
  pub line_total: Decimal,
  pub tax_rate: Percentage,
  pub tax_amount: Decimal,
  pub discount_rate: Percentage,
  pub discount_amount: Decimal,
}

impl InvoiceItem {
  /// Builds an item and derives line_total, tax_amount, and discount_amount.
  /// Derived fields are rounded to 2 decimal places at construction, since
  /// that is the form in which they are persisted.
  pub fn new(
    invoice_id: Uuid,
    product_id: Option<Uuid>,
    description: LineItemDescription,
    quantity: Quantity,
    unit_price: Amount,
    tax_rate: Percentage,
    discount_rate: Percentage,
  ) -> Self {
    let line_total = round_money(quantity.as_decimal() * unit_price.value());
    let tax_amount = round_money(line_total * tax_rate.as_multiplier());
    let discount_amount = round_money(line_total * discount_rate.as_multiplier());

    Self {
      id: Uuid::new_v4(),
      invoice_id,
      product_id,
      description,
      quantity,
      unit_price,
      line_total,
      tax_rate,
      tax_amount,
      discount_rate,
      discount_amount,
    }
  }
}

// Invoice Totals - aggregated from item rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
  pub subtotal: Decimal,
  pub tax_amount: Decimal,
  pub discount_amount: Decimal,
  pub total_amount: Decimal,
}

impl InvoiceTotals {
  /// Sums the already-rounded per-item fields so invoice-level figures agree
  /// exactly with the item rows: subtotal = Σ line_total, tax = Σ item tax,
  /// discount = Σ item discount, total = subtotal + tax - discount.
  pub fn calculate(items: &[InvoiceItem]) -> Self {
    let subtotal: Decimal = items.iter().map(|i| i.line_total).sum();
    let tax_amount: Decimal = items.iter().map(|i| i.tax_amount).sum();
    let discount_amount: Decimal = items.iter().map(|i| i.discount_amount).sum();
    let total_amount = subtotal + tax_amount - discount_amount;

    Self {
      subtotal,
      tax_amount,
      discount_amount,
      total_amount,
    }
  }
}

// Dunning Reminder - passive record of a sent payment reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DunningReminder {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub channel: ReminderChannel,
  pub reminder_level: i32,
  pub sent_at: DateTime<Utc>,
  pub status: ReminderStatus,
  pub message: Option<String>,
  pub next_reminder_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
}

impl DunningReminder {
  pub fn new(
    invoice_id: Uuid,
    channel: ReminderChannel,
    reminder_level: i32,
    message: Option<String>,
    next_reminder_at: Option<DateTime<Utc>>,
  ) -> Result<Self, ValueObjectError> {
    if reminder_level < 1 {
      return Err(ValueObjectError::InvalidReminderLevel(
        "Reminder level starts at 1".to_string(),
      ));
    }
    let now = Utc::now();
    Ok(Self {
      id: Uuid::new_v4(),
      invoice_id,
      channel,
      reminder_level,
      sent_at: now,
      status: ReminderStatus::Sent,
      message,
      next_reminder_at,
      created_at: now,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn item(qty: i32, price: Decimal, tax: Decimal, discount: Decimal) -> InvoiceItem {
    InvoiceItem::new(
      Uuid::new_v4(),
      None,
      LineItemDescription::new("Test item".to_string()).unwrap(),
      Quantity::new(qty).unwrap(),
      Amount::new(price).unwrap(),
      Percentage::new(tax).unwrap(),
      Percentage::new(discount).unwrap(),
    )
  }

  fn invoice_with_total(total: Decimal) -> Invoice {
    let totals = InvoiceTotals {
      subtotal: total,
      tax_amount: dec!(0),
      discount_amount: dec!(0),
      total_amount: total,
    };
    Invoice::new(
      InvoiceNumber::from_sequence(1),
      Uuid::new_v4(),
      NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
      NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
      Currency::USD,
      None,
      &totals,
    )
  }

  #[test]
  fn test_item_derived_fields() {
    let item = item(2, dec!(100), dec!(10), dec!(0));
    assert_eq!(item.line_total, dec!(200.00));
    assert_eq!(item.tax_amount, dec!(20.00));
    assert_eq!(item.discount_amount, dec!(0.00));
  }

  #[test]
  fn test_item_rounding_at_persisted_boundary() {
    // 3 x 9.99 = 29.97, 7.5% tax = 2.24775 -> 2.25
    let item = item(3, dec!(9.99), dec!(7.5), dec!(0));
    assert_eq!(item.line_total, dec!(29.97));
    assert_eq!(item.tax_amount, dec!(2.25));
  }

  #[test]
  fn test_totals_worked_example() {
    // [{qty:2, price:100, tax:10}, {qty:1, price:50, tax:0, discount:10}]
    let items = vec![
      item(2, dec!(100), dec!(10), dec!(0)),
      item(1, dec!(50), dec!(0), dec!(10)),
    ];

    let totals = InvoiceTotals::calculate(&items);
    assert_eq!(totals.subtotal, dec!(250.00));
    assert_eq!(totals.tax_amount, dec!(20.00));
    assert_eq!(totals.discount_amount, dec!(5.00));
    assert_eq!(totals.total_amount, dec!(265.00));
  }

  #[test]
  fn test_totals_idempotent_for_identical_items() {
    let items = vec![item(4, dec!(12.5), dec!(18), dec!(5))];
    let first = InvoiceTotals::calculate(&items);
    let second = InvoiceTotals::calculate(&items);
    assert_eq!(first, second);
  }

  #[test]
  fn test_invoice_starts_as_unpaid_draft() {
    let invoice = invoice_with_total(dec!(265));
    assert_eq!(invoice.status, InvoiceStatus::Draft);
    assert_eq!(invoice.paid_amount, dec!(0));
    assert_eq!(invoice.balance_due, dec!(265));
    assert!(invoice.is_editable());
  }

  #[test]
  fn test_edit_preserves_paid_amount() {
    let mut invoice = invoice_with_total(dec!(100));
    invoice.paid_amount = dec!(40);

    let new_totals = InvoiceTotals {
      subtotal: dec!(150),
      tax_amount: dec!(15),
      discount_amount: dec!(5),
      total_amount: dec!(160),
    };
    invoice
      .apply_edit(
        invoice.customer_id,
        invoice.issue_date,
        invoice.due_date,
        Currency::USD,
        None,
        &new_totals,
      )
      .unwrap();

    assert_eq!(invoice.total_amount, dec!(160));
    assert_eq!(invoice.paid_amount, dec!(40));
    assert_eq!(invoice.balance_due, dec!(120));
  }

  #[test]
  fn test_edit_rejected_outside_draft() {
    let mut invoice = invoice_with_total(dec!(100));
    invoice.change_status(InvoiceStatus::Issued).unwrap();

    let before = invoice.clone();
    let err = invoice.apply_edit(
      Uuid::new_v4(),
      invoice.issue_date,
      invoice.due_date,
      Currency::EUR,
      None,
      &InvoiceTotals::calculate(&[]),
    );
    assert!(matches!(
      err,
      Err(BillingError::ImmutableInvoiceState { .. })
    ));
    // Rejected edits leave every field unchanged
    assert_eq!(invoice, before);
  }

  #[test]
  fn test_apply_payment_derives_status() {
    let mut invoice = invoice_with_total(dec!(265));
    invoice.change_status(InvoiceStatus::Issued).unwrap();

    invoice.apply_payment(dec!(100));
    assert_eq!(invoice.paid_amount, dec!(100));
    assert_eq!(invoice.balance_due, dec!(165));
    assert_eq!(invoice.status, InvoiceStatus::PartiallyPaid);

    invoice.apply_payment(dec!(165));
    assert_eq!(invoice.balance_due, dec!(0));
    assert_eq!(invoice.status, InvoiceStatus::FullyPaid);
  }

  #[test]
  fn test_invalid_status_transition() {
    let mut invoice = invoice_with_total(dec!(10));
    assert!(matches!(
      invoice.change_status(InvoiceStatus::FullyPaid),
      Err(BillingError::InvalidStatusTransition { .. })
    ));
  }

  #[test]
  fn test_invoice_overdue() {
    let mut invoice = invoice_with_total(dec!(10));
    let after_due = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();

    assert!(!invoice.is_overdue(after_due)); // drafts are never overdue
    invoice.change_status(InvoiceStatus::Issued).unwrap();
    assert!(invoice.is_overdue(after_due));
    assert!(!invoice.is_overdue(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
  }

  #[test]
  fn test_reminder_level_validation() {
    assert!(DunningReminder::new(Uuid::new_v4(), ReminderChannel::Email, 0, None, None).is_err());
    let reminder =
      DunningReminder::new(Uuid::new_v4(), ReminderChannel::Email, 1, None, None).unwrap();
    assert_eq!(reminder.status, ReminderStatus::Sent);
  }
}
