mod common;

use rust_decimal_macros::dec;

use common::{seed_customer, test_context, today};
use ledgerly::domain::billing::{
  BillingError, Currency, InvoiceData, InvoiceFilter, InvoiceStatus, LineItemInput,
  ReminderChannel,
};

fn line_item(description: &str, quantity: i32, unit_price: rust_decimal::Decimal) -> LineItemInput {
  LineItemInput {
    product_id: None,
    description: description.to_string(),
    quantity,
    unit_price,
    tax_rate: None,
    discount_rate: None,
  }
}

#[tokio::test]
async fn test_invoice_totals_aggregate_item_rows() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;

  let mut consulting = line_item("Consulting", 2, dec!(100.00));
  consulting.tax_rate = Some(dec!(10));
  let mut hosting = line_item("Hosting", 1, dec!(50.00));
  hosting.discount_rate = Some(dec!(10));

  let (invoice, items) = ctx
    .billing
    .create_invoice(InvoiceData {
      customer_id: customer.id,
      issue_date: today(),
      due_date: today(),
      currency: Currency::EUR,
      notes: None,
      items: vec![consulting, hosting],
    })
    .await
    .unwrap();

  assert_eq!(items.len(), 2);
  assert_eq!(items[0].line_total, dec!(200.00));
  assert_eq!(items[0].tax_amount, dec!(20.00));
  assert_eq!(items[1].discount_amount, dec!(5.00));

  assert_eq!(invoice.subtotal, dec!(250.00));
  assert_eq!(invoice.tax_amount, dec!(20.00));
  assert_eq!(invoice.discount_amount, dec!(5.00));
  assert_eq!(invoice.total_amount, dec!(265.00));
  assert_eq!(invoice.balance_due, dec!(265.00));
  assert_eq!(invoice.paid_amount, dec!(0));
  assert_eq!(invoice.status, InvoiceStatus::Draft);
}

#[tokio::test]
async fn test_create_invoice_rejects_empty_item_list() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;

  let err = ctx
    .billing
    .create_invoice(InvoiceData {
      customer_id: customer.id,
      issue_date: today(),
      due_date: today(),
      currency: Currency::EUR,
      notes: None,
      items: vec![],
    })
    .await
    .unwrap_err();

  assert!(matches!(err, BillingError::NoLineItems));
}

#[tokio::test]
async fn test_invoice_numbers_are_sequential() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;

  let data = InvoiceData {
    customer_id: customer.id,
    issue_date: today(),
    due_date: today(),
    currency: Currency::EUR,
    notes: None,
    items: vec![line_item("Consulting", 1, dec!(100.00))],
  };

  let (first, _) = ctx.billing.create_invoice(data.clone()).await.unwrap();
  let (second, _) = ctx.billing.create_invoice(data).await.unwrap();

  assert_eq!(first.invoice_number.value(), "INV-000001");
  assert_eq!(second.invoice_number.value(), "INV-000002");
}

#[tokio::test]
async fn test_issued_invoice_cannot_be_edited_or_deleted() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;

  let data = InvoiceData {
    customer_id: customer.id,
    issue_date: today(),
    due_date: today(),
    currency: Currency::EUR,
    notes: None,
    items: vec![line_item("Consulting", 1, dec!(100.00))],
  };

  let (invoice, _) = ctx.billing.create_invoice(data.clone()).await.unwrap();
  ctx
    .billing
    .change_invoice_status(invoice.id, InvoiceStatus::Issued)
    .await
    .unwrap();

  let edit_err = ctx
    .billing
    .update_invoice(invoice.id, data)
    .await
    .unwrap_err();
  assert!(matches!(
    edit_err,
    BillingError::ImmutableInvoiceState { .. }
  ));

  let delete_err = ctx.billing.delete_invoice(invoice.id).await.unwrap_err();
  assert!(matches!(
    delete_err,
    BillingError::ImmutableInvoiceState { .. }
  ));
}

#[tokio::test]
async fn test_invoice_status_transitions_are_guarded() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;

  let (invoice, _) = ctx
    .billing
    .create_invoice(InvoiceData {
      customer_id: customer.id,
      issue_date: today(),
      due_date: today(),
      currency: Currency::EUR,
      notes: None,
      items: vec![line_item("Consulting", 1, dec!(100.00))],
    })
    .await
    .unwrap();

  // Draft can only move to issued or cancelled
  let err = ctx
    .billing
    .change_invoice_status(invoice.id, InvoiceStatus::FullyPaid)
    .await
    .unwrap_err();
  assert!(matches!(err, BillingError::InvalidStatusTransition { .. }));

  let issued = ctx
    .billing
    .change_invoice_status(invoice.id, InvoiceStatus::Issued)
    .await
    .unwrap();
  assert_eq!(issued.status, InvoiceStatus::Issued);

  let cancelled = ctx
    .billing
    .change_invoice_status(invoice.id, InvoiceStatus::Cancelled)
    .await
    .unwrap();
  assert_eq!(cancelled.status, InvoiceStatus::Cancelled);

  // Cancelled is terminal
  let err = ctx
    .billing
    .change_invoice_status(invoice.id, InvoiceStatus::Issued)
    .await
    .unwrap_err();
  assert!(matches!(err, BillingError::InvalidStatusTransition { .. }));
}

#[tokio::test]
async fn test_paid_statuses_are_never_set_by_hand() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;

  let (invoice, _) = ctx
    .billing
    .create_invoice(InvoiceData {
      customer_id: customer.id,
      issue_date: today(),
      due_date: today(),
      currency: Currency::EUR,
      notes: None,
      items: vec![line_item("Consulting", 1, dec!(100.00))],
    })
    .await
    .unwrap();
  ctx
    .billing
    .change_invoice_status(invoice.id, InvoiceStatus::Issued)
    .await
    .unwrap();

  for target in [InvoiceStatus::FullyPaid, InvoiceStatus::PartiallyPaid] {
    let err = ctx
      .billing
      .change_invoice_status(invoice.id, target)
      .await
      .unwrap_err();
    assert!(matches!(err, BillingError::InvalidStatusTransition { .. }));
  }

  // Status and balance stay in lockstep with the untouched ledger
  let (stored, _, _, _) = ctx.billing.get_invoice_details(invoice.id).await.unwrap();
  assert_eq!(stored.status, InvoiceStatus::Issued);
  assert_eq!(stored.balance_due, dec!(100.00));
}

#[tokio::test]
async fn test_customer_with_invoices_cannot_be_deleted() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;

  ctx
    .billing
    .create_invoice(InvoiceData {
      customer_id: customer.id,
      issue_date: today(),
      due_date: today(),
      currency: Currency::EUR,
      notes: None,
      items: vec![line_item("Consulting", 1, dec!(100.00))],
    })
    .await
    .unwrap();

  let err = ctx.billing.delete_customer(customer.id).await.unwrap_err();
  assert!(matches!(err, BillingError::ReferentialConflict(_)));
}

#[tokio::test]
async fn test_list_invoices_status_filter_takes_precedence() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;
  let other = seed_customer(&ctx, "Globex").await;

  for customer_id in [customer.id, other.id] {
    ctx
      .billing
      .create_invoice(InvoiceData {
        customer_id,
        issue_date: today(),
        due_date: today(),
        currency: Currency::EUR,
        notes: None,
        items: vec![line_item("Consulting", 1, dec!(100.00))],
      })
      .await
      .unwrap();
  }

  let by_customer = ctx
    .billing
    .list_invoices(InvoiceFilter {
      status: None,
      customer_id: Some(customer.id),
    })
    .await
    .unwrap();
  assert_eq!(by_customer.len(), 1);

  // With both filters set, status wins and the customer filter is ignored
  let by_status = ctx
    .billing
    .list_invoices(InvoiceFilter {
      status: Some(InvoiceStatus::Draft),
      customer_id: Some(customer.id),
    })
    .await
    .unwrap();
  assert_eq!(by_status.len(), 2);
}

#[tokio::test]
async fn test_reminder_requires_existing_issued_invoice() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;

  let (invoice, _) = ctx
    .billing
    .create_invoice(InvoiceData {
      customer_id: customer.id,
      issue_date: today(),
      due_date: today(),
      currency: Currency::EUR,
      notes: None,
      items: vec![line_item("Consulting", 1, dec!(100.00))],
    })
    .await
    .unwrap();

  // Drafts were never sent, so there is nothing to chase
  let err = ctx
    .billing
    .record_reminder(invoice.id, ReminderChannel::Email, 1, None, None)
    .await
    .unwrap_err();
  assert!(matches!(err, BillingError::ReminderOnDraft(_)));

  ctx
    .billing
    .change_invoice_status(invoice.id, InvoiceStatus::Issued)
    .await
    .unwrap();

  let reminder = ctx
    .billing
    .record_reminder(invoice.id, ReminderChannel::Email, 1, None, None)
    .await
    .unwrap();
  assert_eq!(reminder.invoice_id, invoice.id);
  assert_eq!(reminder.reminder_level, 1);

  let err = ctx
    .billing
    .record_reminder(uuid::Uuid::new_v4(), ReminderChannel::Email, 1, None, None)
    .await
    .unwrap_err();
  assert!(matches!(err, BillingError::InvoiceNotFound(_)));
}
