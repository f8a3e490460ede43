mod common;

use rust_decimal_macros::dec;
use uuid::Uuid;

use common::{seed_customer, test_context, today, TestContext};
use ledgerly::domain::billing::{
  Currency, Invoice, InvoiceData, InvoiceRepository, InvoiceStatus, LineItemInput,
};
use ledgerly::domain::payments::{
  CreditNoteData, CreditNoteStatus, CreditReason, Payment, PaymentData, PaymentError,
  PaymentMethod, PaymentStatus,
};

async fn seed_invoice(ctx: &TestContext, customer_id: Uuid, total: rust_decimal::Decimal) -> Invoice {
  let (invoice, _) = ctx
    .billing
    .create_invoice(InvoiceData {
      customer_id,
      issue_date: today(),
      due_date: today(),
      currency: Currency::EUR,
      notes: None,
      items: vec![LineItemInput {
        product_id: None,
        description: "Consulting".to_string(),
        quantity: 1,
        unit_price: total,
        tax_rate: None,
        discount_rate: None,
      }],
    })
    .await
    .unwrap();

  ctx
    .billing
    .change_invoice_status(invoice.id, InvoiceStatus::Issued)
    .await
    .unwrap()
}

async fn seed_completed_payment(
  ctx: &TestContext,
  customer_id: Uuid,
  amount: rust_decimal::Decimal,
) -> Payment {
  let payment = ctx
    .payments
    .record_payment(PaymentData {
      customer_id,
      amount,
      currency: Currency::EUR,
      method: PaymentMethod::BankTransfer,
      payment_date: None,
      notes: None,
    })
    .await
    .unwrap();

  ctx
    .payments
    .change_payment_status(payment.id, PaymentStatus::Completed)
    .await
    .unwrap()
}

#[tokio::test]
async fn test_recorded_payment_starts_pending_with_sequential_reference() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;

  let payment = ctx
    .payments
    .record_payment(PaymentData {
      customer_id: customer.id,
      amount: dec!(500.00),
      currency: Currency::EUR,
      method: PaymentMethod::Card,
      payment_date: None,
      notes: None,
    })
    .await
    .unwrap();

  assert_eq!(payment.status, PaymentStatus::Pending);
  assert_eq!(payment.payment_reference.value(), "PAY-000001");
}

#[tokio::test]
async fn test_pending_payment_cannot_be_allocated() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;
  let invoice = seed_invoice(&ctx, customer.id, dec!(100.00)).await;

  let payment = ctx
    .payments
    .record_payment(PaymentData {
      customer_id: customer.id,
      amount: dec!(100.00),
      currency: Currency::EUR,
      method: PaymentMethod::Cash,
      payment_date: None,
      notes: None,
    })
    .await
    .unwrap();

  let err = ctx
    .payments
    .allocate(payment.id, invoice.id, dec!(50.00))
    .await
    .unwrap_err();
  assert!(matches!(err, PaymentError::PaymentNotAllocatable(_)));
}

#[tokio::test]
async fn test_allocation_settles_invoice_in_two_steps() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;
  let invoice = seed_invoice(&ctx, customer.id, dec!(265.00)).await;
  let payment = seed_completed_payment(&ctx, customer.id, dec!(500.00)).await;

  let (allocation, invoice) = ctx
    .payments
    .allocate(payment.id, invoice.id, dec!(100.00))
    .await
    .unwrap();
  assert_eq!(allocation.allocated_amount, dec!(100.00));
  assert_eq!(invoice.paid_amount, dec!(100.00));
  assert_eq!(invoice.balance_due, dec!(165.00));
  assert_eq!(invoice.status, InvoiceStatus::PartiallyPaid);

  let (allocation, invoice) = ctx
    .payments
    .allocate(payment.id, invoice.id, dec!(165.00))
    .await
    .unwrap();
  // Repeat allocations against the same invoice merge into one row
  assert_eq!(allocation.allocated_amount, dec!(265.00));
  assert_eq!(invoice.balance_due, dec!(0.00));
  assert_eq!(invoice.status, InvoiceStatus::FullyPaid);

  // The settled invoice is what later reads observe
  let stored = ctx
    .invoice_repo
    .find_by_id(invoice.id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(stored.status, InvoiceStatus::FullyPaid);

  let (_, allocations, unallocated) = ctx.payments.get_payment(payment.id).await.unwrap();
  assert_eq!(allocations.len(), 1);
  assert_eq!(unallocated, dec!(235.00));
}

#[tokio::test]
async fn test_allocation_cannot_exceed_unallocated_remainder() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;
  let first = seed_invoice(&ctx, customer.id, dec!(400.00)).await;
  let second = seed_invoice(&ctx, customer.id, dec!(400.00)).await;
  let payment = seed_completed_payment(&ctx, customer.id, dec!(500.00)).await;

  ctx
    .payments
    .allocate(payment.id, first.id, dec!(300.00))
    .await
    .unwrap();

  let err = ctx
    .payments
    .allocate(payment.id, second.id, dec!(250.00))
    .await
    .unwrap_err();
  match err {
    PaymentError::OverAllocation {
      requested,
      unallocated,
    } => {
      assert_eq!(requested, dec!(250.00));
      assert_eq!(unallocated, dec!(200.00));
    }
    other => panic!("expected OverAllocation, got {other:?}"),
  }
}

#[tokio::test]
async fn test_allocation_cannot_exceed_invoice_balance() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;
  let invoice = seed_invoice(&ctx, customer.id, dec!(100.00)).await;
  let payment = seed_completed_payment(&ctx, customer.id, dec!(500.00)).await;

  let err = ctx
    .payments
    .allocate(payment.id, invoice.id, dec!(150.00))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    PaymentError::AllocationExceedsBalance { .. }
  ));
}

#[tokio::test]
async fn test_allocation_rejects_draft_invoice_and_nonpositive_amount() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;
  let payment = seed_completed_payment(&ctx, customer.id, dec!(500.00)).await;

  let (draft, _) = ctx
    .billing
    .create_invoice(InvoiceData {
      customer_id: customer.id,
      issue_date: today(),
      due_date: today(),
      currency: Currency::EUR,
      notes: None,
      items: vec![LineItemInput {
        product_id: None,
        description: "Consulting".to_string(),
        quantity: 1,
        unit_price: dec!(100.00),
        tax_rate: None,
        discount_rate: None,
      }],
    })
    .await
    .unwrap();

  let err = ctx
    .payments
    .allocate(payment.id, draft.id, dec!(50.00))
    .await
    .unwrap_err();
  assert!(matches!(err, PaymentError::InvoiceNotPayable { .. }));

  let err = ctx
    .payments
    .allocate(payment.id, draft.id, dec!(0.00))
    .await
    .unwrap_err();
  assert!(matches!(err, PaymentError::Validation(_)));
}

#[tokio::test]
async fn test_payment_status_settles_exactly_once() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;
  let payment = seed_completed_payment(&ctx, customer.id, dec!(100.00)).await;

  assert!(payment.payment_date.is_some());

  let err = ctx
    .payments
    .change_payment_status(payment.id, PaymentStatus::Failed)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    PaymentError::InvalidPaymentStatusChange { .. }
  ));
}

#[tokio::test]
async fn test_credit_note_applies_against_linked_invoice() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;
  let invoice = seed_invoice(&ctx, customer.id, dec!(200.00)).await;

  let credit_note = ctx
    .payments
    .create_credit_note(CreditNoteData {
      customer_id: customer.id,
      invoice_id: Some(invoice.id),
      issue_date: today(),
      amount: dec!(80.00),
      currency: Currency::EUR,
      reason: CreditReason::Adjustment,
      description: "Service outage credit".to_string(),
    })
    .await
    .unwrap();
  assert_eq!(credit_note.status, CreditNoteStatus::Pending);
  assert_eq!(credit_note.credit_note_number.value(), "CN-000001");

  let (applied, invoice) = ctx
    .payments
    .apply_credit_note(credit_note.id, dec!(80.00))
    .await
    .unwrap();
  assert_eq!(applied.applied_amount, dec!(80.00));
  assert_eq!(applied.remaining_amount(), dec!(0.00));
  assert_eq!(applied.status, CreditNoteStatus::Applied);
  assert_eq!(invoice.balance_due, dec!(120.00));
  assert_eq!(invoice.status, InvoiceStatus::PartiallyPaid);
}

#[tokio::test]
async fn test_credit_note_without_invoice_cannot_be_applied() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;

  let credit_note = ctx
    .payments
    .create_credit_note(CreditNoteData {
      customer_id: customer.id,
      invoice_id: None,
      issue_date: today(),
      amount: dec!(80.00),
      currency: Currency::EUR,
      reason: CreditReason::Other,
      description: "Goodwill".to_string(),
    })
    .await
    .unwrap();

  let err = ctx
    .payments
    .apply_credit_note(credit_note.id, dec!(40.00))
    .await
    .unwrap_err();
  assert!(matches!(err, PaymentError::CreditNoteUnlinked));
}

#[tokio::test]
async fn test_credit_note_refund_is_capped_at_remaining_credit() {
  let ctx = test_context();
  let customer = seed_customer(&ctx, "Acme").await;

  let credit_note = ctx
    .payments
    .create_credit_note(CreditNoteData {
      customer_id: customer.id,
      invoice_id: None,
      issue_date: today(),
      amount: dec!(100.00),
      currency: Currency::EUR,
      reason: CreditReason::Refund,
      description: "Returned goods".to_string(),
    })
    .await
    .unwrap();

  let refunded = ctx
    .payments
    .refund_credit_note(credit_note.id, dec!(60.00))
    .await
    .unwrap();
  assert_eq!(refunded.refunded_amount, dec!(60.00));
  assert_eq!(refunded.remaining_amount(), dec!(40.00));

  let err = ctx
    .payments
    .refund_credit_note(credit_note.id, dec!(50.00))
    .await
    .unwrap_err();
  assert!(matches!(err, PaymentError::CreditExhausted { .. }));
}
