use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

use ledgerly::domain::billing::{
  BillingError, BillingService, BillingServiceDependencies, Customer, CustomerDetails,
  CustomerName, CustomerRepository, CustomerStats, CustomerStatus, DunningReminder,
  DunningReminderRepository, Invoice, InvoiceFilter, InvoiceItem, InvoiceListStats,
  InvoiceNumber, InvoiceRepository, Product, ProductRepository, ProductStats,
};
use ledgerly::domain::payments::{
  CreditNote, CreditNoteNumber, CreditNoteRepository, Payment, PaymentAllocation,
  PaymentAllocationRepository, PaymentError, PaymentReference, PaymentRepository, PaymentService,
  PaymentServiceDependencies,
};

#[derive(Default)]
pub struct InMemoryCustomerRepository {
  customers: Mutex<HashMap<Uuid, Customer>>,
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
  async fn create(&self, customer: Customer) -> Result<Customer, BillingError> {
    let mut customers = self.customers.lock().unwrap();
    customers.insert(customer.id, customer.clone());
    Ok(customer)
  }

  async fn update(&self, customer: Customer) -> Result<Customer, BillingError> {
    let mut customers = self.customers.lock().unwrap();
    customers.insert(customer.id, customer.clone());
    Ok(customer)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, BillingError> {
    Ok(self.customers.lock().unwrap().get(&id).cloned())
  }

  async fn list(&self) -> Result<Vec<Customer>, BillingError> {
    Ok(self.customers.lock().unwrap().values().cloned().collect())
  }

  async fn delete(&self, id: Uuid) -> Result<(), BillingError> {
    self.customers.lock().unwrap().remove(&id);
    Ok(())
  }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
  products: Mutex<HashMap<Uuid, Product>>,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
  async fn create(&self, product: Product) -> Result<Product, BillingError> {
    let mut products = self.products.lock().unwrap();
    products.insert(product.id, product.clone());
    Ok(product)
  }

  async fn update(&self, product: Product) -> Result<Product, BillingError> {
    let mut products = self.products.lock().unwrap();
    products.insert(product.id, product.clone());
    Ok(product)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, BillingError> {
    Ok(self.products.lock().unwrap().get(&id).cloned())
  }

  async fn list(&self) -> Result<Vec<Product>, BillingError> {
    Ok(self.products.lock().unwrap().values().cloned().collect())
  }

  async fn delete(&self, id: Uuid) -> Result<(), BillingError> {
    self.products.lock().unwrap().remove(&id);
    Ok(())
  }

  async fn is_referenced(&self, _product_id: Uuid) -> Result<bool, BillingError> {
    Ok(false)
  }

  async fn stats_for(&self, _product_id: Uuid) -> Result<ProductStats, BillingError> {
    Ok(ProductStats {
      times_sold: 0,
      total_revenue: Decimal::ZERO,
    })
  }
}

#[derive(Default)]
pub struct InMemoryInvoiceRepository {
  invoices: Mutex<HashMap<Uuid, Invoice>>,
  items: Mutex<HashMap<Uuid, Vec<InvoiceItem>>>,
  sequence: AtomicI64,
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
  async fn next_invoice_number(&self) -> Result<InvoiceNumber, BillingError> {
    let value = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
    Ok(InvoiceNumber::from_sequence(value))
  }

  async fn create_with_items(
    &self,
    invoice: Invoice,
    items: Vec<InvoiceItem>,
  ) -> Result<(Invoice, Vec<InvoiceItem>), BillingError> {
    self
      .invoices
      .lock()
      .unwrap()
      .insert(invoice.id, invoice.clone());
    self.items.lock().unwrap().insert(invoice.id, items.clone());
    Ok((invoice, items))
  }

  async fn update_with_items(
    &self,
    invoice: Invoice,
    items: Vec<InvoiceItem>,
  ) -> Result<(Invoice, Vec<InvoiceItem>), BillingError> {
    self.create_with_items(invoice, items).await
  }

  async fn update(&self, invoice: Invoice) -> Result<Invoice, BillingError> {
    self
      .invoices
      .lock()
      .unwrap()
      .insert(invoice.id, invoice.clone());
    Ok(invoice)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, BillingError> {
    Ok(self.invoices.lock().unwrap().get(&id).cloned())
  }

  async fn find_items(&self, invoice_id: Uuid) -> Result<Vec<InvoiceItem>, BillingError> {
    Ok(
      self
        .items
        .lock()
        .unwrap()
        .get(&invoice_id)
        .cloned()
        .unwrap_or_default(),
    )
  }

  async fn list(&self, filter: InvoiceFilter) -> Result<Vec<Invoice>, BillingError> {
    let invoices = self.invoices.lock().unwrap();
    let filtered = invoices
      .values()
      .filter(|invoice| match (filter.status, filter.customer_id) {
        (Some(status), _) => invoice.status == status,
        (None, Some(customer_id)) => invoice.customer_id == customer_id,
        (None, None) => true,
      })
      .cloned()
      .collect();
    Ok(filtered)
  }

  async fn delete(&self, id: Uuid) -> Result<(), BillingError> {
    self.invoices.lock().unwrap().remove(&id);
    self.items.lock().unwrap().remove(&id);
    Ok(())
  }

  async fn exists_for_customer(&self, customer_id: Uuid) -> Result<bool, BillingError> {
    Ok(
      self
        .invoices
        .lock()
        .unwrap()
        .values()
        .any(|invoice| invoice.customer_id == customer_id),
    )
  }

  async fn list_stats(&self) -> Result<InvoiceListStats, BillingError> {
    let invoices = self.invoices.lock().unwrap();
    Ok(InvoiceListStats {
      total_invoices: invoices.len() as i64,
      total_amount: invoices.values().map(|i| i.total_amount).sum(),
      outstanding_amount: invoices
        .values()
        .filter(|i| i.status.is_payable())
        .map(|i| i.balance_due)
        .sum(),
      overdue_count: 0,
    })
  }

  async fn stats_for_customer(&self, customer_id: Uuid) -> Result<CustomerStats, BillingError> {
    let invoices = self.invoices.lock().unwrap();
    let for_customer: Vec<_> = invoices
      .values()
      .filter(|i| i.customer_id == customer_id)
      .collect();
    Ok(CustomerStats {
      invoice_count: for_customer.len() as i64,
      total_invoiced: for_customer.iter().map(|i| i.total_amount).sum(),
      total_paid: for_customer.iter().map(|i| i.paid_amount).sum(),
      outstanding_balance: for_customer.iter().map(|i| i.balance_due).sum(),
    })
  }
}

#[derive(Default)]
pub struct InMemoryDunningReminderRepository {
  reminders: Mutex<Vec<DunningReminder>>,
}

#[async_trait]
impl DunningReminderRepository for InMemoryDunningReminderRepository {
  async fn create(&self, reminder: DunningReminder) -> Result<DunningReminder, BillingError> {
    self.reminders.lock().unwrap().push(reminder.clone());
    Ok(reminder)
  }

  async fn find_by_invoice_id(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<DunningReminder>, BillingError> {
    Ok(
      self
        .reminders
        .lock()
        .unwrap()
        .iter()
        .filter(|r| r.invoice_id == invoice_id)
        .cloned()
        .collect(),
    )
  }
}

#[derive(Default)]
pub struct InMemoryPaymentRepository {
  payments: Mutex<HashMap<Uuid, Payment>>,
  sequence: AtomicI64,
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
  async fn next_payment_reference(&self) -> Result<PaymentReference, PaymentError> {
    let value = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
    Ok(PaymentReference::from_sequence(value))
  }

  async fn create(&self, payment: Payment) -> Result<Payment, PaymentError> {
    let mut payments = self.payments.lock().unwrap();
    payments.insert(payment.id, payment.clone());
    Ok(payment)
  }

  async fn update(&self, payment: Payment) -> Result<Payment, PaymentError> {
    let mut payments = self.payments.lock().unwrap();
    payments.insert(payment.id, payment.clone());
    Ok(payment)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, PaymentError> {
    Ok(self.payments.lock().unwrap().get(&id).cloned())
  }

  async fn list(&self) -> Result<Vec<Payment>, PaymentError> {
    Ok(self.payments.lock().unwrap().values().cloned().collect())
  }

  async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Payment>, PaymentError> {
    Ok(
      self
        .payments
        .lock()
        .unwrap()
        .values()
        .filter(|p| p.customer_id == customer_id)
        .cloned()
        .collect(),
    )
  }
}

/// Allocation store that also settles the invoice, mirroring the single
/// transaction the real adapter uses.
pub struct InMemoryPaymentAllocationRepository {
  allocations: Mutex<Vec<PaymentAllocation>>,
  invoice_repo: Arc<InMemoryInvoiceRepository>,
}

impl InMemoryPaymentAllocationRepository {
  pub fn new(invoice_repo: Arc<InMemoryInvoiceRepository>) -> Self {
    Self {
      allocations: Mutex::new(Vec::new()),
      invoice_repo,
    }
  }
}

#[async_trait]
impl PaymentAllocationRepository for InMemoryPaymentAllocationRepository {
  async fn find_by_payment_id(
    &self,
    payment_id: Uuid,
  ) -> Result<Vec<PaymentAllocation>, PaymentError> {
    Ok(
      self
        .allocations
        .lock()
        .unwrap()
        .iter()
        .filter(|a| a.payment_id == payment_id)
        .cloned()
        .collect(),
    )
  }

  async fn find_by_invoice_id(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<PaymentAllocation>, PaymentError> {
    Ok(
      self
        .allocations
        .lock()
        .unwrap()
        .iter()
        .filter(|a| a.invoice_id == invoice_id)
        .cloned()
        .collect(),
    )
  }

  async fn record(
    &self,
    allocation: PaymentAllocation,
    invoice: &Invoice,
  ) -> Result<PaymentAllocation, PaymentError> {
    {
      let mut allocations = self.allocations.lock().unwrap();
      allocations.retain(|a| !(a.payment_id == allocation.payment_id && a.invoice_id == allocation.invoice_id));
      allocations.push(allocation.clone());
    }
    self.invoice_repo.update(invoice.clone()).await?;
    Ok(allocation)
  }
}

pub struct InMemoryCreditNoteRepository {
  credit_notes: Mutex<HashMap<Uuid, CreditNote>>,
  sequence: AtomicI64,
  invoice_repo: Arc<InMemoryInvoiceRepository>,
}

impl InMemoryCreditNoteRepository {
  pub fn new(invoice_repo: Arc<InMemoryInvoiceRepository>) -> Self {
    Self {
      credit_notes: Mutex::new(HashMap::new()),
      sequence: AtomicI64::new(0),
      invoice_repo,
    }
  }
}

#[async_trait]
impl CreditNoteRepository for InMemoryCreditNoteRepository {
  async fn next_credit_note_number(&self) -> Result<CreditNoteNumber, PaymentError> {
    let value = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
    Ok(CreditNoteNumber::from_sequence(value))
  }

  async fn create(&self, credit_note: CreditNote) -> Result<CreditNote, PaymentError> {
    let mut credit_notes = self.credit_notes.lock().unwrap();
    credit_notes.insert(credit_note.id, credit_note.clone());
    Ok(credit_note)
  }

  async fn update(&self, credit_note: CreditNote) -> Result<CreditNote, PaymentError> {
    let mut credit_notes = self.credit_notes.lock().unwrap();
    credit_notes.insert(credit_note.id, credit_note.clone());
    Ok(credit_note)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<CreditNote>, PaymentError> {
    Ok(self.credit_notes.lock().unwrap().get(&id).cloned())
  }

  async fn list(&self) -> Result<Vec<CreditNote>, PaymentError> {
    Ok(
      self
        .credit_notes
        .lock()
        .unwrap()
        .values()
        .cloned()
        .collect(),
    )
  }

  async fn apply(
    &self,
    credit_note: &CreditNote,
    invoice: &Invoice,
  ) -> Result<CreditNote, PaymentError> {
    self
      .credit_notes
      .lock()
      .unwrap()
      .insert(credit_note.id, credit_note.clone());
    self.invoice_repo.update(invoice.clone()).await?;
    Ok(credit_note.clone())
  }
}

/// A billing service and a payment service sharing the same in-memory stores.
pub struct TestContext {
  pub billing: BillingService,
  pub payments: PaymentService,
  pub customer_repo: Arc<InMemoryCustomerRepository>,
  pub invoice_repo: Arc<InMemoryInvoiceRepository>,
}

pub fn test_context() -> TestContext {
  let customer_repo = Arc::new(InMemoryCustomerRepository::default());
  let product_repo = Arc::new(InMemoryProductRepository::default());
  let invoice_repo = Arc::new(InMemoryInvoiceRepository::default());
  let reminder_repo = Arc::new(InMemoryDunningReminderRepository::default());
  let payment_repo = Arc::new(InMemoryPaymentRepository::default());
  let allocation_repo = Arc::new(InMemoryPaymentAllocationRepository::new(
    invoice_repo.clone(),
  ));
  let credit_note_repo = Arc::new(InMemoryCreditNoteRepository::new(invoice_repo.clone()));

  let billing = BillingService::new(BillingServiceDependencies {
    customer_repo: customer_repo.clone(),
    product_repo,
    invoice_repo: invoice_repo.clone(),
    reminder_repo,
  });

  let payments = PaymentService::new(PaymentServiceDependencies {
    payment_repo,
    allocation_repo,
    credit_note_repo,
    invoice_repo: invoice_repo.clone(),
    customer_repo: customer_repo.clone(),
  });

  TestContext {
    billing,
    payments,
    customer_repo,
    invoice_repo,
  }
}

pub fn customer_details(name: &str) -> CustomerDetails {
  CustomerDetails {
    name: CustomerName::new(name.to_string()).unwrap(),
    email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
    phone: None,
    company: None,
    billing_address: None,
    shipping_address: None,
    tax_number: None,
    status: CustomerStatus::Active,
  }
}

pub async fn seed_customer(ctx: &TestContext, name: &str) -> Customer {
  ctx
    .billing
    .create_customer(customer_details(name))
    .await
    .unwrap()
}

pub fn today() -> chrono::NaiveDate {
  Utc::now().date_naive()
}
