use actix_web::web;
use std::sync::Arc;

use crate::application::billing::{
  ChangeInvoiceStatusUseCase, CreateCustomerUseCase, CreateInvoiceUseCase, CreateProductUseCase,
  DeleteCustomerUseCase, DeleteInvoiceUseCase, DeleteProductUseCase, GetCustomerUseCase,
  GetDashboardUseCase, GetInvoiceDetailsUseCase, GetProductUseCase, ListCustomersUseCase,
  ListInvoicesUseCase, ListProductsUseCase, RecordReminderUseCase, UpdateCustomerUseCase,
  UpdateInvoiceUseCase, UpdateProductUseCase,
};
use crate::application::payments::{
  AllocatePaymentUseCase, ApplyCreditNoteUseCase, ChangePaymentStatusUseCase,
  CreateCreditNoteUseCase, GetPaymentDetailsUseCase, ListCreditNotesUseCase, ListPaymentsUseCase,
  RecordPaymentUseCase, RefundCreditNoteUseCase,
};

use super::handlers::credit_notes::{
  apply_credit_note_handler, create_credit_note_handler, list_credit_notes_handler,
  refund_credit_note_handler,
};
use super::handlers::customers::{
  create_customer_handler, delete_customer_handler, get_customer_handler, list_customers_handler,
  update_customer_handler,
};
use super::handlers::dashboard::get_dashboard_handler;
use super::handlers::invoices::{
  change_invoice_status_handler, create_invoice_handler, delete_invoice_handler,
  get_invoice_handler, list_invoices_handler, record_reminder_handler, update_invoice_handler,
};
use super::handlers::payments::{
  allocate_payment_handler, change_payment_status_handler, get_payment_handler,
  list_payments_handler, record_payment_handler,
};
use super::handlers::products::{
  create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
  update_product_handler,
};

/// Configure customer routes
///
/// Mounts all customer endpoints under the provided scope.
/// All routes are prefixed with the scope path (e.g., /api/v1/customers).
///
/// # Routes
///
/// - POST / - Create a new customer
/// - GET / - List all customers
/// - GET /{customer_id} - Get customer details with invoice statistics
/// - PUT /{customer_id} - Update a customer
/// - DELETE /{customer_id} - Delete a customer (rejected while invoices reference it)
pub fn configure_customer_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateCustomerUseCase>,
  list_use_case: Arc<ListCustomersUseCase>,
  get_use_case: Arc<GetCustomerUseCase>,
  update_use_case: Arc<UpdateCustomerUseCase>,
  delete_use_case: Arc<DeleteCustomerUseCase>,
) {
  // Store use cases in app data so handlers can access them
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    // Configure routes
    .route("", web::post().to(create_customer_handler))
    .route("", web::get().to(list_customers_handler))
    .route("/{customer_id}", web::get().to(get_customer_handler))
    .route("/{customer_id}", web::put().to(update_customer_handler))
    .route("/{customer_id}", web::delete().to(delete_customer_handler));
}

/// Configure product routes
///
/// # Routes
///
/// - POST / - Create a new product
/// - GET / - List all products
/// - GET /{product_id} - Get product details with sales statistics
/// - PUT /{product_id} - Update a product
/// - DELETE /{product_id} - Delete a product (rejected while invoice items reference it)
pub fn configure_product_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateProductUseCase>,
  list_use_case: Arc<ListProductsUseCase>,
  get_use_case: Arc<GetProductUseCase>,
  update_use_case: Arc<UpdateProductUseCase>,
  delete_use_case: Arc<DeleteProductUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    .route("", web::post().to(create_product_handler))
    .route("", web::get().to(list_products_handler))
    .route("/{product_id}", web::get().to(get_product_handler))
    .route("/{product_id}", web::put().to(update_product_handler))
    .route("/{product_id}", web::delete().to(delete_product_handler));
}

/// Configure invoice routes
///
/// # Routes
///
/// - POST / - Create a draft invoice with line items
/// - GET / - List invoices, filterable by status or customer
/// - GET /{invoice_id} - Get invoice details with items, customer and reminders
/// - PUT /{invoice_id} - Replace a draft invoice's details and items
/// - DELETE /{invoice_id} - Delete a draft or cancelled invoice
/// - POST /{invoice_id}/status - Issue, cancel or mark an invoice overdue
/// - POST /{invoice_id}/reminders - Record a dunning reminder for an overdue invoice
pub fn configure_invoice_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateInvoiceUseCase>,
  list_use_case: Arc<ListInvoicesUseCase>,
  get_use_case: Arc<GetInvoiceDetailsUseCase>,
  update_use_case: Arc<UpdateInvoiceUseCase>,
  delete_use_case: Arc<DeleteInvoiceUseCase>,
  change_status_use_case: Arc<ChangeInvoiceStatusUseCase>,
  record_reminder_use_case: Arc<RecordReminderUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    .app_data(web::Data::new(change_status_use_case))
    .app_data(web::Data::new(record_reminder_use_case))
    .route("", web::post().to(create_invoice_handler))
    .route("", web::get().to(list_invoices_handler))
    .route("/{invoice_id}", web::get().to(get_invoice_handler))
    .route("/{invoice_id}", web::put().to(update_invoice_handler))
    .route("/{invoice_id}", web::delete().to(delete_invoice_handler))
    .route(
      "/{invoice_id}/status",
      web::post().to(change_invoice_status_handler),
    )
    .route(
      "/{invoice_id}/reminders",
      web::post().to(record_reminder_handler),
    );
}

/// Configure payment routes
///
/// # Routes
///
/// - POST / - Record a payment
/// - GET / - List payments, filterable by customer
/// - GET /{payment_id} - Get payment details with allocations
/// - POST /{payment_id}/status - Change a payment's status
/// - POST /{payment_id}/allocations - Allocate part of a payment to an invoice
pub fn configure_payment_routes(
  cfg: &mut web::ServiceConfig,
  record_use_case: Arc<RecordPaymentUseCase>,
  list_use_case: Arc<ListPaymentsUseCase>,
  get_use_case: Arc<GetPaymentDetailsUseCase>,
  change_status_use_case: Arc<ChangePaymentStatusUseCase>,
  allocate_use_case: Arc<AllocatePaymentUseCase>,
) {
  cfg
    .app_data(web::Data::new(record_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(change_status_use_case))
    .app_data(web::Data::new(allocate_use_case))
    .route("", web::post().to(record_payment_handler))
    .route("", web::get().to(list_payments_handler))
    .route("/{payment_id}", web::get().to(get_payment_handler))
    .route(
      "/{payment_id}/status",
      web::post().to(change_payment_status_handler),
    )
    .route(
      "/{payment_id}/allocations",
      web::post().to(allocate_payment_handler),
    );
}

/// Configure credit note routes
///
/// # Routes
///
/// - POST / - Create a credit note
/// - GET / - List credit notes
/// - POST /{credit_note_id}/apply - Apply credit against the linked invoice
/// - POST /{credit_note_id}/refund - Refund part of the remaining credit
pub fn configure_credit_note_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateCreditNoteUseCase>,
  list_use_case: Arc<ListCreditNotesUseCase>,
  apply_use_case: Arc<ApplyCreditNoteUseCase>,
  refund_use_case: Arc<RefundCreditNoteUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(apply_use_case))
    .app_data(web::Data::new(refund_use_case))
    .route("", web::post().to(create_credit_note_handler))
    .route("", web::get().to(list_credit_notes_handler))
    .route(
      "/{credit_note_id}/apply",
      web::post().to(apply_credit_note_handler),
    )
    .route(
      "/{credit_note_id}/refund",
      web::post().to(refund_credit_note_handler),
    );
}

/// Configure dashboard routes
pub fn configure_dashboard_routes(
  cfg: &mut web::ServiceConfig,
  dashboard_use_case: Arc<GetDashboardUseCase>,
) {
  cfg
    .app_data(web::Data::new(dashboard_use_case))
    .route("", web::get().to(get_dashboard_handler));
}
