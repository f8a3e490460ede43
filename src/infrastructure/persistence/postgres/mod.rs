pub mod credit_note_repository;
pub mod customer_repository;
pub mod dunning_reminder_repository;
pub mod invoice_repository;
pub mod payment_allocation_repository;
pub mod payment_repository;
pub mod product_repository;
pub mod reporting_repository;

pub use credit_note_repository::PostgresCreditNoteRepository;
pub use customer_repository::PostgresCustomerRepository;
pub use dunning_reminder_repository::PostgresDunningReminderRepository;
pub use invoice_repository::PostgresInvoiceRepository;
pub use payment_allocation_repository::PostgresPaymentAllocationRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use product_repository::PostgresProductRepository;
pub use reporting_repository::PostgresReportingRepository;
