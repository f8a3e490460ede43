pub mod change_invoice_status;
pub mod create_customer;
pub mod create_invoice;
pub mod create_product;
pub mod delete_customer;
pub mod delete_invoice;
pub mod delete_product;
pub mod get_customer;
pub mod get_dashboard;
pub mod get_invoice_details;
pub mod get_product;
pub mod list_customers;
pub mod list_invoices;
pub mod list_products;
pub mod record_reminder;
pub mod update_customer;
pub mod update_invoice;
pub mod update_product;

pub use change_invoice_status::{
  ChangeInvoiceStatusCommand, ChangeInvoiceStatusResponse, ChangeInvoiceStatusUseCase,
};
pub use create_customer::{CreateCustomerCommand, CreateCustomerResponse, CreateCustomerUseCase};
pub use create_invoice::{
  CreateInvoiceCommand, CreateInvoiceResponse, CreateInvoiceUseCase, InvoiceLineItemDto,
};
pub use create_product::{CreateProductCommand, CreateProductResponse, CreateProductUseCase};
pub use delete_customer::{DeleteCustomerCommand, DeleteCustomerUseCase};
pub use delete_invoice::{DeleteInvoiceCommand, DeleteInvoiceUseCase};
pub use delete_product::{DeleteProductCommand, DeleteProductUseCase};
pub use get_customer::{CustomerStatsDto, GetCustomerCommand, GetCustomerResponse, GetCustomerUseCase};
pub use get_dashboard::{DashboardResponse, GetDashboardUseCase};
pub use get_invoice_details::{
  GetInvoiceDetailsCommand, InvoiceDetailsResponse, InvoiceDto, InvoiceItemDto,
  GetInvoiceDetailsUseCase,
};
pub use get_product::{GetProductCommand, GetProductResponse, GetProductUseCase, ProductStatsDto};
pub use list_customers::{CustomerDto, ListCustomersResponse, ListCustomersUseCase};
pub use list_invoices::{ListInvoicesCommand, ListInvoicesResponse, ListInvoicesUseCase};
pub use list_products::{ListProductsResponse, ListProductsUseCase, ProductDto};
pub use record_reminder::{RecordReminderCommand, RecordReminderResponse, RecordReminderUseCase};
pub use update_customer::{UpdateCustomerCommand, UpdateCustomerResponse, UpdateCustomerUseCase};
pub use update_invoice::{UpdateInvoiceCommand, UpdateInvoiceResponse, UpdateInvoiceUseCase};
pub use update_product::{UpdateProductCommand, UpdateProductResponse, UpdateProductUseCase};
