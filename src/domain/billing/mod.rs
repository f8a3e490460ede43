pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{
  Customer, CustomerDetails, DunningReminder, Invoice, InvoiceItem, InvoiceTotals, Product,
  ProductDetails,
};
pub use errors::BillingError;
pub use ports::{
  CustomerRepository, CustomerStats, DashboardSummary, DunningReminderRepository, InvoiceFilter,
  InvoiceListStats, InvoiceRepository, MonthlyRevenue, PaymentMethodBreakdown, ProductRepository,
  ProductStats, ReportingRepository,
};
pub use services::{BillingService, BillingServiceDependencies, InvoiceData, LineItemInput};
pub use value_objects::{
  Amount, Currency, CustomerName, CustomerStatus, InvoiceNumber, InvoiceStatus,
  LineItemDescription, Percentage, ProductKind, ProductName, Quantity, ReminderChannel,
  ReminderStatus, ValueObjectError, round_money,
};
