pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use dtos::{ErrorResponse, SuccessResponse};
pub use errors::ApiError;
pub use routes::{
  configure_credit_note_routes, configure_customer_routes, configure_dashboard_routes,
  configure_invoice_routes, configure_payment_routes, configure_product_routes,
};
