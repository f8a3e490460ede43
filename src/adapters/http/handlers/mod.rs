pub mod credit_notes;
pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod payments;
pub mod products;
