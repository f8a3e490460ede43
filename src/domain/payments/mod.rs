pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{CreditNote, Payment, PaymentAllocation};
pub use errors::PaymentError;
pub use ports::{CreditNoteRepository, PaymentAllocationRepository, PaymentRepository};
pub use services::{CreditNoteData, PaymentData, PaymentService, PaymentServiceDependencies};
pub use value_objects::{
  CreditNoteNumber, CreditNoteStatus, CreditReason, PaymentMethod, PaymentReference, PaymentStatus,
};
