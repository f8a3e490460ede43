pub mod allocate_payment;
pub mod apply_credit_note;
pub mod change_payment_status;
pub mod create_credit_note;
pub mod get_payment_details;
pub mod list_credit_notes;
pub mod list_payments;
pub mod record_payment;
pub mod refund_credit_note;

pub use allocate_payment::{
  AllocatePaymentCommand, AllocatePaymentResponse, AllocatePaymentUseCase,
};
pub use apply_credit_note::{
  ApplyCreditNoteCommand, ApplyCreditNoteResponse, ApplyCreditNoteUseCase,
};
pub use change_payment_status::{
  ChangePaymentStatusCommand, ChangePaymentStatusResponse, ChangePaymentStatusUseCase,
};
pub use create_credit_note::{
  CreateCreditNoteCommand, CreateCreditNoteResponse, CreateCreditNoteUseCase,
};
pub use get_payment_details::{
  AllocationDto, GetPaymentDetailsCommand, PaymentDetailsResponse, GetPaymentDetailsUseCase,
};
pub use list_credit_notes::{CreditNoteDto, ListCreditNotesResponse, ListCreditNotesUseCase};
pub use list_payments::{ListPaymentsCommand, ListPaymentsResponse, ListPaymentsUseCase, PaymentDto};
pub use record_payment::{RecordPaymentCommand, RecordPaymentResponse, RecordPaymentUseCase};
pub use refund_credit_note::{
  RefundCreditNoteCommand, RefundCreditNoteResponse, RefundCreditNoteUseCase,
};
