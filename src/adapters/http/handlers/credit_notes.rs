use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{CreateCreditNoteRequest, CreditNoteAmountRequest},
  errors::ApiError,
};
use crate::application::payments::{
  ApplyCreditNoteCommand, ApplyCreditNoteUseCase, CreateCreditNoteCommand,
  CreateCreditNoteUseCase, ListCreditNotesUseCase, RefundCreditNoteCommand,
  RefundCreditNoteUseCase,
};

/// POST /api/v1/credit-notes
pub async fn create_credit_note_handler(
  request: web::Json<CreateCreditNoteRequest>,
  use_case: web::Data<Arc<CreateCreditNoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let response = use_case
    .execute(CreateCreditNoteCommand {
      customer_id: request.customer_id,
      invoice_id: request.invoice_id,
      issue_date: request.issue_date,
      amount: request.amount,
      currency: request.currency,
      reason: request.reason,
      description: request.description,
    })
    .await?;
  Ok(HttpResponse::Created().json(response))
}

/// GET /api/v1/credit-notes
pub async fn list_credit_notes_handler(
  use_case: web::Data<Arc<ListCreditNotesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/v1/credit-notes/{credit_note_id}/apply
pub async fn apply_credit_note_handler(
  path: web::Path<Uuid>,
  request: web::Json<CreditNoteAmountRequest>,
  use_case: web::Data<Arc<ApplyCreditNoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(ApplyCreditNoteCommand {
      credit_note_id: path.into_inner(),
      amount: request.into_inner().amount,
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/v1/credit-notes/{credit_note_id}/refund
pub async fn refund_credit_note_handler(
  path: web::Path<Uuid>,
  request: web::Json<CreditNoteAmountRequest>,
  use_case: web::Data<Arc<RefundCreditNoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(RefundCreditNoteCommand {
      credit_note_id: path.into_inner(),
      amount: request.into_inner().amount,
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}
