use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{AllocatePaymentRequest, ChangePaymentStatusRequest, RecordPaymentRequest},
  errors::ApiError,
};
use crate::application::payments::{
  AllocatePaymentCommand, AllocatePaymentUseCase, ChangePaymentStatusCommand,
  ChangePaymentStatusUseCase, GetPaymentDetailsCommand, GetPaymentDetailsUseCase,
  ListPaymentsCommand, ListPaymentsUseCase, RecordPaymentCommand, RecordPaymentUseCase,
};

/// POST /api/v1/payments
pub async fn record_payment_handler(
  request: web::Json<RecordPaymentRequest>,
  use_case: web::Data<Arc<RecordPaymentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let response = use_case
    .execute(RecordPaymentCommand {
      customer_id: request.customer_id,
      amount: request.amount,
      currency: request.currency,
      method: request.method,
      payment_date: request.payment_date,
      notes: request.notes,
    })
    .await?;
  Ok(HttpResponse::Created().json(response))
}

/// GET /api/v1/payments?customer_id=...
pub async fn list_payments_handler(
  query: web::Query<ListPaymentsCommand>,
  use_case: web::Data<Arc<ListPaymentsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute(query.into_inner()).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/payments/{payment_id}
pub async fn get_payment_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetPaymentDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(GetPaymentDetailsCommand {
      payment_id: path.into_inner(),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/v1/payments/{payment_id}/status
pub async fn change_payment_status_handler(
  path: web::Path<Uuid>,
  request: web::Json<ChangePaymentStatusRequest>,
  use_case: web::Data<Arc<ChangePaymentStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case
    .execute(ChangePaymentStatusCommand {
      payment_id: path.into_inner(),
      new_status: request.into_inner().status,
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/v1/payments/{payment_id}/allocations
pub async fn allocate_payment_handler(
  path: web::Path<Uuid>,
  request: web::Json<AllocatePaymentRequest>,
  use_case: web::Data<Arc<AllocatePaymentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let response = use_case
    .execute(AllocatePaymentCommand {
      payment_id: path.into_inner(),
      invoice_id: request.invoice_id,
      amount: request.amount,
    })
    .await?;
  Ok(HttpResponse::Created().json(response))
}
