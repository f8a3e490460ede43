use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ChangeInvoiceStatusRequest, InvoiceRequest, RecordReminderRequest, SuccessResponse},
  errors::ApiError,
};
use crate::application::billing::{
  ChangeInvoiceStatusCommand, ChangeInvoiceStatusUseCase, CreateInvoiceCommand,
  CreateInvoiceUseCase, DeleteInvoiceCommand, DeleteInvoiceUseCase, GetInvoiceDetailsCommand,
  GetInvoiceDetailsUseCase, InvoiceLineItemDto, ListInvoicesCommand, ListInvoicesUseCase,
  RecordReminderCommand, RecordReminderUseCase, UpdateInvoiceCommand, UpdateInvoiceUseCase,
};

fn to_command(request: InvoiceRequest) -> CreateInvoiceCommand {
  CreateInvoiceCommand {
    customer_id: request.customer_id,
    issue_date: request.issue_date,
    due_date: request.due_date,
    currency: request.currency,
    notes: request.notes,
    items: request
      .items
      .into_iter()
      .map(|item| InvoiceLineItemDto {
        product_id: item.product_id,
        description: item.description,
        quantity: item.quantity,
        unit_price: item.unit_price,
        tax_rate: item.tax_rate,
        discount_rate: item.discount_rate,
      })
      .collect(),
  }
}

/// POST /api/v1/invoices
pub async fn create_invoice_handler(
  request: web::Json<InvoiceRequest>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case.execute(to_command(request.into_inner())).await?;
  Ok(HttpResponse::Created().json(response))
}

/// GET /api/v1/invoices?status=...&customer_id=...
pub async fn list_invoices_handler(
  query: web::Query<ListInvoicesCommand>,
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute(query.into_inner()).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/invoices/{invoice_id}
pub async fn get_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(GetInvoiceDetailsCommand {
      invoice_id: path.into_inner(),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// PUT /api/v1/invoices/{invoice_id}
pub async fn update_invoice_handler(
  path: web::Path<Uuid>,
  request: web::Json<InvoiceRequest>,
  use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case
    .execute(UpdateInvoiceCommand {
      invoice_id: path.into_inner(),
      details: to_command(request.into_inner()),
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/v1/invoices/{invoice_id}
pub async fn delete_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(DeleteInvoiceCommand {
      invoice_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Invoice deleted".to_string(),
  }))
}

/// POST /api/v1/invoices/{invoice_id}/status
pub async fn change_invoice_status_handler(
  path: web::Path<Uuid>,
  request: web::Json<ChangeInvoiceStatusRequest>,
  use_case: web::Data<Arc<ChangeInvoiceStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case
    .execute(ChangeInvoiceStatusCommand {
      invoice_id: path.into_inner(),
      new_status: request.into_inner().status,
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/v1/invoices/{invoice_id}/reminders
pub async fn record_reminder_handler(
  path: web::Path<Uuid>,
  request: web::Json<RecordReminderRequest>,
  use_case: web::Data<Arc<RecordReminderUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let response = use_case
    .execute(RecordReminderCommand {
      invoice_id: path.into_inner(),
      channel: request.channel,
      reminder_level: request.reminder_level,
      message: request.message,
      next_reminder_at: request.next_reminder_at,
    })
    .await?;
  Ok(HttpResponse::Created().json(response))
}
