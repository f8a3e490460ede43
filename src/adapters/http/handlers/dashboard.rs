use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::errors::ApiError;
use crate::application::billing::GetDashboardUseCase;

/// GET /api/v1/dashboard
pub async fn get_dashboard_handler(
  use_case: web::Data<Arc<GetDashboardUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(response))
}
