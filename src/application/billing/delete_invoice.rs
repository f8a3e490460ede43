use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService};

#[derive(Debug)]
pub struct DeleteInvoiceCommand {
  pub invoice_id: Uuid,
}

pub struct DeleteInvoiceUseCase {
  billing_service: Arc<BillingService>,
}

impl DeleteInvoiceUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(&self, command: DeleteInvoiceCommand) -> Result<(), BillingError> {
    self.billing_service.delete_invoice(command.invoice_id).await
  }
}
