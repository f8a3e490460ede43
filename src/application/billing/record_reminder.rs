use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService, ReminderChannel};

#[derive(Debug, Deserialize)]
pub struct RecordReminderCommand {
  pub invoice_id: Uuid,
  pub channel: String,
  pub reminder_level: i32,
  pub message: Option<String>,
  pub next_reminder_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct RecordReminderResponse {
  pub reminder_id: Uuid,
  pub reminder_level: i32,
  pub sent_at: DateTime<Utc>,
}

pub struct RecordReminderUseCase {
  billing_service: Arc<BillingService>,
}

impl RecordReminderUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: RecordReminderCommand,
  ) -> Result<RecordReminderResponse, BillingError> {
    let channel = ReminderChannel::from_str(&command.channel)?;
    let reminder = self
      .billing_service
      .record_reminder(
        command.invoice_id,
        channel,
        command.reminder_level,
        command.message,
        command.next_reminder_at,
      )
      .await?;

    Ok(RecordReminderResponse {
      reminder_id: reminder.id,
      reminder_level: reminder.reminder_level,
      sent_at: reminder.sent_at,
    })
  }
}
