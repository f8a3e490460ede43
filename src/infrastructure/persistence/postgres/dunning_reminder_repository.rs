use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::billing::{
  DunningReminder, ReminderChannel, ReminderStatus, errors::BillingError,
  ports::DunningReminderRepository,
};

#[derive(Debug, FromRow)]
struct DunningReminderRow {
  id: Uuid,
  invoice_id: Uuid,
  channel: String,
  reminder_level: i32,
  sent_at: DateTime<Utc>,
  status: String,
  message: Option<String>,
  next_reminder_at: Option<DateTime<Utc>>,
  created_at: DateTime<Utc>,
}

impl TryFrom<DunningReminderRow> for DunningReminder {
  type Error = BillingError;

  fn try_from(row: DunningReminderRow) -> Result<Self, Self::Error> {
    let channel = ReminderChannel::from_str(&row.channel)?;
    let status = ReminderStatus::from_str(&row.status)?;

    Ok(DunningReminder {
      id: row.id,
      invoice_id: row.invoice_id,
      channel,
      reminder_level: row.reminder_level,
      sent_at: row.sent_at,
      status,
      message: row.message,
      next_reminder_at: row.next_reminder_at,
      created_at: row.created_at,
    })
  }
}

pub struct PostgresDunningReminderRepository {
  pool: PgPool,
}

impl PostgresDunningReminderRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl DunningReminderRepository for PostgresDunningReminderRepository {
  async fn create(&self, reminder: DunningReminder) -> Result<DunningReminder, BillingError> {
    let row = sqlx::query_as::<_, DunningReminderRow>(
      r#"
            INSERT INTO dunning_reminders (
                id, invoice_id, channel, reminder_level, sent_at,
                status, message, next_reminder_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, invoice_id, channel, reminder_level, sent_at,
                      status, message, next_reminder_at, created_at
            "#,
    )
    .bind(reminder.id)
    .bind(reminder.invoice_id)
    .bind(reminder.channel.as_str())
    .bind(reminder.reminder_level)
    .bind(reminder.sent_at)
    .bind(reminder.status.as_str())
    .bind(reminder.message)
    .bind(reminder.next_reminder_at)
    .bind(reminder.created_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_invoice_id(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<DunningReminder>, BillingError> {
    let rows = sqlx::query_as::<_, DunningReminderRow>(
      r#"
            SELECT id, invoice_id, channel, reminder_level, sent_at,
                   status, message, next_reminder_at, created_at
            FROM dunning_reminders
            WHERE invoice_id = $1
            ORDER BY reminder_level ASC
            "#,
    )
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}
