use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::billing::{
  Customer, CustomerName, CustomerStatus, errors::BillingError, ports::CustomerRepository,
};

#[derive(Debug, FromRow)]
struct CustomerRow {
  id: Uuid,
  name: String,
  email: String,
  phone: Option<String>,
  company: Option<String>,
  billing_address: Option<String>,
  shipping_address: Option<String>,
  tax_number: Option<String>,
  status: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
  type Error = BillingError;

  fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
    let name = CustomerName::new(row.name)?;
    let status = CustomerStatus::from_str(&row.status)?;

    Ok(Customer {
      id: row.id,
      name,
      email: row.email,
      phone: row.phone,
      company: row.company,
      billing_address: row.billing_address,
      shipping_address: row.shipping_address,
      tax_number: row.tax_number,
      status,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresCustomerRepository {
  pool: PgPool,
}

impl PostgresCustomerRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
  async fn create(&self, customer: Customer) -> Result<Customer, BillingError> {
    let row = sqlx::query_as::<_, CustomerRow>(
      r#"
            INSERT INTO customers (
                id, name, email, phone, company, billing_address,
                shipping_address, tax_number, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, name, email, phone, company, billing_address,
                      shipping_address, tax_number, status, created_at, updated_at
            "#,
    )
    .bind(customer.id)
    .bind(customer.name.value())
    .bind(customer.email)
    .bind(customer.phone)
    .bind(customer.company)
    .bind(customer.billing_address)
    .bind(customer.shipping_address)
    .bind(customer.tax_number)
    .bind(customer.status.as_str())
    .bind(customer.created_at)
    .bind(customer.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, customer: Customer) -> Result<Customer, BillingError> {
    let row = sqlx::query_as::<_, CustomerRow>(
      r#"
            UPDATE customers
            SET name = $2, email = $3, phone = $4, company = $5,
                billing_address = $6, shipping_address = $7, tax_number = $8,
                status = $9, updated_at = $10
            WHERE id = $1
            RETURNING id, name, email, phone, company, billing_address,
                      shipping_address, tax_number, status, created_at, updated_at
            "#,
    )
    .bind(customer.id)
    .bind(customer.name.value())
    .bind(customer.email)
    .bind(customer.phone)
    .bind(customer.company)
    .bind(customer.billing_address)
    .bind(customer.shipping_address)
    .bind(customer.tax_number)
    .bind(customer.status.as_str())
    .bind(customer.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, BillingError> {
    let row = sqlx::query_as::<_, CustomerRow>(
      r#"
            SELECT id, name, email, phone, company, billing_address,
                   shipping_address, tax_number, status, created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn list(&self) -> Result<Vec<Customer>, BillingError> {
    let rows = sqlx::query_as::<_, CustomerRow>(
      r#"
            SELECT id, name, email, phone, company, billing_address,
                   shipping_address, tax_number, status, created_at, updated_at
            FROM customers
            ORDER BY name ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn delete(&self, id: Uuid) -> Result<(), BillingError> {
    sqlx::query(
      r#"
      DELETE FROM customers
      WHERE id = $1
      "#,
    )
    .bind(id)
    .execute(&self.pool)
    .await?;

    Ok(())
  }
}
