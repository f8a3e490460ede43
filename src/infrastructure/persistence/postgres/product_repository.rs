use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::billing::{
  Amount, Percentage, Product, ProductKind, ProductName,
  errors::BillingError,
  ports::{ProductRepository, ProductStats},
};

#[derive(Debug, FromRow)]
struct ProductRow {
  id: Uuid,
  name: String,
  description: Option<String>,
  sku: Option<String>,
  price: Decimal,
  tax_rate: Decimal,
  kind: String,
  is_active: bool,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
  type Error = BillingError;

  fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
    let name = ProductName::new(row.name)?;
    let price = Amount::new(row.price)?;
    let tax_rate = Percentage::new(row.tax_rate)?;
    let kind = ProductKind::from_str(&row.kind)?;

    Ok(Product {
      id: row.id,
      name,
      description: row.description,
      sku: row.sku,
      price,
      tax_rate,
      kind,
      is_active: row.is_active,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct ProductStatsRow {
  times_sold: i64,
  total_revenue: Option<Decimal>,
}

pub struct PostgresProductRepository {
  pool: PgPool,
}

impl PostgresProductRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
  async fn create(&self, product: Product) -> Result<Product, BillingError> {
    let row = sqlx::query_as::<_, ProductRow>(
      r#"
            INSERT INTO products (
                id, name, description, sku, price, tax_rate,
                kind, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, description, sku, price, tax_rate,
                      kind, is_active, created_at, updated_at
            "#,
    )
    .bind(product.id)
    .bind(product.name.value())
    .bind(product.description)
    .bind(product.sku)
    .bind(product.price.value())
    .bind(product.tax_rate.value())
    .bind(product.kind.as_str())
    .bind(product.is_active)
    .bind(product.created_at)
    .bind(product.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, product: Product) -> Result<Product, BillingError> {
    let row = sqlx::query_as::<_, ProductRow>(
      r#"
            UPDATE products
            SET name = $2, description = $3, sku = $4, price = $5,
                tax_rate = $6, kind = $7, is_active = $8, updated_at = $9
            WHERE id = $1
            RETURNING id, name, description, sku, price, tax_rate,
                      kind, is_active, created_at, updated_at
            "#,
    )
    .bind(product.id)
    .bind(product.name.value())
    .bind(product.description)
    .bind(product.sku)
    .bind(product.price.value())
    .bind(product.tax_rate.value())
    .bind(product.kind.as_str())
    .bind(product.is_active)
    .bind(product.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, BillingError> {
    let row = sqlx::query_as::<_, ProductRow>(
      r#"
            SELECT id, name, description, sku, price, tax_rate,
                   kind, is_active, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn list(&self) -> Result<Vec<Product>, BillingError> {
    let rows = sqlx::query_as::<_, ProductRow>(
      r#"
            SELECT id, name, description, sku, price, tax_rate,
                   kind, is_active, created_at, updated_at
            FROM products
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
      DELETE FROM products
      WHERE id = $1
      "#,
    )
    .bind(id)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  async fn is_referenced(&self, product_id: Uuid) -> Result<bool, BillingError> {
    let exists: (bool,) = sqlx::query_as(
      r#"
            SELECT EXISTS(
                SELECT 1 FROM invoice_items WHERE product_id = $1
            )
            "#,
    )
    .bind(product_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(exists.0)
  }

  async fn stats_for(&self, product_id: Uuid) -> Result<ProductStats, BillingError> {
    let row = sqlx::query_as::<_, ProductStatsRow>(
      r#"
            SELECT COUNT(*) AS times_sold,
                   SUM(line_total) AS total_revenue
            FROM invoice_items
            WHERE product_id = $1
            "#,
    )
    .bind(product_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(ProductStats {
      times_sold: row.times_sold,
      total_revenue: row.total_revenue.unwrap_or(Decimal::ZERO),
    })
  }
}
