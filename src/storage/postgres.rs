//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresInvoiceStore`, an [`InvoiceStore`] and
//! [`CustomerDirectory`] backed by a PostgreSQL database via `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! invoice-forms = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! - `customers (id UUID, name, email, image_url)`
//! - `invoices (id UUID, customer_id TEXT, amount BIGINT, status VARCHAR, date DATE)`
//!
//! Invoice ids arrive as the raw strings posted by the forms and are parsed
//! before any statement runs; a malformed id is `InvalidIdentifier`, as in the
//! in-memory store. `customer_id` is an opaque reference stored as text.

use crate::config::DatabaseConfig;
use crate::core::{
    Cents, Customer, CustomerDirectory, Invoice, InvoiceChanges, InvoiceStatus, InvoiceStore,
    NewInvoice, StorageError, parse_invoice_id,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required tables (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StorageError> {
    // gen_random_uuid() is built in from PostgreSQL 13 on
    sqlx::query("CREATE EXTENSION IF NOT EXISTS pgcrypto")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            image_url VARCHAR(255) NOT NULL DEFAULT ''
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS invoices (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id TEXT NOT NULL,
            amount BIGINT NOT NULL,
            status VARCHAR(255) NOT NULL,
            date DATE NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

type InvoiceRow = (Uuid, String, i64, String, NaiveDate);

const SELECT_INVOICE: &str = "SELECT id, customer_id, amount, status, date FROM invoices";

fn row_to_invoice(
    (id, customer_id, amount, status, date): InvoiceRow,
) -> Result<Invoice, StorageError> {
    let status = status
        .parse::<InvoiceStatus>()
        .map_err(|message| StorageError::QueryError {
            backend: "PostgreSQL".to_string(),
            message: format!("invoice {}: {}", id, message),
        })?;

    Ok(Invoice {
        id,
        customer_id,
        amount: Cents(amount),
        status,
        date,
    })
}

// ---------------------------------------------------------------------------
// PostgresInvoiceStore
// ---------------------------------------------------------------------------

/// Invoice store backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// let store = PostgresInvoiceStore::connect(&config.database).await?;
/// ensure_schema(store.pool()).await?;
/// let id = store.insert(new_invoice).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresInvoiceStore {
    pool: PgPool,
}

impl PostgresInvoiceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| StorageError::ConnectionError {
                backend: "PostgreSQL".to_string(),
                message: "no database url configured".to_string(),
            })?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: "PostgreSQL".to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(max_connections = config.max_connections, "PostgreSQL pool ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<Uuid, StorageError> {
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO invoices (customer_id, amount, status, date) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&invoice.customer_id)
        .bind(invoice.amount.value())
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64, StorageError> {
        let id = parse_invoice_id(id)?;
        let result = sqlx::query(
            "UPDATE invoices \
             SET customer_id = $1, amount = $2, status = $3 \
             WHERE id = $4",
        )
        .bind(&changes.customer_id)
        .bind(changes.amount.value())
        .bind(changes.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> Result<u64, StorageError> {
        let id = parse_invoice_id(id)?;
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>, StorageError> {
        let id = parse_invoice_id(id)?;
        let sql = format!("{} WHERE id = $1", SELECT_INVOICE);
        let row = sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_invoice).transpose()
    }

    async fn list(&self) -> Result<Vec<Invoice>, StorageError> {
        let sql = format!("{} ORDER BY date DESC, id", SELECT_INVOICE);
        let rows = sqlx::query_as::<_, InvoiceRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(row_to_invoice).collect()
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}

#[async_trait]
impl CustomerDirectory for PostgresInvoiceStore {
    async fn customers(&self) -> Result<Vec<Customer>, StorageError> {
        let rows = sqlx::query_as::<_, (String, String, String, String)>(
            "SELECT id::text, name, email, image_url FROM customers ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, email, image_url)| Customer {
                id,
                name,
                email,
                image_url,
            })
            .collect())
    }
}
