//! invoice-forms server
//!
//! Usage: `invoice-forms [config.yaml]`
//!
//! Without `database.url` (or `DATABASE_URL`) the server runs against an
//! in-memory store.

use anyhow::Result;
use invoice_forms::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args().nth(1);
    let config = AppConfig::load(config_path.as_deref())?;

    let cache = ViewCache::default();
    let builder = ServerBuilder::new()
        .with_view_cache(cache)
        .with_invoices_config(config.invoices.clone());

    match config.database.url {
        #[cfg(feature = "postgres")]
        Some(_) => {
            let store = PostgresInvoiceStore::connect(&config.database).await?;
            ensure_schema(store.pool()).await?;
            let shared = Arc::new(store);
            let result = builder
                .with_invoice_store(shared.clone())
                .with_customer_directory(shared.clone())
                .serve(&config.server.bind)
                .await;
            shared.close().await;
            result
        }
        #[cfg(not(feature = "postgres"))]
        Some(_) => {
            anyhow::bail!(
                "database.url is set but this binary was built without the `postgres` feature"
            )
        }
        None => {
            tracing::warn!("no database configured, using the in-memory store");
            let store = InMemoryInvoiceStore::new();
            let result = builder.with_store(store.clone()).serve(&config.server.bind).await;
            store.close().await;
            result
        }
    }
}
