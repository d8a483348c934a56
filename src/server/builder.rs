//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_health_routes, build_invoice_routes};
use crate::actions::InvoiceActions;
use crate::config::InvoicesConfig;
use crate::core::{CustomerDirectory, InvoiceStore, Revalidator, ViewCache};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for the invoice forms HTTP server
///
/// # Example
///
/// ```ignore
/// let store = InMemoryInvoiceStore::new();
/// let app = ServerBuilder::new()
///     .with_store(store)
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn InvoiceStore>>,
    customers: Option<Arc<dyn CustomerDirectory>>,
    revalidator: Option<Arc<dyn Revalidator>>,
    invoices: InvoicesConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            customers: None,
            revalidator: None,
            invoices: InvoicesConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set a store serving both invoices and customers (required)
    pub fn with_store<S>(mut self, store: S) -> Self
    where
        S: InvoiceStore + CustomerDirectory + 'static,
    {
        let store = Arc::new(store);
        self.store = Some(store.clone());
        self.customers = Some(store);
        self
    }

    /// Set an already shared invoice store
    pub fn with_invoice_store(mut self, store: Arc<dyn InvoiceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the customer directory used by the edit page data
    pub fn with_customer_directory(mut self, customers: Arc<dyn CustomerDirectory>) -> Self {
        self.customers = Some(customers);
        self
    }

    /// Use a specific view cache; a private one is created otherwise
    pub fn with_view_cache(mut self, cache: ViewCache) -> Self {
        self.revalidator = Some(Arc::new(cache));
        self
    }

    /// Use any revalidation capability
    pub fn with_revalidator(mut self, revalidator: Arc<dyn Revalidator>) -> Self {
        self.revalidator = Some(revalidator);
        self
    }

    pub fn with_invoices_config(mut self, config: InvoicesConfig) -> Self {
        self.invoices = config;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let store = self
            .store
            .ok_or_else(|| anyhow::anyhow!("InvoiceStore is required. Call .with_store()"))?;
        let customers = self.customers.ok_or_else(|| {
            anyhow::anyhow!("CustomerDirectory is required. Call .with_customer_directory()")
        })?;
        let revalidator = self
            .revalidator
            .unwrap_or_else(|| Arc::new(ViewCache::default()));

        let actions = InvoiceActions::with_config(store.clone(), revalidator, &self.invoices);
        let state = AppState {
            actions,
            store,
            customers,
        };

        let mut app = build_health_routes()
            .merge(build_invoice_routes(state, &self.invoices.list_path));

        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for a shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
