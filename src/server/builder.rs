//! ServerBuilder for fluent API to build the dashboard server

use super::host::DashboardHost;
use super::router::build_router;
use crate::config::DashboardConfig;
use crate::core::{DataService, Entity};
use crate::core::events::EventBus;
use crate::entities::{Invoice, Room, Tenant};
use crate::storage::InMemoryDataService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the dashboard HTTP server
///
/// Services that are not set explicitly fall back to in-memory ones, empty
/// or preloaded with the seed records when [`with_seed_data`](Self::with_seed_data)
/// is used.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(DashboardConfig::from_yaml_file("rentdesk.yaml")?)
///     .with_seed_data()
///     .with_event_bus(1024)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: Option<DashboardConfig>,
    rooms: Option<Arc<dyn DataService<Room>>>,
    tenants: Option<Arc<dyn DataService<Tenant>>>,
    invoices: Option<Arc<dyn DataService<Invoice>>>,
    seed: bool,
    custom_routes: Vec<Router>,
    event_bus: Option<EventBus>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: None,
            rooms: None,
            tenants: None,
            invoices: None,
            seed: false,
            custom_routes: Vec::new(),
            event_bus: None,
        }
    }

    /// Use these settings instead of the defaults
    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Preload default services with the seed rooms, tenants and invoices
    pub fn with_seed_data(mut self) -> Self {
        self.seed = true;
        self
    }

    pub fn with_room_service(mut self, service: impl DataService<Room> + 'static) -> Self {
        self.rooms = Some(Arc::new(service));
        self
    }

    pub fn with_tenant_service(mut self, service: impl DataService<Tenant> + 'static) -> Self {
        self.tenants = Some(Arc::new(service));
        self
    }

    pub fn with_invoice_service(mut self, service: impl DataService<Invoice> + 'static) -> Self {
        self.invoices = Some(Arc::new(service));
        self
    }

    /// Add custom routes to the server
    ///
    /// # Example
    ///
    /// ```ignore
    /// let reports = Router::new().route("/reports/monthly", get(monthly_report));
    ///
    /// ServerBuilder::new()
    ///     .with_custom_routes(reports)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Enable the event bus for real-time notifications
    ///
    /// When enabled, handlers publish an event for every mutation and every
    /// notice.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Buffer size for the broadcast channel (recommended: 1024)
    pub fn with_event_bus(mut self, capacity: usize) -> Self {
        self.event_bus = Some(EventBus::new(capacity));
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<DashboardHost> {
        let seed = self.seed;

        let rooms = self.rooms.take().unwrap_or_else(|| in_memory(seed, Room::seed));
        let tenants = self.tenants.take().unwrap_or_else(|| in_memory(seed, Tenant::seed));
        let invoices = self.invoices.take().unwrap_or_else(|| in_memory(seed, Invoice::seed));

        let config = self.config.take().unwrap_or_default();
        tracing::debug!(property = %config.property.name, seed, "building dashboard host");

        let mut host = DashboardHost::new(config, rooms, tenants, invoices);

        // Attach event bus if configured
        if let Some(event_bus) = self.event_bus.take() {
            host = host.with_event_bus(event_bus);
        }

        Ok(host)
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        Ok(build_router(host, custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_seed_data()
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
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

/// Default in-memory service, optionally filled by `seed_records`
fn in_memory<T: Entity>(seed: bool, seed_records: fn() -> Vec<T>) -> Arc<dyn DataService<T>> {
    let records = if seed { seed_records() } else { Vec::new() };
    Arc::new(InMemoryDataService::with_records(records))
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
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
