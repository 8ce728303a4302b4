//! Dashboard server with the seed rooms, tenants and invoices
//!
//! ```text
//! cargo run --example dashboard -- [config.yaml]
//! RUST_LOG=rentdesk=debug,tower_http=debug cargo run --example dashboard
//! ```

use rentdesk::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rentdesk=info,tower_http=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::from_yaml_file(&path)?,
        None => DashboardConfig::default_config(),
    };

    // Walk the room page once so the startup log shows the seed state
    let mut rooms: Page<RoomForm> = Page::new(
        Collection::new(Room::seed()),
        config.number_format(),
        Arc::new(TracingNotifier),
    );
    rooms.set_status_filter(Some(RoomStatus::Available));
    for room in rooms.visible() {
        tracing::info!(code = %room.code, price = %format_number(room.price), "vacant room");
    }

    let addr = std::env::var("RENTDESK_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    tracing::info!(property = %config.property.name, "starting dashboard");
    tracing::info!("  GET    /rooms?q=&status=");
    tracing::info!("  POST   /rooms");
    tracing::info!("  PUT    /rooms/{{id}}");
    tracing::info!("  DELETE /rooms/{{id}}");
    tracing::info!("  (same for /tenants and /invoices)");
    tracing::info!("  POST   /invoices/{{id}}/pay");
    tracing::info!("  GET    /stats");
    tracing::info!("  GET    /settings");

    ServerBuilder::new()
        .with_config(config)
        .with_seed_data()
        .with_event_bus(1024)
        .serve(&addr)
        .await
}
