//! Router assembly for the dashboard REST API

use super::handlers::{
    create_record, dashboard_stats, delete_record, get_record, health_check, list_activities,
    list_records, pay_invoice, settings, status_options, update_record, update_settings,
};
use super::host::{DashboardHost, HostedEntity};
use crate::core::{Entity, Form};
use crate::entities::{InvoiceForm, RoomForm, TenantForm};
use axum::{
    Router,
    routing::{get, post, put},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// CRUD routes for the entity edited by `F`:
/// - GET    /{plural}           - List, with `q` and `status` filters
/// - POST   /{plural}           - Create from a form buffer
/// - GET    /{plural}/{id}      - Get one record
/// - PUT    /{plural}/{id}      - Merge a partial form buffer
/// - DELETE /{plural}/{id}      - Delete
/// - GET    /statuses/{plural}  - Status tab options
pub fn entity_routes<F>() -> Router<Arc<DashboardHost>>
where
    F: Form + DeserializeOwned,
    F::Record: HostedEntity,
{
    let plural = <F::Record as Entity>::resource_name();

    Router::new()
        .route(
            &format!("/{plural}"),
            get(list_records::<F>).post(create_record::<F>),
        )
        .route(
            &format!("/{plural}/{{id}}"),
            get(get_record::<F>)
                .put(update_record::<F>)
                .delete(delete_record::<F>),
        )
        .route(&format!("/statuses/{plural}"), get(status_options::<F>))
}

/// Build the full REST router from a host
///
/// Custom routes are merged last and share the HTTP tracing and CORS layers.
pub fn build_router(host: Arc<DashboardHost>, custom_routes: Vec<Router>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .merge(entity_routes::<RoomForm>())
        .merge(entity_routes::<TenantForm>())
        .merge(entity_routes::<InvoiceForm>())
        .route("/invoices/{id}/pay", post(pay_invoice))
        .route("/stats", get(dashboard_stats))
        .route("/activities", get(list_activities))
        .route("/settings", get(settings))
        .route("/settings/{section}", put(update_settings))
        .with_state(host);

    for custom_router in custom_routes {
        app = app.merge(custom_router);
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
