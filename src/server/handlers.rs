//! HTTP handlers for the dashboard
//!
//! The CRUD handlers are generic over a [`Form`]: the form decides how a
//! request body is validated and turned into a record, and the record's
//! [`HostedEntity`] impl decides which service stores it. One set of
//! handlers therefore serves `/rooms`, `/tenants` and `/invoices`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use super::host::{DashboardHost, HostedEntity};
use crate::config::{DashboardConfig, SettingsSection};
use crate::core::error::{DeskError, EntityError, ValidationError};
use crate::core::events::{EntityEvent, EventEnvelope};
use crate::core::form::{Form, from_json, merge_json};
use crate::core::notify::Notice;
use crate::core::query::{SearchParams, parse_status_filter};
use crate::core::{Entity, Status};
use crate::entities::invoice::{self, Invoice, InvoiceStatus};
use crate::entities::stats::DashboardStats;

/// Shared handler state
pub type HostState = State<Arc<DashboardHost>>;

/// `GET /{plural}?q=&status=`
pub async fn list_records<F>(
    State(host): HostState,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, DeskError>
where
    F: Form,
    F::Record: HostedEntity,
{
    let status = parse_status_filter::<<F::Record as Entity>::Status>(params.status.as_deref())
        .map_err(|value| ValidationError::InvalidValue {
            field: "status".to_string(),
            value,
        })?;

    let records = <F::Record as HostedEntity>::service(&host)
        .search(params.query(), status)
        .await?;

    Ok(Json(json!({
        "data": records,
        "count": records.len(),
    })))
}

/// `GET /{plural}/{id}`
pub async fn get_record<F>(
    State(host): HostState,
    Path(id): Path<u64>,
) -> Result<Json<F::Record>, DeskError>
where
    F: Form,
    F::Record: HostedEntity,
{
    let record = <F::Record as HostedEntity>::service(&host)
        .get(id)
        .await?
        .ok_or_else(|| EntityError::not_found::<F::Record>(id))?;

    Ok(Json(record))
}

/// `POST /{plural}` with a form buffer as body
///
/// A body that does not fit the form is a 400 `INVALID_VALUE`, like a bad
/// `PUT` body.
pub async fn create_record<F>(
    State(host): HostState,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<F::Record>), DeskError>
where
    F: Form + DeserializeOwned,
    F::Record: HostedEntity,
{
    let form: F = from_json(body)?;
    let form = validated(&host, &form)?;
    let created = <F::Record as HostedEntity>::service(&host).create(form.build(None)).await?;

    host.publish(EntityEvent::Created {
        entity_type: <F::Record as Entity>::resource_name_singular().to_string(),
        entity_id: created.id(),
        data: serde_json::to_value(&created).unwrap_or(Value::Null),
    });
    host.notify(Notice::success(F::created_notice(&created)));

    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /{plural}/{id}` with a partial form buffer as body
///
/// The body is merged over the buffer an edit dialog would open with, so
/// omitted fields keep their current values.
pub async fn update_record<F>(
    State(host): HostState,
    Path(id): Path<u64>,
    Json(patch): Json<Value>,
) -> Result<Json<F::Record>, DeskError>
where
    F: Form + DeserializeOwned,
    F::Record: HostedEntity,
{
    let service = <F::Record as HostedEntity>::service(&host);
    let current = service
        .get(id)
        .await?
        .ok_or_else(|| EntityError::not_found::<F::Record>(id))?;

    let form: F = merge_json(&F::from_record(&current, &host.number_format()?), patch)?;
    let form = validated(&host, &form)?;

    let updated = service
        .update(id, form.build(Some(&current)))
        .await?
        .ok_or_else(|| EntityError::not_found::<F::Record>(id))?;

    host.publish(EntityEvent::Updated {
        entity_type: <F::Record as Entity>::resource_name_singular().to_string(),
        entity_id: id,
        data: serde_json::to_value(&updated).unwrap_or(Value::Null),
    });
    host.notify(Notice::success(F::updated_notice(&updated)));

    Ok(Json(updated))
}

/// `DELETE /{plural}/{id}`; deleting a missing id is not an error
pub async fn delete_record<F>(
    State(host): HostState,
    Path(id): Path<u64>,
) -> Result<StatusCode, DeskError>
where
    F: Form,
    F::Record: HostedEntity,
{
    let service = <F::Record as HostedEntity>::service(&host);
    let Some(record) = service.get(id).await? else {
        return Ok(StatusCode::NO_CONTENT);
    };

    if service.delete(id).await? {
        host.publish(EntityEvent::Deleted {
            entity_type: <F::Record as Entity>::resource_name_singular().to_string(),
            entity_id: id,
        });
        host.notify(Notice::success(F::deleted_notice(&record)));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /invoices/{id}/pay`
///
/// Paying an invoice that is already paid returns it unchanged.
pub async fn pay_invoice(
    State(host): HostState,
    Path(id): Path<u64>,
) -> Result<Json<Invoice>, DeskError> {
    let current = host
        .invoices
        .get(id)
        .await?
        .ok_or_else(|| EntityError::not_found::<Invoice>(id))?;

    if current.status == InvoiceStatus::Paid {
        return Ok(Json(current));
    }

    let paid = Invoice {
        status: InvoiceStatus::Paid,
        ..current
    };
    let paid = host
        .invoices
        .update(id, paid)
        .await?
        .ok_or_else(|| EntityError::not_found::<Invoice>(id))?;

    host.publish(EntityEvent::Updated {
        entity_type: Invoice::resource_name_singular().to_string(),
        entity_id: id,
        data: serde_json::to_value(&paid).unwrap_or(Value::Null),
    });
    host.notify(Notice::success(invoice::paid_notice(&paid)));

    Ok(Json(paid))
}

/// Number of activities `/stats` includes
pub const RECENT_ACTIVITY_COUNT: usize = 5;

/// Body of `GET /stats`
#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    #[serde(flatten)]
    pub stats: DashboardStats,
    /// Newest first
    pub recent_activities: Vec<EventEnvelope>,
}

/// `GET /stats`
pub async fn dashboard_stats(State(host): HostState) -> Result<Json<DashboardOverview>, DeskError> {
    let rooms = host.rooms.list().await?;
    let tenants = host.tenants.list().await?;
    let invoices = host.invoices.list().await?;
    let warning_days = host.config()?.billing.contract_warning_days;

    let stats = DashboardStats::compute(
        &rooms,
        &tenants,
        &invoices,
        Local::now().date_naive(),
        warning_days,
    );

    Ok(Json(DashboardOverview {
        stats,
        recent_activities: host.recent_activities(RECENT_ACTIVITY_COUNT),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityParams {
    pub limit: Option<usize>,
}

/// `GET /activities?limit=`: newest first, 20 by default
pub async fn list_activities(
    State(host): HostState,
    Query(params): Query<ActivityParams>,
) -> Json<Value> {
    let activities = host.recent_activities(params.limit.unwrap_or(20));

    Json(json!({
        "data": activities,
        "count": activities.len(),
    }))
}

/// `GET /settings`
pub async fn settings(State(host): HostState) -> Result<Json<DashboardConfig>, DeskError> {
    Ok(Json(host.config()?))
}

/// `PUT /settings/{section}` with the section's fields as body
pub async fn update_settings(
    State(host): HostState,
    Path(section): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<DashboardConfig>, DeskError> {
    let section = SettingsSection::parse(&section).ok_or_else(|| ValidationError::InvalidValue {
        field: "section".to_string(),
        value: section.clone(),
    })?;

    Ok(Json(host.update_settings(section, patch)?))
}

/// `GET /statuses/{plural}`: wire names and labels for the status tabs
pub async fn status_options<F>() -> Json<Value>
where
    F: Form,
{
    let options: Vec<Value> = <<F::Record as Entity>::Status as Status>::variants()
        .iter()
        .map(|status| json!({ "value": status.as_str(), "label": status.label() }))
        .collect();

    Json(json!({ "data": options }))
}

/// Health check
pub async fn health_check() -> Response {
    Json(json!({
        "status": "ok",
        "service": "rentdesk"
    }))
    .into_response()
}

fn validated<F: Form>(host: &DashboardHost, form: &F) -> Result<F, ValidationError> {
    form.validate().inspect_err(|err| {
        let entity = <F::Record as Entity>::resource_name_singular();
        tracing::warn!(entity, error = %err, "submit rejected");
        host.notify(Notice::error(err.message()));
    })
}
