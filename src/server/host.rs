//! Server host holding the dashboard state
//!
//! The host is the single source of truth shared by every handler: the
//! settings, one [`DataService`] per entity type, the activity log and the
//! optional event bus. It knows nothing about HTTP; the router only borrows
//! it.

use crate::config::{DashboardConfig, SettingsSection};
use crate::core::error::DeskError;
use crate::core::events::{ActivityLog, DeskEvent, EntityEvent, EventBus, EventEnvelope};
use crate::core::notify::Notice;
use crate::core::{DataService, Entity, NumberFormat};
use crate::entities::{Invoice, Room, Tenant};
use anyhow::{Result, anyhow};
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, RwLock};

/// Host context containing all dashboard state
pub struct DashboardHost {
    /// Settings served by `/settings`, edited one section at a time
    config: RwLock<DashboardConfig>,

    pub rooms: Arc<dyn DataService<Room>>,

    pub tenants: Arc<dyn DataService<Tenant>>,

    pub invoices: Arc<dyn DataService<Invoice>>,

    /// Optional event bus for real-time notifications
    ///
    /// When present, handlers publish an event for every mutation and every
    /// notice.
    pub event_bus: Option<Arc<EventBus>>,

    /// Recent mutations and notices, newest last
    activities: ActivityLog,
}

impl DashboardHost {
    pub fn new(
        config: DashboardConfig,
        rooms: Arc<dyn DataService<Room>>,
        tenants: Arc<dyn DataService<Tenant>>,
        invoices: Arc<dyn DataService<Invoice>>,
    ) -> Self {
        Self {
            config: RwLock::new(config),
            rooms,
            tenants,
            invoices,
            event_bus: None,
            activities: ActivityLog::default(),
        }
    }

    /// Keep at most `capacity` recent events for the activity feed
    pub fn with_activity_capacity(mut self, capacity: usize) -> Self {
        self.activities = ActivityLog::new(capacity);
        self
    }

    /// Set the event bus for real-time notifications
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(Arc::new(event_bus));
        self
    }

    /// Get a reference to the event bus (if configured)
    pub fn event_bus(&self) -> Option<&Arc<EventBus>> {
        self.event_bus.as_ref()
    }

    /// The current settings
    pub fn config(&self) -> Result<DashboardConfig> {
        let config = self
            .config
            .read()
            .map_err(|e| anyhow!("Failed to acquire config read lock: {}", e))?;

        Ok(config.clone())
    }

    /// Merge `patch` into one section and return the saved settings.
    ///
    /// Emits the section's saved notice. A rejected patch leaves the settings
    /// untouched.
    pub fn update_settings(&self, section: SettingsSection, patch: Value) -> Result<DashboardConfig, DeskError> {
        let saved = {
            let mut config = self
                .config
                .write()
                .map_err(|e| anyhow!("Failed to acquire config write lock: {}", e))?;

            let next = config.with_section(section, patch)?;
            *config = next.clone();
            next
        };

        tracing::debug!(section = section.as_str(), "settings saved");
        self.notify(Notice::success(section.saved_notice()));
        Ok(saved)
    }

    /// Thousands grouping used when seeding edit buffers
    pub fn number_format(&self) -> Result<NumberFormat> {
        Ok(self.config()?.number_format())
    }

    /// The activity feed
    pub fn activities(&self) -> &ActivityLog {
        &self.activities
    }

    /// Up to `limit` recent events, newest first
    pub fn recent_activities(&self, limit: usize) -> Vec<EventEnvelope> {
        self.activities.recent(limit)
    }

    /// Log a notice, record it and forward it to the bus
    pub fn notify(&self, notice: Notice) {
        tracing::info!(level = ?notice.level, notice = %notice.message, "notice");
        self.emit(DeskEvent::Notice(notice));
    }

    /// Record a mutation event and forward it to the bus
    pub fn publish(&self, event: EntityEvent) {
        self.emit(DeskEvent::Entity(event));
    }

    fn emit(&self, event: DeskEvent) {
        let envelope = self.activities.record(event);
        if let Some(bus) = &self.event_bus {
            bus.forward(envelope);
        }
    }
}

/// An entity the host stores and exposes over HTTP
pub trait HostedEntity: Entity + Serialize {
    /// The service holding records of this type
    fn service(host: &DashboardHost) -> &Arc<dyn DataService<Self>>;
}

impl HostedEntity for Room {
    fn service(host: &DashboardHost) -> &Arc<dyn DataService<Self>> {
        &host.rooms
    }
}

impl HostedEntity for Tenant {
    fn service(host: &DashboardHost) -> &Arc<dyn DataService<Self>> {
        &host.tenants
    }
}

impl HostedEntity for Invoice {
    fn service(host: &DashboardHost) -> &Arc<dyn DataService<Self>> {
        &host.invoices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryDataService;

    fn make_host() -> DashboardHost {
        DashboardHost::new(
            DashboardConfig::default_config(),
            Arc::new(InMemoryDataService::with_records(Room::seed())),
            Arc::new(InMemoryDataService::<Tenant>::new()),
            Arc::new(InMemoryDataService::<Invoice>::new()),
        )
    }

    #[tokio::test]
    async fn test_service_lookup_by_entity() {
        let host = make_host();
        assert_eq!(Room::service(&host).list().await.unwrap().len(), 6);
        assert!(Tenant::service(&host).list().await.unwrap().is_empty());
    }

    #[test]
    fn test_host_without_event_bus_still_records() {
        let host = make_host();
        assert!(host.event_bus().is_none());

        host.notify(Notice::success("Đã thêm phòng P301"));

        let recent = host.recent_activities(5);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].event.action(), "notice");
    }

    #[test]
    fn test_activity_capacity() {
        let host = make_host().with_activity_capacity(2);
        for id in 1..=3 {
            host.publish(EntityEvent::Deleted {
                entity_type: "room".to_string(),
                entity_id: id,
            });
        }

        assert_eq!(host.activities().len(), 2);
        assert_eq!(host.recent_activities(1)[0].event.entity_id(), Some(3));
    }

    #[test]
    fn test_update_settings() {
        let host = make_host();

        let saved = host
            .update_settings(SettingsSection::General, serde_json::json!({"name": "Nhà trọ Hồng"}))
            .unwrap();

        assert_eq!(saved.property.name, "Nhà trọ Hồng");
        assert_eq!(host.config().unwrap().property.name, "Nhà trọ Hồng");
        match &host.recent_activities(1)[0].event {
            DeskEvent::Notice(notice) => assert_eq!(notice.message, "Đã lưu thông tin chung"),
            other => panic!("expected a notice, got {:?}", other),
        }
    }

    #[test]
    fn test_rejected_settings_leave_config() {
        let host = make_host();

        let err = host
            .update_settings(SettingsSection::Notifications, serde_json::json!({"sms": "yes"}))
            .unwrap_err();

        assert_eq!(err.error_code(), "INVALID_VALUE");
        assert_eq!(host.config().unwrap(), DashboardConfig::default_config());
        assert!(host.activities().is_empty());
    }

    #[tokio::test]
    async fn test_notices_reach_the_bus() {
        let host = make_host().with_event_bus(EventBus::new(16));
        let mut rx = host.event_bus().unwrap().subscribe();

        host.notify(Notice::success("Đã xóa hóa đơn"));

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.event.action(), "notice");
        assert_eq!(envelope.sequence, 1);
    }
}
