//! # rentdesk
//!
//! Management core for a small rental property: rooms, tenants and rent
//! invoices, with a REST API on top.
//!
//! ## Features
//!
//! - **Copy-on-write collections**: every add, edit or delete yields a new
//!   collection; earlier snapshots never change
//! - **One generic page controller**: search, status tabs, dialogs and form
//!   submission work the same for every entity type
//! - **Literal notices**: each mutation reports a fixed Vietnamese message to
//!   a pluggable notifier
//! - **Locale-aware numbers**: `2.500.000` for vi-VN, `2,500,000` for en
//! - **REST exposure**: axum handlers over async data services, with an
//!   optional broadcast event bus, an activity feed and editable settings
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rentdesk::prelude::*;
//!
//! let notifier = Arc::new(MemoryNotifier::new());
//! let mut rooms: Page<RoomForm> =
//!     Page::new(Collection::new(Room::seed()), NumberFormat::VI_VN, notifier.clone());
//!
//! rooms.set_query("p10");
//! assert_eq!(rooms.visible().len(), 3);
//!
//! rooms.delete(3, &|_: &str| true);
//! assert_eq!(notifier.last().unwrap().message, "Đã xóa phòng P103");
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Entity, Status},
        field::{FieldValue, IntoFieldValue},
        form::{Form, FormController, FormMode},
        notify::{Confirmer, Notifier},
        service::DataService,
    };

    // === Core Types ===
    pub use crate::core::{
        error::{DeskError, EntityError, ValidationError},
        events::{ActivityLog, DeskEvent, EntityEvent, EventBus},
        notify::{MemoryNotifier, Notice, NoticeLevel, TracingNotifier},
        number::{NumberFormat, format_number, parse_number},
        page::{Dialog, Outcome, Page},
        query::SearchParams,
        store::Collection,
    };

    // === Entities ===
    pub use crate::entities::{
        DashboardStats, Invoice, InvoiceForm, InvoiceStatus, Room, RoomForm, RoomStatus, Tenant,
        TenantForm, TenantStatus,
    };

    // === Macros ===
    pub use crate::{impl_entity, impl_status};

    // === Storage ===
    pub use crate::storage::InMemoryDataService;

    // === Config ===
    pub use crate::config::{DashboardConfig, SettingsSection};

    // === Server ===
    pub use crate::server::{DashboardHost, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        routing::{delete, get, post, put},
    };
}
