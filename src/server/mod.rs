//! Server module for building the dashboard HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - CRUD routes for rooms, tenants and invoices
//! - The invoice payment route
//! - Dashboard statistics, activity feed and settings routes

pub mod builder;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use host::{DashboardHost, HostedEntity};
pub use router::{build_router, entity_routes};
