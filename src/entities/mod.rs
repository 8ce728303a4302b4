//! Concrete record types: rooms, tenants, invoices, and the dashboard
//! aggregates built from them

pub mod invoice;
pub mod macros;
pub mod room;
pub mod stats;
pub mod tenant;

pub use invoice::{Invoice, InvoiceForm, InvoiceStatus};
pub use room::{Room, RoomForm, RoomStatus};
pub use stats::DashboardStats;
pub use tenant::{Tenant, TenantForm, TenantStatus};
