//! Core module containing the record model and the state machinery shared by
//! every management page

pub mod entity;
pub mod error;
pub mod events;
pub mod field;
pub mod form;
pub mod notify;
pub mod number;
pub mod page;
pub mod query;
pub mod service;
pub mod store;

pub use entity::{Entity, Status};
pub use error::{DeskError, EntityError, ValidationError};
pub use events::{ActivityLog, DeskEvent, EntityEvent, EventBus, EventEnvelope};
pub use field::{FieldValue, IntoFieldValue};
pub use form::{Form, FormController, FormMode, Submitted};
pub use notify::{Confirmer, MemoryNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use number::{NumberFormat, format_number, parse_number};
pub use page::{Dialog, Dialogs, Outcome, Page};
pub use query::SearchParams;
pub use service::DataService;
pub use store::Collection;
