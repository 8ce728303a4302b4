//! Entity traits defining the core abstraction for all record types

use crate::core::field::FieldValue;
use std::fmt;

/// Base trait for all records held by a [`Collection`](crate::core::store::Collection).
///
/// Every entity has:
/// - id: integer identifier, unique within its own collection
/// - status: a closed set of states (see [`Status`])
/// - a fixed set of searchable text fields
///
/// Implementations are normally generated with `impl_entity!`.
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    /// The status enum of this entity
    type Status: Status;

    /// The plural resource name used in URLs (e.g., "rooms", "invoices")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "room", "invoice")
    fn resource_name_singular() -> &'static str;

    /// Get the identifier of this record
    fn id(&self) -> u64;

    /// Overwrite the identifier. Only the store assigns ids.
    fn set_id(&mut self, id: u64);

    /// Get the current status
    fn status(&self) -> Self::Status;

    /// Fields matched by the free-text search, in display order
    fn search_fields() -> &'static [&'static str];

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

/// A closed set of states for an entity (e.g. occupied / available).
pub trait Status: Copy + Eq + fmt::Debug + Default + Send + Sync + 'static {
    /// Wire name, lowercase (e.g. "occupied")
    fn as_str(&self) -> &'static str;

    /// User-facing badge label
    fn label(&self) -> &'static str;

    /// All states, in declaration order
    fn variants() -> &'static [Self];

    /// Parse a wire name, ignoring ASCII case
    fn parse(value: &str) -> Option<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::IntoFieldValue;
    use serde::{Deserialize, Serialize};

    crate::impl_status!(
        /// Test status
        TestStatus {
            #[default]
            Open => ("open", "Mở"),
            Closed => ("closed", "Đóng"),
        }
    );

    #[derive(Clone, Debug, Serialize, Deserialize)]
    struct TestEntity {
        id: u64,
        label: String,
        note: Option<String>,
        status: TestStatus,
    }

    crate::impl_entity!(
        TestEntity,
        "test_entity",
        "test_entities",
        TestStatus,
        search: [label, note],
        fields: [label, note, status],
    );

    #[test]
    fn test_entity_metadata() {
        assert_eq!(TestEntity::resource_name(), "test_entities");
        assert_eq!(TestEntity::resource_name_singular(), "test_entity");
        assert_eq!(TestEntity::search_fields(), &["label", "note"]);
    }

    #[test]
    fn test_entity_field_values() {
        let mut entity = TestEntity {
            id: 3,
            label: "alpha".to_string(),
            note: None,
            status: TestStatus::Closed,
        };

        assert_eq!(entity.field_value("id"), Some(FieldValue::Integer(3)));
        assert_eq!(entity.field_value("note"), Some(FieldValue::Null));
        assert_eq!(
            entity.field_value("status"),
            Some(FieldValue::String("closed".to_string()))
        );
        assert_eq!(entity.field_value("missing"), None);

        entity.set_id(9);
        assert_eq!(entity.id(), 9);
        assert_eq!(entity.status(), TestStatus::Closed);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TestStatus::parse("OPEN"), Some(TestStatus::Open));
        assert_eq!(TestStatus::parse("closed"), Some(TestStatus::Closed));
        assert_eq!(TestStatus::parse("nope"), None);
        assert_eq!(TestStatus::default(), TestStatus::Open);
        assert_eq!(TestStatus::Closed.label(), "Đóng");
        assert_eq!(TestStatus::Open.to_field_value(), FieldValue::String("open".into()));
        assert_eq!(TestStatus::Closed.to_string(), "closed");
    }
}
