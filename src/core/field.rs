//! Field value types used for dynamic field access and searching

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A polymorphic field value that can hold the kinds of data records carry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(u64),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Text used by the free-text search. Null values have none.
    pub fn search_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::String(s) => Some(Cow::Borrowed(s)),
            FieldValue::Integer(i) => Some(Cow::Owned(i.to_string())),
            FieldValue::Null => None,
        }
    }
}

/// Conversion from a record field into a [`FieldValue`]
///
/// Used by `impl_entity!` to generate `Entity::field_value`.
pub trait IntoFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl IntoFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl IntoFieldValue for Option<String> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(s) => FieldValue::String(s.clone()),
            None => FieldValue::Null,
        }
    }
}

impl IntoFieldValue for u64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl IntoFieldValue for u32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(u64::from(*self))
    }
}
