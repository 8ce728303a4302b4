//! Typed error handling for rentdesk
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookups and storage failures on a collection
//! - [`ValidationError`]: rejected form submissions and bad query values
//! - [`ConfigError`]: settings file loading and parsing
//!
//! Every error maps to an HTTP status and a stable error code, and renders
//! as an [`ErrorResponse`] body.
//!
//! # Example
//!
//! ```rust,ignore
//! let room = service
//!     .get(id)
//!     .await?
//!     .ok_or_else(|| EntityError::not_found::<Room>(id))?;
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::core::entity::Entity;

/// The main error type for rentdesk
#[derive(Debug, Error)]
pub enum DeskError {
    /// Entity-related errors (lookups, storage)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Anything else (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DeskError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DeskError::Entity(e) => e.status_code(),
            DeskError::Validation(_) => StatusCode::BAD_REQUEST,
            DeskError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DeskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DeskError::Entity(e) => e.error_code(),
            DeskError::Validation(e) => e.error_code(),
            DeskError::Config(_) => "CONFIG_ERROR",
            DeskError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The notice to show the user
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DeskError::Entity(EntityError::NotFound { entity_type, id }) => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id,
            })),
            DeskError::Entity(EntityError::IdsExhausted { entity_type }) => {
                Some(serde_json::json!({ "entity_type": entity_type }))
            }
            DeskError::Validation(ValidationError::MissingFields { fields, .. }) => {
                Some(serde_json::json!({ "fields": fields }))
            }
            DeskError::Validation(ValidationError::InvalidValue { field, value }) => {
                Some(serde_json::json!({ "field": field, "value": value }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for DeskError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<EntityError>() {
            Ok(entity) => DeskError::Entity(entity),
            Err(err) => DeskError::Entity(EntityError::Storage {
                message: err.to_string(),
            }),
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups and storage
#[derive(Debug, Error)]
pub enum EntityError {
    /// No record with this id
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: u64 },

    /// The backing store failed (e.g. a poisoned lock)
    #[error("Storage failure: {message}")]
    Storage { message: String },

    /// The largest id is taken, so no new record can be added
    #[error("No ids left for new {entity_type} records")]
    IdsExhausted { entity_type: String },
}

impl EntityError {
    /// Not-found error for entity type `T`
    pub fn not_found<T: Entity>(id: u64) -> Self {
        EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id,
        }
    }

    /// Exhaustion error for entity type `T`
    pub fn ids_exhausted<T: Entity>() -> Self {
        EntityError::IdsExhausted {
            entity_type: T::resource_name_singular().to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            EntityError::IdsExhausted { .. } => StatusCode::INSUFFICIENT_STORAGE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::Storage { .. } => "STORAGE_ERROR",
            EntityError::IdsExhausted { .. } => "IDS_EXHAUSTED",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised before anything is written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required fields were empty after trimming.
    ///
    /// `message` is the user-facing notice for the entity's form.
    #[error("{message}")]
    MissingFields {
        entity_type: &'static str,
        fields: Vec<&'static str>,
        message: &'static str,
    },

    /// A query or body value is not one of the accepted values
    #[error("Invalid value '{value}' for '{field}'")]
    InvalidValue { field: String, value: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingFields { .. } => "MISSING_FIELDS",
            ValidationError::InvalidValue { .. } => "INVALID_VALUE",
        }
    }

    /// The notice to show the user
    pub fn message(&self) -> String {
        self.to_string()
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors loading dashboard settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
