//! Typed errors for listing configuration and query sources
//!
//! Filter input coming from clients never produces an error: unknown fields,
//! statuses and types degrade to safe defaults inside the pipeline. What is
//! left are two categories:
//!
//! - [`ConfigError`]: the listing configuration is unusable (startup time)
//! - [`StorageError`]: the query source failed (propagated unchanged)
//!
//! [`ListingError`] wraps both for callers that deal with either.

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::config::ListingConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read listing config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid YAML for the expected shape
    #[error("failed to parse listing config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A field name is not a plain column identifier
    #[error("invalid field name '{field}' in listing '{entity_type}'")]
    InvalidFieldName { entity_type: String, field: String },

    /// The default subtype is not one of the listing's subtypes
    #[error("default type '{default_type}' of listing '{entity_type}' is not among its types")]
    InvalidDefaultType {
        entity_type: String,
        default_type: String,
    },

    /// No listing is configured for the requested entity type
    #[error("no listing configured for entity type '{0}'")]
    UnknownEntityType(String),

    /// A pagination bound is zero or inconsistent
    #[error("invalid pagination settings: {0}")]
    InvalidPagination(String),
}

/// Errors raised by query sources and entity stores
#[derive(Debug, Error)]
pub enum StorageError {
    /// No record with this id exists
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: i64 },

    /// A record with this id is already stored
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists { entity_type: String, id: i64 },

    /// A stored row could not be turned back into an entity
    #[error("failed to decode {entity_type}: {message}")]
    Decode {
        entity_type: String,
        message: String,
    },

    /// The backend itself failed (connection, lock, query)
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Build a not-found error for the given resource
    pub fn not_found(entity_type: impl Into<String>, id: i64) -> Self {
        StorageError::NotFound {
            entity_type: entity_type.into(),
            id,
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

/// Any error the listing layer can surface
#[derive(Debug, Error)]
pub enum ListingError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StorageError::not_found("post", 42);
        assert_eq!(err.to_string(), "post not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_already_exists_display() {
        let err = StorageError::AlreadyExists {
            entity_type: "post".to_string(),
            id: 7,
        };
        assert_eq!(err.to_string(), "post already exists: 7");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_backend_is_not_not_found() {
        let err = StorageError::Backend("connection reset".to_string());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "storage backend error: connection reset");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidFieldName {
            entity_type: "post".to_string(),
            field: "title; drop".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid field name 'title; drop' in listing 'post'"
        );
    }

    #[test]
    fn test_listing_error_is_transparent() {
        let err: ListingError = ConfigError::UnknownEntityType("widget".to_string()).into();
        assert_eq!(
            err.to_string(),
            "no listing configured for entity type 'widget'"
        );
        assert!(matches!(err, ListingError::Config(_)));
    }
}
