//! Listing configuration loading and management
//!
//! One [`EntityListing`] per entity type declares which fields clients may
//! search and sort on, plus how the type is scoped. The whole
//! [`ListingConfig`] is loaded once at startup and shared read-only.
//!
//! ```yaml
//! pagination:
//!   default_per_page: 20
//!   max_per_page: 100
//! listings:
//!   post:
//!     searchable: [title, author_info, excerpt]
//!     sortable: [title, views_count, published_at]
//!     types: [post, page]
//!     default_type: post
//!   tag:
//!     searchable: [name, slug]
//!     status_scoped: false
//!     soft_deletes: false
//!     pinnable: false
//!     has_published_at: false
//! ```

use crate::core::error::ConfigError;
use crate::models::{Category, Post, Tag};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Fields a client may reference when listing one entity type
///
/// Anything outside these sets is dropped from requests, never rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAllowList {
    /// Fields matched by the free-text search
    #[serde(default)]
    pub searchable: IndexSet<String>,

    /// Fields clients may sort on
    #[serde(default)]
    pub sortable: IndexSet<String>,
}

impl FieldAllowList {
    pub fn new<S, T>(searchable: S, sortable: T) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            searchable: searchable.into_iter().map(Into::into).collect(),
            sortable: sortable.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_searchable(&self, field: &str) -> bool {
        self.searchable.contains(field)
    }

    pub fn is_sortable(&self, field: &str) -> bool {
        self.sortable.contains(field)
    }
}

/// Listing rules for one entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityListing {
    #[serde(flatten)]
    pub fields: FieldAllowList,

    /// Recognized subtypes; empty means the type has no subtypes
    #[serde(default)]
    pub types: IndexSet<String>,

    /// Subtype listed when the request names none
    #[serde(default)]
    pub default_type: Option<String>,

    /// Whether the publish/draft status step applies
    #[serde(default = "default_true")]
    pub status_scoped: bool,

    /// Whether records are soft-deleted (and the trash step applies)
    #[serde(default = "default_true")]
    pub soft_deletes: bool,

    /// Whether records carry a `top` pin timestamp
    #[serde(default = "default_true")]
    pub pinnable: bool,

    /// Whether records carry a `published_at` timestamp
    #[serde(default = "default_true")]
    pub has_published_at: bool,
}

fn default_true() -> bool {
    true
}

impl EntityListing {
    pub fn new(fields: FieldAllowList) -> Self {
        Self {
            fields,
            types: IndexSet::new(),
            default_type: None,
            status_scoped: true,
            soft_deletes: true,
            pinnable: true,
            has_published_at: true,
        }
    }

    /// Declare the recognized subtypes and the one listed by default
    pub fn with_types<I>(mut self, types: I, default_type: Option<&str>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self.default_type = default_type.map(str::to_string);
        self
    }

    pub fn without_status(mut self) -> Self {
        self.status_scoped = false;
        self
    }

    pub fn without_soft_deletes(mut self) -> Self {
        self.soft_deletes = false;
        self
    }

    /// Drop the `top` and `published_at` orderings (the type has neither column)
    pub fn without_publication(mut self) -> Self {
        self.pinnable = false;
        self.has_published_at = false;
        self
    }

    pub fn recognizes_type(&self, entity_type: &str) -> bool {
        self.types.contains(entity_type)
    }

    /// Validate field names and the default subtype
    pub fn validate(&self, entity_type: &str) -> Result<(), ConfigError> {
        let fields = self
            .fields
            .searchable
            .iter()
            .chain(self.fields.sortable.iter());
        for field in fields {
            if !is_valid_field_name(field) {
                return Err(ConfigError::InvalidFieldName {
                    entity_type: entity_type.to_string(),
                    field: field.clone(),
                });
            }
        }

        if let Some(default_type) = &self.default_type
            && !self.recognizes_type(default_type)
        {
            return Err(ConfigError::InvalidDefaultType {
                entity_type: entity_type.to_string(),
                default_type: default_type.clone(),
            });
        }

        Ok(())
    }
}

/// Page size bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_per_page")]
    pub default_per_page: usize,

    #[serde(default = "default_max_per_page")]
    pub max_per_page: usize,
}

fn default_per_page() -> usize {
    20
}

fn default_max_per_page() -> usize {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
        }
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_per_page == 0 || self.max_per_page == 0 {
            return Err(ConfigError::InvalidPagination(
                "page sizes must be at least 1".to_string(),
            ));
        }
        if self.default_per_page > self.max_per_page {
            return Err(ConfigError::InvalidPagination(format!(
                "default_per_page ({}) exceeds max_per_page ({})",
                self.default_per_page, self.max_per_page
            )));
        }
        Ok(())
    }
}

/// Complete listing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Listing rules keyed by entity type (e.g. "post", "tag")
    #[serde(default)]
    pub listings: IndexMap<String, EntityListing>,
}

impl ListingConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        tracing::debug!(
            listings = config.listings.len(),
            "Loaded listing configuration"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pagination.validate()?;
        for (entity_type, listing) in &self.listings {
            listing.validate(entity_type)?;
        }
        Ok(())
    }

    /// Listing rules for an entity type
    pub fn listing(&self, entity_type: &str) -> Result<Arc<EntityListing>, ConfigError> {
        self.listings
            .get(entity_type)
            .cloned()
            .map(Arc::new)
            .ok_or_else(|| ConfigError::UnknownEntityType(entity_type.to_string()))
    }

    /// Add or replace the listing of an entity type
    pub fn with_listing(mut self, entity_type: impl Into<String>, listing: EntityListing) -> Self {
        self.listings.insert(entity_type.into(), listing);
        self
    }

    /// The built-in listings of the CMS resources
    pub fn default_config() -> Self {
        Self::default()
            .with_listing("post", Post::listing())
            .with_listing("tag", Tag::listing())
            .with_listing("category", Category::listing())
    }
}

/// Field names end up as SQL identifiers, so only plain lowercase names pass
fn is_valid_field_name(field: &str) -> bool {
    static FIELD_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = FIELD_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z_][a-z0-9_]*$").expect("field name pattern is valid")
    });
    regex.is_match(field)
}
