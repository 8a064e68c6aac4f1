//! # Listable
//!
//! A list-filter pipeline for CMS list endpoints: free-text search, sorting
//! restricted to allow-listed fields, pinned-first ordering, subtype scoping,
//! publish/draft status filtering, trash handling, recency tiebreaks and
//! pagination.
//!
//! ## Features
//!
//! - **Lenient requests**: unknown fields, statuses and types are dropped, never rejected
//! - **Allow-lists per entity type**: declared in code or loaded from YAML
//! - **Backend-agnostic plans**: the pipeline compiles a request into a [`QueryPlan`](core::QueryPlan)
//! - **Pluggable sources**: in-memory evaluation, or SQL via SeaQuery and sqlx (`postgres` feature)
//! - **Soft Delete Support**: trashed records are hidden unless asked for
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listable::prelude::*;
//!
//! let config = ListingConfig::default_config();
//! let pipeline = ListFilterPipeline::from_config(&config, "post")?;
//!
//! let store = InMemoryStore::new();
//! store.create(Post::new("Hello world")).await?;
//!
//! let request = FilterRequest::new()
//!     .with_query("hello")
//!     .with_order(SortOrder::desc("views_count"));
//! let page = pipeline.apply_filter(&store, &request).await?;
//! ```

pub mod config;
pub mod core;
pub mod models;
pub mod pipeline;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ConfigError, Entity, EntityStore, FieldValue, FilterRequest, ListSource, Listable,
        ListingError, PageRequest, PaginationMeta, QueryOp, QueryPlan, ResultPage, STATUS_DRAFT,
        STATUS_PUBLISH, SortDirection, SortOrder, StatusFilter, StatusScope, StorageError,
        TrashScope,
    };

    // === Pipeline ===
    pub use crate::pipeline::ListFilterPipeline;

    // === Config ===
    pub use crate::config::{EntityListing, FieldAllowList, ListingConfig, PaginationConfig};

    // === Models ===
    pub use crate::models::{Category, Post, TYPE_PAGE, TYPE_POST, Tag};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresListSource;
    pub use crate::storage::SqlListQuery;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
