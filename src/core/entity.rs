//! Entity traits defining the abstraction shared by every listable record

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};

/// Status value of a published record
pub const STATUS_PUBLISH: &str = "publish";

/// Status value of a draft record
pub const STATUS_DRAFT: &str = "draft";

/// Base trait for all persisted records.
///
/// All entities have:
/// - id: Unique, monotonically assigned identifier
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
/// - deleted_at: Soft deletion timestamp (optional)
/// - status: Current status of the entity
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name (e.g., "posts", "tags")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "post", "tag")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> i64;

    /// Assign the identifier (stores hand out ids on insert)
    fn set_id(&mut self, id: i64);

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Set the last update timestamp
    fn touch(&mut self, at: DateTime<Utc>);

    /// Whether records of this type are soft-deleted instead of removed
    const SOFT_DELETES: bool = true;

    /// Get the deletion timestamp (soft delete)
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Set or clear the deletion timestamp
    fn set_deleted_at(&mut self, _at: Option<DateTime<Utc>>) {}

    /// Get the entity status.
    ///
    /// Records without a lifecycle (tags) report an empty status.
    fn status(&self) -> &str {
        ""
    }

    /// Check if the entity has been soft-deleted
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Mark the entity as deleted without removing it
    fn soft_delete(&mut self) {
        let now = Utc::now();
        self.set_deleted_at(Some(now));
        self.touch(now);
    }

    /// Undo a soft delete
    fn restore(&mut self) {
        self.set_deleted_at(None);
        self.touch(Utc::now());
    }
}

/// Trait for entities that can be listed through the filter pipeline.
///
/// Listing reads fields by name, so every field an allow-list may reference
/// must be reachable through [`Listable::field_value`]. Unknown names return
/// `None` and are treated like NULL.
pub trait Listable: Entity {
    /// Subtype of the record (e.g. "post" or "page"), if the type has any
    fn entity_type(&self) -> Option<&str> {
        None
    }

    /// Pin timestamp; pinned records list before all others
    fn top(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Publication timestamp used by the recency tiebreak
    fn published_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Check if the entity is pinned
    fn is_top(&self) -> bool {
        self.top().is_some()
    }
}
