//! Service traits implemented by storage backends

use crate::core::entity::Listable;
use crate::core::error::StorageError;
use crate::core::plan::QueryPlan;
use crate::core::query::{PageRequest, ResultPage};
use async_trait::async_trait;

/// A queryable collection of entities
///
/// Sources execute a [`QueryPlan`] exactly as given: filters restrict,
/// orderings apply in plan order, and pagination comes last. The framework is
/// agnostic to how the plan is evaluated.
#[async_trait]
pub trait ListSource<T: Listable>: Send + Sync {
    /// Run the plan and return the requested page
    async fn fetch(&self, plan: &QueryPlan, page: &PageRequest)
    -> Result<ResultPage<T>, StorageError>;
}

/// CRUD operations behind the list endpoints
///
/// `get` hides soft-deleted records; use `get_with_trashed` to reach them.
#[async_trait]
pub trait EntityStore<T: Listable>: Send + Sync {
    /// Insert a new entity; an id of 0 asks the store to assign one.
    ///
    /// An explicit id that is already taken fails with `AlreadyExists`.
    async fn create(&self, entity: T) -> Result<T, StorageError>;

    /// Get a live entity by id
    async fn get(&self, id: i64) -> Result<Option<T>, StorageError>;

    /// Get an entity by id, soft-deleted or not
    async fn get_with_trashed(&self, id: i64) -> Result<Option<T>, StorageError>;

    /// Replace an existing entity
    async fn update(&self, entity: T) -> Result<T, StorageError>;

    /// Move an entity to the trash (removes it for types without soft deletes)
    async fn soft_delete(&self, id: i64) -> Result<(), StorageError>;

    /// Bring a soft-deleted entity back
    async fn restore(&self, id: i64) -> Result<T, StorageError>;

    /// Remove an entity permanently
    async fn force_delete(&self, id: i64) -> Result<(), StorageError>;
}
