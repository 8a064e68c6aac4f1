//! In-memory entity store for testing and development

use crate::core::entity::{Entity, Listable};
use crate::core::error::StorageError;
use crate::core::field::FieldValue;
use crate::core::filter::SortDirection;
use crate::core::plan::{QueryOp, QueryPlan, TrashScope};
use crate::core::query::{PageRequest, ResultPage};
use crate::core::service::{EntityStore, ListSource};
use crate::models::{Post, TYPE_POST};
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// In-memory store evaluating query plans over a shared map
///
/// Uses RwLock for thread-safe access; clones share the same data.
#[derive(Clone)]
pub struct InMemoryStore<T> {
    entities: Arc<RwLock<BTreeMap<i64, T>>>,
}

impl<T: Listable> InMemoryStore<T> {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a store pre-filled with entities, keeping their ids
    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> Self {
        let map = entities.into_iter().map(|e| (e.id(), e)).collect();
        Self {
            entities: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored entities, trashed included
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.read()?.is_empty())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<i64, T>>, StorageError> {
        self.entities
            .read()
            .map_err(|e| StorageError::Backend(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<i64, T>>, StorageError> {
        self.entities
            .write()
            .map_err(|e| StorageError::Backend(format!("Failed to acquire write lock: {}", e)))
    }

    fn not_found(id: i64) -> StorageError {
        StorageError::not_found(T::resource_name_singular(), id)
    }
}

impl<T: Listable> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore<Post> {
    /// Persist one more view of a post and return the new count.
    ///
    /// The write lock serializes concurrent increments, so none are lost.
    pub fn increment_views(&self, id: i64) -> Result<i64, StorageError> {
        let mut posts = self.write()?;
        let post = posts
            .get_mut(&id)
            .filter(|post| !post.is_deleted())
            .ok_or_else(|| Self::not_found(id))?;
        post.add_view_count();
        Ok(post.views_count)
    }

    /// The next published post in the same category, by id
    pub fn next_post(&self, post: &Post) -> Result<Option<Post>, StorageError> {
        let Some(category_id) = post.category_id else {
            return Ok(None);
        };
        let posts = self.read()?;
        Ok(posts
            .range(post.id + 1..)
            .map(|(_, candidate)| candidate)
            .find(|candidate| {
                candidate.category_id == Some(category_id)
                    && candidate.post_type == TYPE_POST
                    && candidate.is_publish()
                    && !candidate.is_deleted()
            })
            .cloned())
    }
}

#[async_trait]
impl<T: Listable> ListSource<T> for InMemoryStore<T> {
    async fn fetch(
        &self,
        plan: &QueryPlan,
        page: &PageRequest,
    ) -> Result<ResultPage<T>, StorageError> {
        let entities = self.read()?;
        let trash = plan.trash_scope().unwrap_or(TrashScope::WithTrashed);

        let mut matched: Vec<&T> = entities
            .values()
            .filter(|entity| trash.admits(entity.is_deleted()))
            .filter(|entity| plan.filters().all(|op| admits(*entity, op)))
            .collect();

        let orderings: Vec<&QueryOp> = plan.orderings().collect();
        matched.sort_by(|a, b| compare(*a, *b, &orderings));

        let total = matched.len();
        let data = matched
            .into_iter()
            .skip(page.offset())
            .take(page.per_page)
            .cloned()
            .collect();

        Ok(ResultPage::new(data, *page, total))
    }
}

#[async_trait]
impl<T: Listable> EntityStore<T> for InMemoryStore<T> {
    async fn create(&self, mut entity: T) -> Result<T, StorageError> {
        let mut entities = self.write()?;

        if entity.id() == 0 {
            let next_id = entities.keys().next_back().map_or(1, |id| id + 1);
            entity.set_id(next_id);
        } else if entities.contains_key(&entity.id()) {
            return Err(StorageError::AlreadyExists {
                entity_type: T::resource_name_singular().to_string(),
                id: entity.id(),
            });
        }
        entities.insert(entity.id(), entity.clone());

        tracing::debug!(
            entity_type = T::resource_name_singular(),
            id = entity.id(),
            "Created entity"
        );
        Ok(entity)
    }

    async fn get(&self, id: i64) -> Result<Option<T>, StorageError> {
        Ok(self.read()?.get(&id).filter(|e| !e.is_deleted()).cloned())
    }

    async fn get_with_trashed(&self, id: i64) -> Result<Option<T>, StorageError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn update(&self, mut entity: T) -> Result<T, StorageError> {
        let mut entities = self.write()?;
        let id = entity.id();

        if !entities.contains_key(&id) {
            return Err(Self::not_found(id));
        }
        entity.touch(Utc::now());
        entities.insert(id, entity.clone());

        Ok(entity)
    }

    async fn soft_delete(&self, id: i64) -> Result<(), StorageError> {
        let mut entities = self.write()?;

        if !T::SOFT_DELETES {
            entities.remove(&id).ok_or_else(|| Self::not_found(id))?;
            return Ok(());
        }

        let entity = entities
            .get_mut(&id)
            .filter(|e| !e.is_deleted())
            .ok_or_else(|| Self::not_found(id))?;
        entity.soft_delete();
        Ok(())
    }

    async fn restore(&self, id: i64) -> Result<T, StorageError> {
        let mut entities = self.write()?;
        let entity = entities.get_mut(&id).ok_or_else(|| Self::not_found(id))?;

        entity.restore();
        Ok(entity.clone())
    }

    async fn force_delete(&self, id: i64) -> Result<(), StorageError> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}

/// Read a column, preferring the trait accessors for the well-known ones
fn column_value<T: Listable>(entity: &T, field: &str) -> FieldValue {
    match field {
        "id" => FieldValue::Integer(entity.id()),
        "created_at" => FieldValue::DateTime(entity.created_at()),
        "published_at" => FieldValue::from(entity.published_at()),
        "top" => FieldValue::from(entity.top()),
        _ => entity.field_value(field).unwrap_or(FieldValue::Null),
    }
}

fn admits<T: Listable>(entity: &T, op: &QueryOp) -> bool {
    match op {
        QueryOp::ScopeType(entity_type) => entity.entity_type() == Some(entity_type.as_str()),
        QueryOp::Search { fields, term } => fields
            .iter()
            .any(|field| column_value(entity, field).contains_lowercase(term)),
        QueryOp::Status(scope) => scope.admits(entity.status()),
        QueryOp::Trash(scope) => scope.admits(entity.is_deleted()),
        QueryOp::OrderByTop | QueryOp::OrderBy { .. } => true,
    }
}

fn compare<T: Listable>(a: &T, b: &T, orderings: &[&QueryOp]) -> Ordering {
    for op in orderings {
        let ordering = match op {
            QueryOp::OrderByTop => column_value(b, "top").sql_cmp(&column_value(a, "top")),
            QueryOp::OrderBy { field, direction } => {
                let ordering = column_value(a, field).sql_cmp(&column_value(b, field));
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
            _ => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
