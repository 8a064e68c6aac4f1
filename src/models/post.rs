//! Posts and CMS pages

use crate::config::{EntityListing, FieldAllowList};
use crate::core::entity::{Entity, Listable, STATUS_DRAFT, STATUS_PUBLISH};
use crate::core::field::FieldValue;
use crate::models::category::{TYPE_PAGE, TYPE_POST};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post or a CMS page
///
/// Both live in the same table and are told apart by `post_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub user_id: Option<i64>,
    #[serde(default)]
    pub author_info: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(rename = "type")]
    pub post_type: String,
    #[serde(default)]
    pub views_count: i64,
    pub cover: Option<String>,
    pub status: String,
    pub template: Option<String>,
    pub top: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create an unsaved draft post (id 0 until a store assigns one)
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: title.into(),
            user_id: None,
            author_info: String::new(),
            excerpt: String::new(),
            post_type: TYPE_POST.to_string(),
            views_count: 0,
            cover: None,
            status: STATUS_DRAFT.to_string(),
            template: None,
            top: None,
            published_at: None,
            category_id: None,
            order: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Create an unsaved CMS page
    pub fn page(title: impl Into<String>) -> Self {
        Self {
            post_type: TYPE_PAGE.to_string(),
            ..Self::new(title)
        }
    }

    /// Listing rules for posts
    pub fn listing() -> EntityListing {
        EntityListing::new(FieldAllowList::new(
            ["title", "author_info", "excerpt"],
            [
                "title",
                "status",
                "views_count",
                "top",
                "order",
                "published_at",
                "category_id",
            ],
        ))
        .with_types([TYPE_POST, TYPE_PAGE], Some(TYPE_POST))
    }

    /// Mark the post as published at `at`
    pub fn publish(&mut self, at: DateTime<Utc>) {
        self.status = STATUS_PUBLISH.to_string();
        self.published_at = Some(at);
        self.touch(Utc::now());
    }

    /// Pin or unpin the post
    pub fn set_top(&mut self, top: Option<DateTime<Utc>>) {
        self.top = top;
        self.touch(Utc::now());
    }

    pub fn is_publish(&self) -> bool {
        self.status == STATUS_PUBLISH
    }

    pub fn is_draft(&self) -> bool {
        self.status == STATUS_DRAFT
    }

    pub fn is_page(&self) -> bool {
        self.post_type == TYPE_PAGE
    }

    /// Bump the in-memory view counter.
    ///
    /// Persisting the increment is the store's job, see
    /// [`crate::storage::InMemoryStore::increment_views`].
    pub fn add_view_count(&mut self) {
        self.views_count += 1;
    }
}

impl Entity for Post {
    fn resource_name() -> &'static str {
        "posts"
    }

    fn resource_name_singular() -> &'static str {
        "post"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>) {
        self.deleted_at = at;
    }

    fn status(&self) -> &str {
        &self.status
    }
}

impl Listable for Post {
    fn entity_type(&self) -> Option<&str> {
        Some(&self.post_type)
    }

    fn top(&self) -> Option<DateTime<Utc>> {
        self.top
    }

    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Integer(self.id),
            "title" => FieldValue::from(self.title.as_str()),
            "user_id" => FieldValue::from(self.user_id),
            "author_info" => FieldValue::from(self.author_info.as_str()),
            "excerpt" => FieldValue::from(self.excerpt.as_str()),
            "type" => FieldValue::from(self.post_type.as_str()),
            "views_count" => FieldValue::Integer(self.views_count),
            "cover" => FieldValue::from(self.cover.clone()),
            "status" => FieldValue::from(self.status.as_str()),
            "template" => FieldValue::from(self.template.clone()),
            "top" => FieldValue::from(self.top),
            "published_at" => FieldValue::from(self.published_at),
            "category_id" => FieldValue::from(self.category_id),
            "order" => FieldValue::Integer(self.order),
            "created_at" => FieldValue::DateTime(self.created_at),
            "updated_at" => FieldValue::DateTime(self.updated_at),
            "deleted_at" => FieldValue::from(self.deleted_at),
            _ => return None,
        };
        Some(value)
    }
}
