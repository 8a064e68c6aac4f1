//! Categories group posts (or pages) under one heading

use crate::config::{EntityListing, FieldAllowList};
use crate::core::entity::{Entity, Listable};
use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subtype of regular blog posts
pub const TYPE_POST: &str = "post";

/// Subtype of CMS pages
pub const TYPE_PAGE: &str = "page";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub category_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, slug: impl Into<String>, category_type: &str) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            slug: slug.into(),
            category_type: category_type.to_string(),
            description: String::new(),
            order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Listing rules for categories
    pub fn listing() -> EntityListing {
        EntityListing::new(FieldAllowList::new(["name", "slug"], ["name", "order"]))
            .with_types([TYPE_POST, TYPE_PAGE], None)
            .without_status()
            .without_soft_deletes()
            .without_publication()
    }
}

impl Entity for Category {
    const SOFT_DELETES: bool = false;

    fn resource_name() -> &'static str {
        "categories"
    }

    fn resource_name_singular() -> &'static str {
        "category"
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
}

impl Listable for Category {
    fn entity_type(&self) -> Option<&str> {
        Some(&self.category_type)
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Integer(self.id),
            "name" => FieldValue::from(self.name.as_str()),
            "slug" => FieldValue::from(self.slug.as_str()),
            "type" => FieldValue::from(self.category_type.as_str()),
            "description" => FieldValue::from(self.description.as_str()),
            "order" => FieldValue::Integer(self.order),
            "created_at" => FieldValue::DateTime(self.created_at),
            "updated_at" => FieldValue::DateTime(self.updated_at),
            _ => return None,
        };
        Some(value)
    }
}
