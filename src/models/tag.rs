//! Free-form tags attached to posts

use crate::config::{EntityListing, FieldAllowList};
use crate::core::entity::{Entity, Listable};
use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub creator_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            slug: slug.into(),
            creator_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Listing rules for tags: searchable by name and slug, nothing sortable
    pub fn listing() -> EntityListing {
        EntityListing::new(FieldAllowList::new(["name", "slug"], Vec::<String>::new()))
            .without_status()
            .without_soft_deletes()
            .without_publication()
    }
}

impl Entity for Tag {
    const SOFT_DELETES: bool = false;

    fn resource_name() -> &'static str {
        "tags"
    }

    fn resource_name_singular() -> &'static str {
        "tag"
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

impl Listable for Tag {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Integer(self.id),
            "name" => FieldValue::from(self.name.as_str()),
            "slug" => FieldValue::from(self.slug.as_str()),
            "creator_id" => FieldValue::from(self.creator_id),
            "created_at" => FieldValue::DateTime(self.created_at),
            "updated_at" => FieldValue::DateTime(self.updated_at),
            _ => return None,
        };
        Some(value)
    }
}
