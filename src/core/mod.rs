//! Core module containing the traits and types every listing is built on

pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod plan;
pub mod query;
pub mod service;

pub use entity::{Entity, Listable, STATUS_DRAFT, STATUS_PUBLISH};
pub use error::{ConfigError, ListingError, StorageError};
pub use field::FieldValue;
pub use filter::{FilterRequest, SortDirection, SortOrder, StatusFilter};
pub use plan::{QueryOp, QueryPlan, StatusScope, TrashScope};
pub use query::{PageRequest, PaginationMeta, ResultPage};
pub use service::{EntityStore, ListSource};
