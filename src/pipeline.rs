//! The list filter pipeline
//!
//! Compiles a client [`FilterRequest`] into a [`QueryPlan`] for one entity
//! type, following a fixed sequence of steps:
//!
//! 1. pinned records first (`top` descending, unpinned last)
//! 2. subtype scoping (`post` / `page`), unknown subtypes ignored
//! 3. free-text search over the searchable fields
//! 4. client sort keys, restricted to the sortable fields
//! 5. status scoping (`publish`, `draft`, otherwise both)
//! 6. trash scoping (live, with trashed, only trashed)
//! 7. recency tiebreak (`published_at` desc, `created_at` desc), then `id` desc
//!
//! Nothing a client sends can make the pipeline fail: unknown fields,
//! statuses and subtypes are dropped. The only errors that surface come from
//! the query source and pass through untouched.

use crate::config::{EntityListing, ListingConfig, PaginationConfig};
use crate::core::entity::Listable;
use crate::core::error::{ConfigError, StorageError};
use crate::core::filter::{FilterRequest, SortDirection, StatusFilter};
use crate::core::plan::{QueryOp, QueryPlan, StatusScope, TrashScope};
use crate::core::query::{PageRequest, ResultPage};
use crate::core::service::ListSource;
use std::collections::HashSet;
use std::sync::Arc;

/// Stateless filter pipeline for one entity type
#[derive(Debug, Clone)]
pub struct ListFilterPipeline {
    entity_type: String,
    listing: Arc<EntityListing>,
    pagination: PaginationConfig,
}

impl ListFilterPipeline {
    pub fn new(
        entity_type: impl Into<String>,
        listing: Arc<EntityListing>,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            listing,
            pagination,
        }
    }

    /// Build the pipeline for `entity_type` from the loaded configuration
    pub fn from_config(config: &ListingConfig, entity_type: &str) -> Result<Self, ConfigError> {
        let listing = config.listing(entity_type)?;
        Ok(Self::new(entity_type, listing, config.pagination))
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn listing(&self) -> &EntityListing {
        &self.listing
    }

    /// Compile a request into a query plan
    pub fn plan(&self, request: &FilterRequest) -> QueryPlan {
        let mut plan = QueryPlan::new();

        if self.listing.pinnable {
            plan.push(QueryOp::OrderByTop);
        }

        if let Some(entity_type) = self.resolve_type(request) {
            plan.push(QueryOp::ScopeType(entity_type));
        }

        if let Some(search) = self.search_op(request) {
            plan.push(search);
        }

        self.push_sort_orders(&mut plan, request);

        if self.listing.status_scoped {
            plan.push(QueryOp::Status(status_scope(request.status)));
        }

        if self.listing.soft_deletes {
            plan.push(QueryOp::Trash(trash_scope(request)));
        }

        if self.listing.has_published_at {
            plan.push(order_by("published_at", SortDirection::Desc));
        }
        plan.push(order_by("created_at", SortDirection::Desc));
        plan.push(order_by("id", SortDirection::Desc));

        tracing::trace!(
            entity_type = %self.entity_type,
            ops = plan.ops().len(),
            "Compiled list plan"
        );
        plan
    }

    /// Resolve the requested page, clamped to the configured bounds
    pub fn page_request(&self, request: &FilterRequest) -> PageRequest {
        let per_page = request
            .per_page
            .unwrap_or(self.pagination.default_per_page)
            .clamp(1, self.pagination.max_per_page.max(1));
        PageRequest::new(request.page.unwrap_or(1), per_page)
    }

    /// Run a request against a query source
    pub async fn apply_filter<T, S>(
        &self,
        source: &S,
        request: &FilterRequest,
    ) -> Result<ResultPage<T>, StorageError>
    where
        T: Listable,
        S: ListSource<T> + ?Sized,
    {
        let plan = self.plan(request);
        let page = self.page_request(request);
        let result = source.fetch(&plan, &page).await?;

        tracing::debug!(
            entity_type = %self.entity_type,
            page = page.page,
            per_page = page.per_page,
            total = result.pagination.total,
            "Listed entities"
        );
        Ok(result)
    }

    fn resolve_type(&self, request: &FilterRequest) -> Option<String> {
        if let Some(requested) = request.entity_type.as_deref() {
            if self.listing.recognizes_type(requested) {
                return Some(requested.to_string());
            }
            tracing::debug!(
                entity_type = %self.entity_type,
                requested,
                "Ignoring unrecognized subtype"
            );
        }
        self.listing.default_type.clone()
    }

    fn search_op(&self, request: &FilterRequest) -> Option<QueryOp> {
        let term = request.search_term()?;
        let fields: Vec<String> = self.listing.fields.searchable.iter().cloned().collect();
        if fields.is_empty() {
            tracing::debug!(
                entity_type = %self.entity_type,
                "Ignoring search, no searchable fields"
            );
            return None;
        }
        Some(QueryOp::Search {
            fields,
            term: term.to_lowercase(),
        })
    }

    fn push_sort_orders(&self, plan: &mut QueryPlan, request: &FilterRequest) {
        let mut seen = HashSet::new();
        for order in &request.sort_orders {
            if !self.listing.fields.is_sortable(&order.field) {
                tracing::debug!(
                    entity_type = %self.entity_type,
                    field = %order.field,
                    "Dropping sort on non-sortable field"
                );
                continue;
            }
            if !seen.insert(order.field.as_str()) {
                continue;
            }
            plan.push(order_by(&order.field, order.direction));
        }
    }
}

// A draft request lists drafts only, never drafts plus published posts.
fn status_scope(status: StatusFilter) -> StatusScope {
    match status {
        StatusFilter::Publish => StatusScope::Publish,
        StatusFilter::Draft => StatusScope::Draft,
        StatusFilter::Any => StatusScope::PublishOrDraft,
    }
}

fn trash_scope(request: &FilterRequest) -> TrashScope {
    if request.only_trashed {
        TrashScope::OnlyTrashed
    } else if request.include_trashed {
        TrashScope::WithTrashed
    } else {
        TrashScope::WithoutTrashed
    }
}

fn order_by(field: &str, direction: SortDirection) -> QueryOp {
    QueryOp::OrderBy {
        field: field.to_string(),
        direction,
    }
}
