//! Query plans: the ordered operations a list request compiles to
//!
//! A [`QueryPlan`] is what the pipeline hands to a query source. It is plain
//! data, so sources are free to interpret it however their backend needs
//! (evaluate it in memory, render it to SQL, ...). Filters commute; the
//! relative order of the ordering ops is significant.

use crate::core::filter::SortDirection;
use serde::Serialize;

/// Which statuses survive the status step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusScope {
    Publish,
    Draft,
    PublishOrDraft,
}

impl StatusScope {
    /// Status values this scope admits
    pub fn statuses(&self) -> &'static [&'static str] {
        use crate::core::entity::{STATUS_DRAFT, STATUS_PUBLISH};

        match self {
            StatusScope::Publish => &[STATUS_PUBLISH],
            StatusScope::Draft => &[STATUS_DRAFT],
            StatusScope::PublishOrDraft => &[STATUS_PUBLISH, STATUS_DRAFT],
        }
    }

    pub fn admits(&self, status: &str) -> bool {
        self.statuses().contains(&status)
    }
}

/// How soft-deleted records are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrashScope {
    /// Live records only
    #[default]
    WithoutTrashed,
    /// Live and soft-deleted records
    WithTrashed,
    /// Soft-deleted records only
    OnlyTrashed,
}

impl TrashScope {
    pub fn admits(&self, deleted: bool) -> bool {
        match self {
            TrashScope::WithoutTrashed => !deleted,
            TrashScope::WithTrashed => true,
            TrashScope::OnlyTrashed => deleted,
        }
    }
}

/// One step of a query plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum QueryOp {
    /// Pinned records first, most recently pinned first
    OrderByTop,

    /// Keep records of this subtype
    ScopeType(String),

    /// Keep records where any of `fields` contains `term` (case-insensitive).
    /// `term` is stored lowercased.
    Search { fields: Vec<String>, term: String },

    /// Order by a field
    OrderBy {
        field: String,
        direction: SortDirection,
    },

    /// Keep records whose status is in scope
    Status(StatusScope),

    /// Soft-delete handling
    Trash(TrashScope),
}

impl QueryOp {
    /// Whether the op restricts rows (as opposed to ordering them)
    pub fn is_filter(&self) -> bool {
        !matches!(self, QueryOp::OrderByTop | QueryOp::OrderBy { .. })
    }
}

/// The ordered operations produced for one list request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
    ops: Vec<QueryOp>,
}

impl QueryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: QueryOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[QueryOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Restricting ops, in plan order
    pub fn filters(&self) -> impl Iterator<Item = &QueryOp> {
        self.ops.iter().filter(|op| op.is_filter())
    }

    /// Ordering ops, in priority order
    pub fn orderings(&self) -> impl Iterator<Item = &QueryOp> {
        self.ops.iter().filter(|op| !op.is_filter())
    }

    /// Effective trash handling; the last trash op wins, default excludes trash
    pub fn trash_scope(&self) -> Option<TrashScope> {
        self.ops.iter().rev().find_map(|op| match op {
            QueryOp::Trash(scope) => Some(*scope),
            _ => None,
        })
    }
}

impl FromIterator<QueryOp> for QueryPlan {
    fn from_iter<I: IntoIterator<Item = QueryOp>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}
