//! SQL rendering of query plans using SeaQuery
//!
//! Generates the PostgreSQL page and count queries for a [`QueryPlan`]:
//! - case-insensitive `LIKE` search with escaped wildcards
//! - status, type and trash filters
//! - ordering with explicit NULL placement (NULL sorts lowest)
//! - pagination

use crate::core::filter::SortDirection;
use crate::core::plan::{QueryOp, QueryPlan, TrashScope};
use crate::core::query::PageRequest;
use sea_query::{
    Alias, Asterisk, Cond, Condition, Expr, Func, NullOrdering, Order, PostgresQueryBuilder,
    Query, SelectStatement,
};

const DELETED_AT: &str = "deleted_at";

/// Renders one plan against one table
///
/// Field names come from validated allow-lists and are always quoted as
/// identifiers; search terms and statuses are rendered as literals.
pub struct SqlListQuery<'a> {
    plan: &'a QueryPlan,
    table: String,
}

impl<'a> SqlListQuery<'a> {
    pub fn new(plan: &'a QueryPlan, table: impl Into<String>) -> Self {
        Self {
            plan,
            table: table.into(),
        }
    }

    /// Build the SELECT for one page
    pub fn build(&self, page: &PageRequest) -> String {
        let mut query = Query::select();
        query.column(Asterisk).from(Alias::new(&self.table));

        self.add_filters(&mut query);
        self.add_orderings(&mut query);

        // OFFSET/LIMIT are bigint in PostgreSQL
        query.limit(bigint(page.per_page));
        query.offset(bigint(page.offset()));

        query.to_string(PostgresQueryBuilder)
    }

    /// Build a COUNT over the same filters
    pub fn build_count(&self) -> String {
        let mut query = Query::select();
        query
            .expr(Expr::col(Asterisk).count())
            .from(Alias::new(&self.table));

        self.add_filters(&mut query);

        query.to_string(PostgresQueryBuilder)
    }

    fn add_filters(&self, query: &mut SelectStatement) {
        if let Some(condition) = self.filter_condition() {
            query.cond_where(condition);
        }
    }

    /// All filters joined with AND; `None` when nothing restricts rows
    fn filter_condition(&self) -> Option<Condition> {
        let mut condition = Cond::all();
        let mut restricted = false;

        for op in self.plan.filters() {
            condition = match op {
                QueryOp::ScopeType(entity_type) => {
                    condition.add(Expr::col(Alias::new("type")).eq(entity_type.as_str()))
                }
                QueryOp::Search { fields, term } => {
                    let pattern = format!("%{}%", escape_like_wildcards(term));
                    let any_field = fields.iter().fold(Cond::any(), |any, field| {
                        any.add(
                            Expr::expr(Func::lower(Expr::col(Alias::new(field))))
                                .like(pattern.as_str()),
                        )
                    });
                    condition.add(any_field)
                }
                QueryOp::Status(scope) => condition.add(
                    Expr::col(Alias::new("status")).is_in(scope.statuses().iter().copied()),
                ),
                QueryOp::Trash(TrashScope::WithoutTrashed) => {
                    condition.add(Expr::col(Alias::new(DELETED_AT)).is_null())
                }
                QueryOp::Trash(TrashScope::OnlyTrashed) => {
                    condition.add(Expr::col(Alias::new(DELETED_AT)).is_not_null())
                }
                QueryOp::Trash(TrashScope::WithTrashed)
                | QueryOp::OrderByTop
                | QueryOp::OrderBy { .. } => continue,
            };
            restricted = true;
        }

        restricted.then_some(condition)
    }

    fn add_orderings(&self, query: &mut SelectStatement) {
        for op in self.plan.orderings() {
            match op {
                QueryOp::OrderByTop => {
                    query.order_by_with_nulls(Alias::new("top"), Order::Desc, NullOrdering::Last);
                }
                QueryOp::OrderBy { field, direction } => {
                    let (order, nulls) = match direction {
                        SortDirection::Asc => (Order::Asc, NullOrdering::First),
                        SortDirection::Desc => (Order::Desc, NullOrdering::Last),
                    };
                    query.order_by_with_nulls(Alias::new(field), order, nulls);
                }
                _ => {}
            }
        }
    }
}

fn bigint(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX).min(i64::MAX as u64)
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
