//! PostgreSQL list source using sqlx.
//!
//! Renders each plan with [`SqlListQuery`] and decodes rows through
//! `row_to_json`, so any `Listable` with a serde shape matching its table
//! can be listed without a hand-written row mapping.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! listable = { version = "0.1", features = ["postgres"] }
//! ```

use crate::core::entity::Listable;
use crate::core::error::StorageError;
use crate::core::plan::QueryPlan;
use crate::core::query::{PageRequest, ResultPage};
use crate::core::service::ListSource;
use crate::storage::sql::SqlListQuery;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sqlx::PgPool;

/// List source backed by one PostgreSQL table
#[derive(Clone, Debug)]
pub struct PostgresListSource<T> {
    pool: PgPool,
    table: String,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Listable> PostgresListSource<T> {
    /// Source reading the entity's resource table (e.g. `posts`)
    pub fn new(pool: PgPool) -> Self {
        Self::with_table(pool, T::resource_name())
    }

    /// Source reading an explicitly named table
    pub fn with_table(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
            _marker: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<T> ListSource<T> for PostgresListSource<T>
where
    T: Listable + DeserializeOwned,
{
    async fn fetch(
        &self,
        plan: &QueryPlan,
        page: &PageRequest,
    ) -> Result<ResultPage<T>, StorageError> {
        let query = SqlListQuery::new(plan, self.table.as_str());

        // Count and page read the same snapshot
        let mut tx = self.pool.begin().await?;

        let count_sql = query.build_count();
        let total: i64 = sqlx::query_scalar(&count_sql).fetch_one(&mut *tx).await?;

        let main_sql = query.build(page);
        let rows: Vec<serde_json::Value> =
            sqlx::query_scalar(&format!("SELECT row_to_json(t) FROM ({main_sql}) t"))
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;

        tracing::debug!(
            table = %self.table,
            total,
            rows = rows.len(),
            "Fetched list page"
        );

        let data = rows
            .into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|e| StorageError::Decode {
                    entity_type: T::resource_name_singular().to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<T>, _>>()?;

        Ok(ResultPage::new(data, *page, total.max(0) as usize))
    }
}
