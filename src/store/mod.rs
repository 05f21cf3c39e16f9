//! Relational Data Access
//!
//! Full-table reads of the three dashboard tables. Backends implement
//! [`TableSource`] and return raw JSON rows; [`DataAccessor`] decodes them into
//! typed records and reports an empty table as its own outcome.
//!
//! ## Tables
//!
//! - `monthly_comparison` - this year vs last year by month
//! - `sales_data` - web and offline sales by time
//! - `product_data` - per-product sales and rating

mod error;
mod records;
mod rest;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use records::{MonthlyComparisonRecord, ProductRecord, SalesRecord};
pub use rest::RestStore;
pub use sqlite::{SeedSummary, SqliteStore};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::config::{StoreBackend, StoreConfig};

/// The known tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    MonthlyComparison,
    SalesData,
    ProductData,
}

impl Table {
    /// Table name in the backend
    pub fn name(&self) -> &'static str {
        match self {
            Table::MonthlyComparison => "monthly_comparison",
            Table::SalesData => "sales_data",
            Table::ProductData => "product_data",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A backend able to read whole tables
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Every row of `table`, unfiltered and unordered, as JSON objects
    async fn select_all(&self, table: Table) -> StoreResult<Vec<Value>>;
}

/// A record type bound to one table
pub trait TableRecord: DeserializeOwned + Default + Send {
    const TABLE: Table;
}

/// Outcome of a successful read
///
/// `Rows` always holds at least one row; an empty table is `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRows<R> {
    Rows(Vec<R>),
    Empty,
}

impl<R> TableRows<R> {
    pub fn from_rows(rows: Vec<R>) -> Self {
        if rows.is_empty() {
            TableRows::Empty
        } else {
            TableRows::Rows(rows)
        }
    }
}

/// Typed reads over a table source
#[derive(Clone)]
pub struct DataAccessor {
    source: Arc<dyn TableSource>,
}

impl DataAccessor {
    pub fn new(source: Arc<dyn TableSource>) -> Self {
        Self { source }
    }

    /// Build the configured backend
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        let source: Arc<dyn TableSource> = match config.backend {
            StoreBackend::Sqlite => Arc::new(SqliteStore::open(Path::new(&config.sqlite_path))?),
            StoreBackend::Rest => {
                if config.rest_url.is_empty() {
                    return Err(StoreError::QueryFailed(
                        "store.rest_url is required for the rest backend".to_string(),
                    ));
                }
                Arc::new(RestStore::new(&config.rest_url, &config.rest_api_key)?)
            }
        };
        Ok(Self::new(source))
    }

    /// Name of the backend behind this accessor
    pub fn backend(&self) -> &str {
        self.source.name()
    }

    /// Read every row of `R`'s table
    ///
    /// Rows that are not JSON objects decode to an all-empty record so that
    /// row positions are preserved.
    pub async fn read<R: TableRecord>(&self) -> StoreResult<TableRows<R>> {
        tracing::debug!(table = %R::TABLE, source = self.source.name(), "Reading table");

        let raw = self.source.select_all(R::TABLE).await?;
        if raw.is_empty() {
            tracing::info!(table = %R::TABLE, "Table is empty");
            return Ok(TableRows::Empty);
        }

        let rows = raw
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                serde_json::from_value(row).unwrap_or_else(|e| {
                    tracing::warn!(table = %R::TABLE, row = idx, "Malformed row: {}", e);
                    R::default()
                })
            })
            .collect::<Vec<R>>();

        tracing::debug!(table = %R::TABLE, rows = rows.len(), "Read table");
        Ok(TableRows::from_rows(rows))
    }
}
