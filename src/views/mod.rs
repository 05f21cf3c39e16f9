//! View-Model Adapters
//!
//! Pure mappings from raw API payloads and table records to the shapes each
//! dashboard widget displays. Nothing here performs I/O.

pub mod format;
mod sales_chart;
mod snapshot;
mod tables;
pub mod time_label;

pub use format::{format_number, plain_number};
pub use sales_chart::{sales_chart, SalesChartPoint, SALES_CHART_LIMIT};
pub use snapshot::{
    inventory_status, sales_overview, user_metrics, DisplayField, InventoryStatus,
    MetricSnapshot, SalesOverview, UserMetrics, NOT_AVAILABLE,
};
pub use tables::{
    monthly_comparison, product_performance, sales_table, MonthlyComparisonRow, ProductRow,
    SalesTableRow, SALES_TABLE_LIMIT,
};
pub use time_label::{time_label, time_label_of, UNKNOWN_LABEL};
