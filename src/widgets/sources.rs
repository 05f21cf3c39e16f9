//! Widget data loaders
//!
//! One loader per widget. Each loader reports its own failure through the
//! notifier and hands back a typed result for the widget state.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::{WidgetError, WidgetKind};
use crate::config::Config;
use crate::notify::SharedNotifier;
use crate::remote::{ApiClient, Endpoint};
use crate::store::{
    DataAccessor, MonthlyComparisonRecord, ProductRecord, SalesRecord, TableRecord, TableRows,
};
use crate::views::{
    self, InventoryStatus, MonthlyComparisonRow, ProductRow, SalesChartPoint, SalesOverview,
    SalesTableRow, UserMetrics,
};

/// Everything the sales comparison panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesComparisonPanel {
    /// `None` when the API returned no usable series
    pub chart: Option<Vec<SalesChartPoint>>,
    pub table: Vec<SalesTableRow>,
    /// Unmodified API payload
    pub api_data: Value,
}

/// Loaded content of a panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PanelData {
    SalesOverview(SalesOverview),
    MonthlyComparison(Vec<MonthlyComparisonRow>),
    UserMetrics(UserMetrics),
    SalesComparison(SalesComparisonPanel),
    InventoryStatus(InventoryStatus),
    ProductPerformance(Vec<ProductRow>),
}

/// The API client, the table accessor and the toast sink, bundled
pub struct DataSources {
    api: Arc<ApiClient>,
    store: DataAccessor,
    notifier: SharedNotifier,
}

impl DataSources {
    pub fn new(api: Arc<ApiClient>, store: DataAccessor, notifier: SharedNotifier) -> Self {
        Self {
            api,
            store,
            notifier,
        }
    }

    /// Build both sources from configuration
    pub fn from_config(config: &Config, notifier: SharedNotifier) -> Result<Self, WidgetError> {
        let api = ApiClient::new(config.remote.clone(), Arc::clone(&notifier))?;
        let store = DataAccessor::from_config(&config.store)?;
        Ok(Self::new(Arc::new(api), store, notifier))
    }

    pub fn store(&self) -> &DataAccessor {
        &self.store
    }

    /// Run the loader for `kind`
    pub async fn load(&self, kind: WidgetKind) -> Result<PanelData, WidgetError> {
        match kind {
            WidgetKind::SalesOverview => self.sales_overview().await.map(PanelData::SalesOverview),
            WidgetKind::MonthlyComparison => self
                .monthly_comparison()
                .await
                .map(PanelData::MonthlyComparison),
            WidgetKind::UserMetrics => self.user_metrics().await.map(PanelData::UserMetrics),
            WidgetKind::SalesComparison => self
                .sales_comparison()
                .await
                .map(PanelData::SalesComparison),
            WidgetKind::InventoryStatus => self
                .inventory_status()
                .await
                .map(PanelData::InventoryStatus),
            WidgetKind::ProductPerformance => self
                .product_performance()
                .await
                .map(PanelData::ProductPerformance),
        }
    }

    pub async fn sales_overview(&self) -> Result<SalesOverview, WidgetError> {
        let payload = self
            .remote(Endpoint::SalesOverview, "Failed to fetch sales overview data")
            .await?;
        Ok(views::sales_overview(payload))
    }

    pub async fn user_metrics(&self) -> Result<UserMetrics, WidgetError> {
        let payload = self
            .remote(Endpoint::UserMetrics, "Failed to fetch user metrics data")
            .await?;
        Ok(views::user_metrics(payload))
    }

    pub async fn inventory_status(&self) -> Result<InventoryStatus, WidgetError> {
        let payload = self
            .remote(Endpoint::InventoryStatus, "Failed to fetch inventory status data")
            .await?;
        Ok(views::inventory_status(payload))
    }

    pub async fn monthly_comparison(&self) -> Result<Vec<MonthlyComparisonRow>, WidgetError> {
        let records = self
            .table::<MonthlyComparisonRecord>(
                "monthly comparison",
                "Failed to fetch monthly comparison data",
            )
            .await?;
        Ok(views::monthly_comparison(&records))
    }

    pub async fn product_performance(&self) -> Result<Vec<ProductRow>, WidgetError> {
        let records = self
            .table::<ProductRecord>(
                "product performance",
                "Failed to fetch product performance data",
            )
            .await?;
        Ok(views::product_performance(&records))
    }

    /// Chart from the API and table from the store, fetched together
    ///
    /// Both sources always run to completion and report their own failures.
    /// The panel fails if either source fails. An unusable chart payload only
    /// drops the chart.
    pub async fn sales_comparison(&self) -> Result<SalesComparisonPanel, WidgetError> {
        let (api_data, records) = tokio::join!(
            self.remote(Endpoint::SalesComparison, "Failed to fetch sales comparison data"),
            self.table::<SalesRecord>("sales data table", "Failed to fetch sales data for table"),
        );
        let (api_data, records) = (api_data?, records?);

        let chart = views::sales_chart(&api_data);
        if chart.is_none() {
            tracing::warn!("Empty or invalid response from sales comparison data");
            self.notifier.warning("No data available for sales comparison chart");
        }

        Ok(SalesComparisonPanel {
            chart,
            table: views::sales_table(&records),
            api_data,
        })
    }

    async fn remote(&self, endpoint: Endpoint, failure: &str) -> Result<Value, WidgetError> {
        self.api.fetch(endpoint).await.map_err(|e| {
            self.notifier.error(failure);
            WidgetError::Remote(e)
        })
    }

    /// Rows of `R`'s table; an empty table and a failed query both notify
    /// "No data available for {what}" followed by `failure`
    async fn table<R: TableRecord>(
        &self,
        what: &str,
        failure: &str,
    ) -> Result<Vec<R>, WidgetError> {
        let no_data = format!("No data available for {}", what);
        let err = match self.store.read::<R>().await {
            Ok(TableRows::Rows(rows)) => return Ok(rows),
            Ok(TableRows::Empty) => WidgetError::NoData(no_data.clone()),
            Err(e) => {
                tracing::error!(table = %R::TABLE, error = %e, "Error fetching table");
                WidgetError::Store(e)
            }
        };

        self.notifier.error(&no_data);
        self.notifier.error(failure);
        Err(err)
    }
}
