//! Metric snapshots
//!
//! Sales overview, user metrics and inventory status are passed through from
//! the API as loose objects. Each view picks out the fields it knows and
//! renders "N/A" for whatever is missing.

use serde::Serialize;
use serde_json::{Map, Value};

use super::format::{format_number, plain_number};
use crate::remote::envelope::is_truthy;

/// Placeholder for a missing field
pub const NOT_AVAILABLE: &str = "N/A";

/// Schema-less bag of metric fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricSnapshot(Map<String, Value>);

impl MetricSnapshot {
    /// Wrap an API payload; anything but an object yields an empty snapshot
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            other => {
                tracing::warn!("Expected an object payload, got {}", kind_of(&other));
                Self::default()
            }
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A labelled value ready to print
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayField {
    pub label: &'static str,
    pub value: String,
}

impl DisplayField {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// Localized count; zero is shown, absence is "N/A"
fn count_or_na(value: Option<f64>) -> String {
    value
        .map(format_number)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Raw field that renders "N/A" when missing or zero
fn truthy_or_na(snapshot: &MetricSnapshot, key: &str) -> String {
    match snapshot.get(key) {
        Some(value) if is_truthy(value) => match value {
            Value::Number(n) => n.as_f64().map(plain_number).unwrap_or_else(|| n.to_string()),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Percentage that defaults to zero
fn percent(value: Option<f64>) -> String {
    format!("{}%", plain_number(value.unwrap_or(0.0)))
}

/// Sales overview card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesOverview {
    pub total_sales: Option<f64>,
    pub growth: Option<f64>,
    pub top_product: Option<String>,
    pub raw: MetricSnapshot,
}

pub fn sales_overview(payload: Value) -> SalesOverview {
    let raw = MetricSnapshot::from_value(payload);
    SalesOverview {
        total_sales: raw.number("totalSales"),
        growth: raw.number("growth"),
        top_product: raw.text("topProduct"),
        raw,
    }
}

impl SalesOverview {
    pub fn fields(&self) -> Vec<DisplayField> {
        vec![
            DisplayField::new("Total Sales", format!("${}", count_or_na(self.total_sales))),
            DisplayField::new("Growth", percent(self.growth)),
            DisplayField::new(
                "Top Product",
                self.top_product
                    .clone()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ),
        ]
    }
}

/// User metrics card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserMetrics {
    pub active_users: Option<f64>,
    pub new_users: Option<f64>,
    pub retention_rate: Option<f64>,
    pub raw: MetricSnapshot,
}

pub fn user_metrics(payload: Value) -> UserMetrics {
    let raw = MetricSnapshot::from_value(payload);
    UserMetrics {
        active_users: raw.number("activeUsers"),
        new_users: raw.number("newUsers"),
        retention_rate: raw.number("retentionRate"),
        raw,
    }
}

impl UserMetrics {
    pub fn fields(&self) -> Vec<DisplayField> {
        vec![
            DisplayField::new("Active Users", count_or_na(self.active_users)),
            DisplayField::new("New Users", count_or_na(self.new_users)),
            DisplayField::new("Retention Rate", percent(self.retention_rate)),
        ]
    }
}

/// Inventory status card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryStatus {
    pub inventory_items: Option<f64>,
    pub low_stock_items: Option<f64>,
    pub out_of_stock_items: Option<f64>,
    pub raw: MetricSnapshot,
}

pub fn inventory_status(payload: Value) -> InventoryStatus {
    let raw = MetricSnapshot::from_value(payload);
    InventoryStatus {
        inventory_items: raw.number("inventoryItems"),
        low_stock_items: raw.number("lowStockItems"),
        out_of_stock_items: raw.number("outOfStockItems"),
        raw,
    }
}

impl InventoryStatus {
    pub fn fields(&self) -> Vec<DisplayField> {
        vec![
            DisplayField::new("Total Items", count_or_na(self.inventory_items)),
            DisplayField::new("Low Stock", truthy_or_na(&self.raw, "lowStockItems")),
            DisplayField::new("Out of Stock", truthy_or_na(&self.raw, "outOfStockItems")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sales_overview_end_to_end_values() {
        let view = sales_overview(json!({
            "totalSales": 50000,
            "growth": 12,
            "topProduct": "Widget A"
        }));
        assert_eq!(view.total_sales, Some(50000.0));
        assert_eq!(view.growth, Some(12.0));
        assert_eq!(view.top_product.as_deref(), Some("Widget A"));

        let fields = view.fields();
        assert_eq!(fields[0].value, "$50,000");
        assert_eq!(fields[1].value, "12%");
        assert_eq!(fields[2].value, "Widget A");
    }

    #[test]
    fn test_sales_overview_missing_fields() {
        let view = sales_overview(json!({}));
        let values: Vec<_> = view.fields().into_iter().map(|f| f.value).collect();
        assert_eq!(values, vec!["$N/A", "0%", "N/A"]);
    }

    #[test]
    fn test_non_object_payload_is_empty_snapshot() {
        let view = user_metrics(json!([1, 2, 3]));
        assert!(view.raw.is_empty());
        let values: Vec<_> = view.fields().into_iter().map(|f| f.value).collect();
        assert_eq!(values, vec!["N/A", "N/A", "0%"]);
    }

    #[test]
    fn test_user_metrics_formatting() {
        let view = user_metrics(json!({
            "activeUsers": 12500,
            "newUsers": 0,
            "retentionRate": 87.5
        }));
        let values: Vec<_> = view.fields().into_iter().map(|f| f.value).collect();
        assert_eq!(values, vec!["12,500", "0", "87.5%"]);
    }

    #[test]
    fn test_inventory_zero_counts_render_na() {
        let view = inventory_status(json!({
            "inventoryItems": 4200,
            "lowStockItems": 0,
            "outOfStockItems": 3
        }));
        let values: Vec<_> = view.fields().into_iter().map(|f| f.value).collect();
        assert_eq!(values, vec!["4,200", "N/A", "3"]);
    }

    #[test]
    fn test_wrongly_typed_fields_are_absent() {
        let view = sales_overview(json!({"totalSales": "lots", "topProduct": 7}));
        assert_eq!(view.total_sales, None);
        assert_eq!(view.top_product, None);
    }

    #[test]
    fn test_adapter_is_idempotent() {
        let payload = json!({"activeUsers": 10, "extra": {"nested": true}});
        assert_eq!(user_metrics(payload.clone()), user_metrics(payload));
    }
}
