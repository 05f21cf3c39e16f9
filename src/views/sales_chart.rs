//! Sales comparison chart series

use serde::Serialize;
use serde_json::Value;

use super::time_label::time_label_of;

/// Points plotted on the chart
pub const SALES_CHART_LIMIT: usize = 12;

/// One point of the web vs offline series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesChartPoint {
    pub date: String,
    pub web_sales: f64,
    pub offline_sales: f64,
}

/// Build the chart series from the sales comparison payload
///
/// Returns `None` when the payload is not a non-empty array.
pub fn sales_chart(payload: &Value) -> Option<Vec<SalesChartPoint>> {
    let items = payload.as_array().filter(|items| !items.is_empty())?;

    Some(
        items
            .iter()
            .take(SALES_CHART_LIMIT)
            .map(|item| SalesChartPoint {
                date: time_label_of(item.get("date")),
                web_sales: item.get("web_sales").and_then(Value::as_f64).unwrap_or(0.0),
                offline_sales: item
                    .get("offline_sales")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_takes_first_twelve() {
        let payload = Value::Array(
            (0..20)
                .map(|i| {
                    json!({
                        "date": format!("2024-05-01 {:02}:15:00", i),
                        "web_sales": i,
                        "offline_sales": 1
                    })
                })
                .collect(),
        );
        let points = sales_chart(&payload).unwrap();
        assert_eq!(points.len(), 12);
        assert_eq!(points[0].date, "00:15");
        assert_eq!(points[11].web_sales, 11.0);
    }

    #[test]
    fn test_labels_and_defaults() {
        let payload = json!([
            {"date": "2024-05-01 14:30:00", "web_sales": 120},
            {"date": "20240501", "offline_sales": 7.5},
            {"web_sales": "n/a"},
            "not an object"
        ]);
        let points = sales_chart(&payload).unwrap();
        assert_eq!(points[0].date, "14:30");
        assert_eq!(points[0].offline_sales, 0.0);
        assert_eq!(points[1].date, "20240501");
        assert_eq!(points[1].offline_sales, 7.5);
        assert_eq!(points[2].date, "Unknown");
        assert_eq!(points[2].web_sales, 0.0);
        assert_eq!(points[3].date, "Unknown");
    }

    #[test]
    fn test_empty_or_non_array_is_none() {
        assert!(sales_chart(&json!([])).is_none());
        assert!(sales_chart(&json!({"data": []})).is_none());
        assert!(sales_chart(&Value::Null).is_none());
    }
}
