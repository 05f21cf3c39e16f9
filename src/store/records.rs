//! Table records
//!
//! Raw rows as stored. Column names follow the hosted tables exactly,
//! including their mixed casing. Every field is optional: a missing column or
//! a value of the wrong type decodes as `None` rather than failing the row.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{Table, TableRecord};

/// Row of `monthly_comparison`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyComparisonRecord {
    #[serde(rename = "Month", default, deserialize_with = "lenient_text")]
    pub month: Option<String>,

    #[serde(rename = "This_year", default, deserialize_with = "lenient_number")]
    pub this_year: Option<f64>,

    #[serde(rename = "Last_year", default, deserialize_with = "lenient_number")]
    pub last_year: Option<f64>,
}

impl TableRecord for MonthlyComparisonRecord {
    const TABLE: Table = Table::MonthlyComparison;
}

/// Row of `sales_data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub web_sales: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub offline_sales: Option<f64>,
}

impl TableRecord for SalesRecord {
    const TABLE: Table = Table::SalesData;
}

/// Row of `product_data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,

    #[serde(rename = "Product", default, deserialize_with = "lenient_text")]
    pub product: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub sold_amount: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub unit_price: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub revenue: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
}

impl TableRecord for ProductRecord {
    const TABLE: Table = Table::ProductData;
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(d)?.as_f64())
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(Value::deserialize(d)?.as_i64())
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_monthly_record_columns() {
        let record: MonthlyComparisonRecord = serde_json::from_value(json!({
            "id": 1,
            "Month": "Jan",
            "This_year": 120.5,
            "Last_year": 90
        }))
        .unwrap();
        assert_eq!(record.month.as_deref(), Some("Jan"));
        assert_eq!(record.this_year, Some(120.5));
        assert_eq!(record.last_year, Some(90.0));
    }

    #[test]
    fn test_wrong_types_decode_as_none() {
        let record: ProductRecord = serde_json::from_value(json!({
            "Product": 42,
            "sold_amount": "many",
            "unit_price": null,
            "revenue": 1000,
        }))
        .unwrap();
        assert_eq!(record.product, None);
        assert_eq!(record.sold_amount, None);
        assert_eq!(record.unit_price, None);
        assert_eq!(record.revenue, Some(1000.0));
        assert_eq!(record.rating, None);
    }

    #[test]
    fn test_missing_columns_default() {
        let record: SalesRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record, SalesRecord::default());
    }
}
