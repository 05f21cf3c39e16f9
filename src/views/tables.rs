//! Table-backed views
//!
//! Rows are numbered from 1 in source order. Missing text falls back to a
//! label, missing numbers to zero.

use serde::Serialize;

use super::time_label::UNKNOWN_LABEL;
use crate::store::{MonthlyComparisonRecord, ProductRecord, SalesRecord};

/// Rows shown in the sales table
pub const SALES_TABLE_LIMIT: usize = 10;

/// One month of this-year vs last-year figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyComparisonRow {
    pub id: usize,
    pub name: String,
    pub value: f64,
    pub previous_value: f64,
}

/// One row of the sales table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesTableRow {
    pub id: usize,
    pub date: String,
    pub web_sales: f64,
    pub offline_sales: f64,
}

/// One product's performance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub id: usize,
    pub product: String,
    pub sold_amount: f64,
    pub unit_price: f64,
    pub revenue: f64,
    pub rating: f64,
}

fn text_or(value: &Option<String>, fallback: impl FnOnce() -> String) -> String {
    match value {
        Some(s) if !s.is_empty() => s.clone(),
        _ => fallback(),
    }
}

fn number_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| !v.is_nan()).unwrap_or(0.0)
}

pub fn monthly_comparison(records: &[MonthlyComparisonRecord]) -> Vec<MonthlyComparisonRow> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let id = idx + 1;
            MonthlyComparisonRow {
                id,
                name: text_or(&record.month, || format!("Month {}", id)),
                value: number_or_zero(record.this_year),
                previous_value: number_or_zero(record.last_year),
            }
        })
        .collect()
}

pub fn sales_table(records: &[SalesRecord]) -> Vec<SalesTableRow> {
    records
        .iter()
        .take(SALES_TABLE_LIMIT)
        .enumerate()
        .map(|(idx, record)| SalesTableRow {
            id: idx + 1,
            date: text_or(&record.date, || UNKNOWN_LABEL.to_string()),
            web_sales: number_or_zero(record.web_sales),
            offline_sales: number_or_zero(record.offline_sales),
        })
        .collect()
}

pub fn product_performance(records: &[ProductRecord]) -> Vec<ProductRow> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let id = idx + 1;
            ProductRow {
                id,
                product: text_or(&record.product, || format!("Product {}", id)),
                sold_amount: number_or_zero(record.sold_amount),
                unit_price: number_or_zero(record.unit_price),
                revenue: number_or_zero(record.revenue),
                rating: number_or_zero(record.rating),
            }
        })
        .collect()
}
