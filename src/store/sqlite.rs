//! SQLite table source
//!
//! Local stand-in for the hosted backend. Rows are read with a plain
//! `SELECT *` and handed up as JSON objects keyed by column name, so decoding
//! is shared with the REST source.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use rusqlite::{types::ValueRef, Connection, OpenFlags};
use serde_json::{Map, Number, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{StoreError, StoreResult, Table, TableSource};

/// SQLite-backed table source
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run one or more SQL statements
    pub async fn execute_batch(&self, sql: &str) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Create the three dashboard tables if they are missing
    pub async fn create_schema(&self) -> StoreResult<()> {
        self.execute_batch(SCHEMA).await
    }

    /// Create the schema and replace its contents with demo rows
    pub async fn seed_demo(&self) -> StoreResult<SeedSummary> {
        let mut conn = self.conn.lock().await;
        conn.execute_batch(SCHEMA)?;

        let tx = conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM monthly_comparison; DELETE FROM sales_data; DELETE FROM product_data;",
        )?;

        let months = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO monthly_comparison (\"Month\", \"This_year\", \"Last_year\")
                 VALUES (?, ?, ?)",
            )?;
            for (i, month) in months.iter().enumerate() {
                let last_year = 4_000.0 + 350.0 * i as f64;
                let this_year = last_year * 1.12 + if i % 3 == 0 { -200.0 } else { 150.0 };
                stmt.execute(rusqlite::params![month, this_year, last_year])?;
            }
        }

        let sales_rows = 15;
        let first_slot = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|day| day.and_hms_opt(8, 30, 0))
            .ok_or_else(|| StoreError::QueryFailed("invalid seed start time".to_string()))?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO sales_data (date, web_sales, offline_sales) VALUES (?, ?, ?)",
            )?;
            for hour in 0..sales_rows {
                let date = (first_slot + Duration::hours(hour as i64))
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string();
                let web = 1_200 + 75 * hour as i64;
                let offline = 900 + 40 * ((hour * 7) % 5) as i64;
                stmt.execute(rusqlite::params![date, web, offline])?;
            }
        }

        let products: [(&str, i64, f64, f64); 6] = [
            ("Widget A", 1_250, 19.99, 4.6),
            ("Widget B", 830, 24.5, 4.2),
            ("Gadget Pro", 410, 129.0, 4.8),
            ("Gadget Mini", 1_975, 9.75, 3.9),
            ("Accessory Kit", 620, 14.25, 4.1),
            ("Service Plan", 95, 299.0, 4.4),
        ];
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO product_data (\"Product\", sold_amount, unit_price, revenue, rating)
                 VALUES (?, ?, ?, ?, ?)",
            )?;
            for (name, sold, price, rating) in products.iter() {
                let revenue = (*sold as f64 * price * 100.0).round() / 100.0;
                stmt.execute(rusqlite::params![name, sold, price, revenue, rating])?;
            }
        }

        tx.commit()?;

        let summary = SeedSummary {
            monthly_comparison: months.len(),
            sales_data: sales_rows,
            product_data: products.len(),
        };
        tracing::info!(?summary, "Seeded demo tables");
        Ok(summary)
    }
}

/// Row counts written by [`SqliteStore::seed_demo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub monthly_comparison: usize,
    pub sales_data: usize,
    pub product_data: usize,
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS monthly_comparison (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    "Month" TEXT,
    "This_year" REAL,
    "Last_year" REAL
);
CREATE TABLE IF NOT EXISTS sales_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT,
    web_sales REAL,
    offline_sales REAL
);
CREATE TABLE IF NOT EXISTS product_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    "Product" TEXT,
    sold_amount REAL,
    unit_price REAL,
    revenue REAL,
    rating REAL
);
"#;

#[async_trait]
impl TableSource for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn select_all(&self, table: Table) -> StoreResult<Vec<Value>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(&format!("SELECT * FROM \"{}\"", table.name()))?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut object = Map::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                object.insert(column.clone(), to_json(row.get_ref(idx)?));
            }
            out.push(Value::Object(object));
        }

        Ok(out)
    }
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Value::Null,
        ValueRef::Integer(i) => Value::Number(i.into()),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}
