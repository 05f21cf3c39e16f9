//! Hosted table source
//!
//! Reads tables from a PostgREST-style backend:
//! `GET {base}/rest/v1/{table}?select=*` with the project key sent both as
//! `apikey` and as a bearer token. No timeout is applied on this path.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{StoreError, StoreResult, Table, TableSource};

/// REST-backed table source
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> StoreResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// URL for a full-table select
    pub fn table_url(&self, table: Table) -> String {
        format!(
            "{}/rest/v1/{}?select=*",
            self.base_url.trim_end_matches('/'),
            table.name()
        )
    }
}

#[async_trait]
impl TableSource for RestStore {
    fn name(&self) -> &str {
        "rest"
    }

    async fn select_all(&self, table: Table) -> StoreResult<Vec<Value>> {
        let response = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::QueryFailed(format!(
                "{} returned {}: {}",
                table, status, text
            )));
        }

        match response.json::<Value>().await? {
            Value::Array(rows) => Ok(rows),
            other => Err(StoreError::QueryFailed(format!(
                "{} returned a non-array payload: {}",
                table, other
            ))),
        }
    }
}
