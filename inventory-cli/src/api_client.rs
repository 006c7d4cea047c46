use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::inventory::ComponentRecord;

/// Blocking client for the inventory proxy
#[derive(Clone)]
pub struct InventoryClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl InventoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Fetch the full inventory: a JSON array of nested component records.
    /// Issued once on startup; there is no retry or caching here.
    pub fn fetch_inventory(&self) -> Result<Vec<ComponentRecord>> {
        let url = format!("{}/api/inventory", self.base_url);
        debug!(target: "api", "GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("request to {} failed", url))?;

        if !response.status().is_success() {
            bail!("inventory request failed with status {}", response.status());
        }

        let records: Vec<ComponentRecord> = response
            .json()
            .context("inventory payload is not a JSON array of component records")?;
        debug!(target: "api", "received {} component records", records.len());
        Ok(records)
    }
}
