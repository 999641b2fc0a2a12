//! HTTP adapter for loading a measured-distance dataset.
//!
//! One-shot load: on success every later lookup is a synchronous table
//! hit; on failure the caller holds no table and table-sourced pairs stay
//! unknown.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::table::{DistanceTable, TableError};

#[derive(Debug, Clone)]
pub struct RemoteTableConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for RemoteTableConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/distances.json".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum RemoteTableError {
    #[error("distance dataset request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// One record of the remote dataset: a measured distance between two
/// named cities in kilometers.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceRecord {
    pub from: String,
    pub to: String,
    pub km: f64,
}

#[derive(Debug, Clone)]
pub struct RemoteTableClient {
    config: RemoteTableConfig,
    client: reqwest::blocking::Client,
}

impl RemoteTableClient {
    pub fn new(config: RemoteTableConfig) -> Result<Self, RemoteTableError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Fetch the dataset and fold it into a table.
    ///
    /// Records go through the same validating, min-merging insert as any
    /// other table construction, so duplicate pairs resolve to the minimum
    /// and a negative distance in the dataset fails the whole load.
    pub fn load(&self) -> Result<DistanceTable, RemoteTableError> {
        let records = self
            .client
            .get(&self.config.url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<DistanceRecord>>())
            .inspect_err(|err| warn!(%err, url = %self.config.url, "distance dataset load failed"))?;

        Ok(table_from_records(&records)?)
    }
}

/// Fold parsed dataset records into a table.
pub fn table_from_records(records: &[DistanceRecord]) -> Result<DistanceTable, TableError> {
    let mut table = DistanceTable::new();
    for record in records {
        table.insert(&record.from, &record.to, record.km)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_fold_into_a_min_merged_table() {
        let records: Vec<DistanceRecord> = serde_json::from_str(
            r#"[
                {"from": "Berlin", "to": "Prague", "km": 350.0},
                {"from": "Prague", "to": "Berlin", "km": 349.0},
                {"from": "Berlin", "to": "Hamburg", "km": 289.0}
            ]"#,
        )
        .unwrap();

        let table = table_from_records(&records).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Berlin", "Prague"), Some(349.0));
        assert_eq!(table.get("Hamburg", "Berlin"), Some(289.0));
    }

    #[test]
    fn negative_record_fails_the_load() {
        let records = vec![DistanceRecord {
            from: "A".to_string(),
            to: "B".to_string(),
            km: -5.0,
        }];
        assert!(table_from_records(&records).is_err());
    }
}
