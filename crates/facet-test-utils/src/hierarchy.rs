//! Scripted in-memory hierarchy with read recording.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use facet_core::{
    AssetSummary, DatasetPath, Error, HierarchyReader, ResourceSpec, Result, Zone,
    BIGQUERY_DATASET,
};

/// Record of a hierarchy read for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOp {
    /// Zones of a lake were listed.
    Zones {
        /// The lake that was listed.
        lake: String,
    },
    /// Assets of a zone were listed.
    Assets {
        /// Full zone resource name.
        zone: String,
    },
    /// Tables of a dataset were listed.
    Tables {
        /// `{project}.{dataset}` key.
        dataset: String,
    },
    /// Columns of a table were listed.
    Columns {
        /// `{project}.{dataset}.{table}` key.
        table: String,
    },
}

/// In-memory hierarchy scripted by the test, recording every read.
///
/// Built with the fluent helpers, then handed to the walker by reference.
#[derive(Debug, Clone, Default)]
pub struct FakeHierarchy {
    lake_exists: bool,
    zones: Vec<Zone>,
    assets: HashMap<String, Vec<AssetSummary>>,
    tables: HashMap<String, Vec<String>>,
    columns: HashMap<String, Vec<String>>,
    fail_asset_listings: HashSet<String>,
    fail_table_listings: HashSet<String>,
    operations: Arc<Mutex<Vec<ReadOp>>>,
}

impl FakeHierarchy {
    /// Creates an empty hierarchy whose lake exists.
    pub fn new() -> Self {
        Self {
            lake_exists: true,
            ..Self::default()
        }
    }

    /// Creates a hierarchy whose lake is absent: `list_zones` returns
    /// not-found.
    pub fn missing_lake() -> Self {
        Self::default()
    }

    /// Adds a zone.
    #[must_use]
    pub fn with_zone(mut self, zone_id: &str) -> Self {
        self.zones.push(Zone {
            name: zone_name(zone_id),
        });
        self
    }

    /// Adds a BigQuery-dataset asset to a zone, wired to the given dataset.
    #[must_use]
    pub fn with_dataset_asset(self, zone_id: &str, asset_id: &str, dataset: &DatasetPath) -> Self {
        self.with_asset(
            zone_id,
            asset_id,
            Some(BIGQUERY_DATASET),
            Some(&dataset.to_string()),
        )
    }

    /// Adds an asset with an explicit resource type and resource reference.
    #[must_use]
    pub fn with_asset(
        mut self,
        zone_id: &str,
        asset_id: &str,
        resource_type: Option<&str>,
        resource: Option<&str>,
    ) -> Self {
        self.assets
            .entry(zone_name(zone_id))
            .or_default()
            .push(AssetSummary {
                name: format!("{}/assets/{asset_id}", zone_name(zone_id)),
                resource_spec: ResourceSpec {
                    resource_type: resource_type.map(str::to_string),
                    resource: resource.map(str::to_string),
                },
            });
        self
    }

    /// Adds a table to a dataset.
    #[must_use]
    pub fn with_table(mut self, dataset: &DatasetPath, table_id: &str) -> Self {
        self.tables
            .entry(dataset_key(dataset))
            .or_default()
            .push(table_id.to_string());
        self
    }

    /// Sets the schema columns of a table.
    #[must_use]
    pub fn with_columns(mut self, dataset: &DatasetPath, table_id: &str, columns: &[&str]) -> Self {
        self.columns.insert(
            format!("{}.{table_id}", dataset_key(dataset)),
            columns.iter().map(|c| (*c).to_string()).collect(),
        );
        self
    }

    /// Makes the asset listing of a zone fail with a transport error.
    #[must_use]
    pub fn failing_assets(mut self, zone_id: &str) -> Self {
        self.fail_asset_listings.insert(zone_name(zone_id));
        self
    }

    /// Makes the table listing of a dataset fail with a transport error.
    #[must_use]
    pub fn failing_tables(mut self, dataset: &DatasetPath) -> Self {
        self.fail_table_listings.insert(dataset_key(dataset));
        self
    }

    /// Returns all recorded reads, in call order.
    pub fn operations(&self) -> Vec<ReadOp> {
        self.operations.lock().expect("lock").clone()
    }

    fn record(&self, op: ReadOp) {
        self.operations.lock().expect("lock").push(op);
    }
}

#[async_trait]
impl HierarchyReader for FakeHierarchy {
    async fn list_zones(&self, lake_id: &str) -> Result<Vec<Zone>> {
        self.record(ReadOp::Zones {
            lake: lake_id.to_string(),
        });
        if self.lake_exists {
            Ok(self.zones.clone())
        } else {
            Err(Error::resource_not_found("lake", lake_id))
        }
    }

    async fn list_assets(&self, zone_name: &str) -> Result<Vec<AssetSummary>> {
        self.record(ReadOp::Assets {
            zone: zone_name.to_string(),
        });
        if self.fail_asset_listings.contains(zone_name) {
            return Err(Error::transport(format!(
                "scripted failure listing assets of {zone_name}"
            )));
        }
        Ok(self.assets.get(zone_name).cloned().unwrap_or_default())
    }

    async fn list_tables(&self, dataset: &DatasetPath) -> Result<Vec<String>> {
        let key = dataset_key(dataset);
        self.record(ReadOp::Tables {
            dataset: key.clone(),
        });
        if self.fail_table_listings.contains(&key) {
            return Err(Error::transport(format!(
                "scripted failure listing tables of {key}"
            )));
        }
        self.tables
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::resource_not_found("dataset", key))
    }

    async fn list_columns(&self, dataset: &DatasetPath, table_id: &str) -> Result<Vec<String>> {
        let key = format!("{}.{table_id}", dataset_key(dataset));
        self.record(ReadOp::Columns { table: key.clone() });
        self.columns
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::resource_not_found("table", key))
    }
}

fn zone_name(zone_id: &str) -> String {
    format!("projects/test-project/locations/test-location/lakes/test-lake/zones/{zone_id}")
}

fn dataset_key(dataset: &DatasetPath) -> String {
    format!("{}.{}", dataset.project, dataset.dataset)
}
