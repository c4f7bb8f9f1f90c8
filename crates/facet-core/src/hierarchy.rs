//! Service seams for hierarchy reads and catalog writes.
//!
//! The attachment engine never talks HTTP directly; it consumes these two
//! capabilities. The production implementation backs them with the Dataplex
//! and BigQuery REST surfaces, and tests back them with scripted in-memory
//! fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resource::DatasetPath;

/// Resource type tag for assets backed by a BigQuery dataset.
///
/// Only assets carrying this tag are descended into for table and column
/// discovery.
pub const BIGQUERY_DATASET: &str = "BIGQUERY_DATASET";

/// A zone within a lake, as returned by the zone listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Full resource name, `projects/.../lakes/.../zones/{id}`.
    pub name: String,
}

impl Zone {
    /// Returns the trailing zone id of the resource name.
    #[must_use]
    pub fn zone_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// An asset within a zone, as returned by the asset listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    /// Full resource name, `projects/.../zones/.../assets/{id}`.
    pub name: String,
    /// What the asset catalogs.
    #[serde(default)]
    pub resource_spec: ResourceSpec,
}

impl AssetSummary {
    /// Returns the trailing asset id of the resource name.
    #[must_use]
    pub fn asset_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// The underlying resource an asset points at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    /// Resource type tag, e.g. [`BIGQUERY_DATASET`] or `STORAGE_BUCKET`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Reference to the underlying resource,
    /// `//bigquery.googleapis.com/projects/{p}/datasets/{d}` for datasets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

/// Read access to the lake → zone → asset → table → column hierarchy.
///
/// All listings return complete results; implementations follow pagination
/// internally. `list_zones` returns `Error::ResourceNotFound` when the lake
/// itself is absent — the one listing failure the walker treats as fatal.
#[async_trait]
pub trait HierarchyReader: Send + Sync {
    /// Lists the zones of a lake.
    async fn list_zones(&self, lake_id: &str) -> Result<Vec<Zone>>;

    /// Lists the assets of a zone, addressed by full zone resource name.
    async fn list_assets(&self, zone_name: &str) -> Result<Vec<AssetSummary>>;

    /// Lists the table ids of a dataset.
    ///
    /// Returns `Error::ResourceNotFound` when the dataset is absent.
    async fn list_tables(&self, dataset: &DatasetPath) -> Result<Vec<String>>;

    /// Lists the column names of a table's schema.
    async fn list_columns(&self, dataset: &DatasetPath, table_id: &str) -> Result<Vec<String>>;
}

/// Raw outcome of a patch against the catalog write surface.
///
/// Interpretation (success vs failure, message extraction) happens in the
/// attacher so fakes only have to script a status and a body.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    /// HTTP status code of the response.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl PatchOutcome {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Write access to catalog entries.
#[async_trait]
pub trait CatalogWriter: Send + Sync {
    /// Issues a partial update against an entry resource name.
    ///
    /// Implementations return `Ok` with the response status and body even
    /// for non-success statuses; `Err` is reserved for requests that could
    /// not be issued at all.
    async fn patch_entry(&self, entry_name: &str, payload: &serde_json::Value)
        -> Result<PatchOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_and_asset_ids_come_from_resource_names() {
        let zone = Zone {
            name: "projects/p/locations/l/lakes/lk/zones/raw".to_string(),
        };
        assert_eq!(zone.zone_id(), "raw");

        let asset = AssetSummary {
            name: "projects/p/locations/l/lakes/lk/zones/raw/assets/sales".to_string(),
            resource_spec: ResourceSpec::default(),
        };
        assert_eq!(asset.asset_id(), "sales");
    }

    #[test]
    fn resource_spec_deserializes_the_wire_shape() {
        let spec: ResourceSpec = serde_json::from_str(
            r#"{"type": "BIGQUERY_DATASET", "resource": "//bigquery.googleapis.com/projects/p/datasets/d"}"#,
        )
        .unwrap();
        assert_eq!(spec.resource_type.as_deref(), Some(BIGQUERY_DATASET));
        assert!(spec.resource.is_some());
    }

    #[test]
    fn patch_outcome_success_window() {
        assert!(PatchOutcome { status: 200, body: String::new() }.is_success());
        assert!(PatchOutcome { status: 204, body: String::new() }.is_success());
        assert!(!PatchOutcome { status: 403, body: String::new() }.is_success());
        assert!(!PatchOutcome { status: 500, body: String::new() }.is_success());
    }
}
