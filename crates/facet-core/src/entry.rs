//! Canonical entry ids and entry resource names.
//!
//! This module is the single source of truth for entry naming. All writers
//! must build entry resource names through [`EntryPaths`]; no hardcoded name
//! strings should exist outside this module.
//!
//! # Name Layout
//!
//! ```text
//! entry id:    bigquery.googleapis.com/projects/{project}/datasets/{dataset}[/tables/{table}]
//! entry name:  projects/{project}/locations/{location}/entryGroups/{group}/entries/{encoded id}
//! lake path:   projects/{project}/locations/{location}/lakes/{lake}
//! aspect key:  {project}.{location}.{aspect id}
//! ```
//!
//! The entry id is percent-encoded when embedded in an entry name. The write
//! API accepts literal slashes inside these ids, so `/` stays unescaped and
//! every other byte outside the unreserved set is encoded. Builders are pure
//! functions of their input, which is what makes re-runs patch the same
//! entry name byte for byte.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::CatalogConfig;
use crate::resource::DatasetPath;

/// Bytes escaped in entry ids: everything except unreserved characters
/// (`A-Z a-z 0-9 _ . - ~`) and the slash.
const ENTRY_ID_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Source system prefix on BigQuery entry ids.
const BIGQUERY_SOURCE: &str = "bigquery.googleapis.com";

/// Canonical name generator for catalog entries.
///
/// Constructed once from [`CatalogConfig`] and shared for the run.
///
/// # Example
///
/// ```
/// use facet_core::{CatalogConfig, DatasetPath, EntryPaths};
///
/// let config = CatalogConfig::new("acme-project", "us-central1");
/// let paths = EntryPaths::new(&config);
/// let dataset = DatasetPath::new("acme-project", "sales");
///
/// assert_eq!(
///     paths.dataset_entry_id(&dataset),
///     "bigquery.googleapis.com/projects/acme-project/datasets/sales"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct EntryPaths {
    project_id: String,
    location: String,
    entry_group: String,
}

impl EntryPaths {
    /// Creates a name generator for the configured project, location, and
    /// entry group.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            project_id: config.project_id.clone(),
            location: config.location.clone(),
            entry_group: config.entry_group.clone(),
        }
    }

    /// Returns the resource path of a lake.
    #[must_use]
    pub fn lake(&self, lake_id: &str) -> String {
        format!(
            "projects/{}/locations/{}/lakes/{lake_id}",
            self.project_id, self.location
        )
    }

    /// Returns the entry id for a dataset-level entry.
    ///
    /// The id carries the dataset's own project, which for cross-project
    /// assets differs from the configured one.
    #[must_use]
    pub fn dataset_entry_id(&self, dataset: &DatasetPath) -> String {
        format!(
            "{BIGQUERY_SOURCE}/projects/{}/datasets/{}",
            dataset.project, dataset.dataset
        )
    }

    /// Returns the entry id for a table-level entry.
    #[must_use]
    pub fn table_entry_id(&self, dataset: &DatasetPath, table_id: &str) -> String {
        format!("{}/tables/{table_id}", self.dataset_entry_id(dataset))
    }

    /// Returns the full entry resource name for an entry id, with the id
    /// percent-encoded.
    #[must_use]
    pub fn entry_name(&self, entry_id: &str) -> String {
        format!(
            "projects/{}/locations/{}/entryGroups/{}/entries/{}",
            self.project_id,
            self.location,
            self.entry_group,
            utf8_percent_encode(entry_id, ENTRY_ID_ESCAPE)
        )
    }

    /// Returns the namespaced key under which an aspect is attached.
    #[must_use]
    pub fn aspect_key(&self, aspect_id: &str) -> String {
        format!("{}.{}.{aspect_id}", self.project_id, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> EntryPaths {
        EntryPaths::new(&CatalogConfig::new("acme-project", "us-central1"))
    }

    #[test]
    fn entry_name_keeps_slashes_literal() {
        let dataset = DatasetPath::new("acme-project", "sales");
        let name = paths().entry_name(&paths().table_entry_id(&dataset, "orders"));
        assert_eq!(
            name,
            "projects/acme-project/locations/us-central1/entryGroups/@bigquery/entries/\
             bigquery.googleapis.com/projects/acme-project/datasets/sales/tables/orders"
        );
    }

    #[test]
    fn entry_name_escapes_outside_unreserved_set() {
        let encoded = paths().entry_name("data set:v1");
        assert!(encoded.ends_with("entries/data%20set%3Av1"));
    }

    #[test]
    fn entry_name_is_deterministic() {
        let dataset = DatasetPath::new("acme-project", "sales");
        let id = paths().dataset_entry_id(&dataset);
        assert_eq!(paths().entry_name(&id), paths().entry_name(&id));
    }

    #[test]
    fn encoding_round_trips() {
        let id = "bigquery.googleapis.com/projects/acme/datasets/a b+c";
        let name = paths().entry_name(id);
        let encoded = name.rsplit("entries/").next().unwrap();
        let decoded = percent_encoding::percent_decode_str(encoded)
            .decode_utf8()
            .unwrap();
        assert_eq!(decoded, id);
    }

    #[test]
    fn aspect_key_is_namespaced() {
        assert_eq!(
            paths().aspect_key("ownership"),
            "acme-project.us-central1.ownership"
        );
    }
}
