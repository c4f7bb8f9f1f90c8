//! Typed parsing of asset resource references.
//!
//! Dataplex assets carry the resource they catalog as an opaque string of
//! the form `//bigquery.googleapis.com/projects/{project}/datasets/{dataset}`.
//! The walker needs the project and dataset components to enumerate tables
//! and to build entry ids, and malformed references must be skippable rather
//! than fatal, so the split lives here as a small parser with its own tests
//! instead of inline string surgery at the call sites.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Service prefix carried by BigQuery resource references.
const BIGQUERY_SERVICE_PREFIX: &str = "//bigquery.googleapis.com/";

/// A BigQuery dataset reference parsed from an asset's resource string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetPath {
    /// Project owning the dataset. Not necessarily the project hosting the
    /// lake; cross-project assets keep their own project here.
    pub project: String,
    /// Dataset id within the project.
    pub dataset: String,
}

impl DatasetPath {
    /// Creates a dataset path from already-split components.
    #[must_use]
    pub fn new(project: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            dataset: dataset.into(),
        }
    }
}

impl FromStr for DatasetPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidResource {
            path: s.to_string(),
        };

        let rest = s.strip_prefix(BIGQUERY_SERVICE_PREFIX).ok_or_else(invalid)?;
        match rest.split('/').collect::<Vec<_>>().as_slice() {
            ["projects", project, "datasets", dataset]
                if !project.is_empty() && !dataset.is_empty() =>
            {
                Ok(Self::new(*project, *dataset))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for DatasetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{BIGQUERY_SERVICE_PREFIX}projects/{}/datasets/{}",
            self.project, self.dataset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_reference() {
        let path: DatasetPath = "//bigquery.googleapis.com/projects/acme/datasets/sales"
            .parse()
            .unwrap();
        assert_eq!(path.project, "acme");
        assert_eq!(path.dataset, "sales");
    }

    #[test]
    fn display_round_trips() {
        let path = DatasetPath::new("acme", "sales");
        let parsed: DatasetPath = path.to_string().parse().unwrap();
        assert_eq!(parsed, path);
    }

    #[test]
    fn rejects_other_services() {
        let err = "//storage.googleapis.com/projects/acme/buckets/raw"
            .parse::<DatasetPath>()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResource { .. }));
    }

    #[test]
    fn rejects_truncated_reference() {
        for path in [
            "//bigquery.googleapis.com/projects/acme",
            "//bigquery.googleapis.com/projects/acme/datasets",
            "//bigquery.googleapis.com/projects//datasets/sales",
            "//bigquery.googleapis.com/projects/acme/datasets/sales/tables/t",
            "",
        ] {
            assert!(
                path.parse::<DatasetPath>().is_err(),
                "expected parse failure for {path:?}"
            );
        }
    }
}
