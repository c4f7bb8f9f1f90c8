//! Factory functions for test data.

use serde_json::json;

use facet_catalog::AspectCatalog;
use facet_core::{CatalogConfig, DatasetPath};

/// Configuration matching the paths produced by the fake hierarchy.
pub fn test_config() -> CatalogConfig {
    CatalogConfig::new("test-project", "test-location")
}

/// A small aspect catalog with overlapping groups.
pub fn sample_catalog() -> AspectCatalog {
    AspectCatalog::from_document(json!({
        "ownership": {"owner": "", "team": "", "contact": ""},
        "classification": {"level": "internal"},
        "quality": {"checked": false},
        "retention": {"days": 365},
        "groups": {
            "mandatory": ["ownership", "classification"],
            "governance": ["classification", "retention"]
        }
    }))
    .expect("fixture catalog is well-formed")
}

/// The dataset the fake hierarchy fixtures usually point at.
pub fn sales_dataset() -> DatasetPath {
    DatasetPath::new("test-project", "sales")
}
