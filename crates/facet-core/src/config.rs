//! Run configuration for facet.
//!
//! One [`CatalogConfig`] value is built from caller input at startup and
//! passed by reference into every component. Nothing in facet reads
//! process-wide state after this value exists.

/// Default Dataplex API endpoint.
pub const DEFAULT_DATAPLEX_ENDPOINT: &str = "https://dataplex.googleapis.com/v1";

/// Default BigQuery API endpoint.
pub const DEFAULT_BIGQUERY_ENDPOINT: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Default entry group holding BigQuery-sourced entries.
pub const DEFAULT_ENTRY_GROUP: &str = "@bigquery";

/// Immutable configuration for one attachment run.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Project hosting the lake, the entry group, and the aspect types.
    pub project_id: String,
    /// Location of the lake and the entry group.
    ///
    /// Also namespaces aspect keys; aspect types must be provisioned here.
    pub location: String,
    /// Entry group the attachments are written through.
    pub entry_group: String,
    /// Base URL of the Dataplex API.
    pub dataplex_endpoint: String,
    /// Base URL of the BigQuery API.
    pub bigquery_endpoint: String,
    /// Bearer token for both APIs. Requests are sent unauthenticated when
    /// absent, which only makes sense against a local test endpoint.
    pub token: Option<String>,
}

impl CatalogConfig {
    /// Creates a configuration with default endpoints and entry group.
    #[must_use]
    pub fn new(project_id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            entry_group: DEFAULT_ENTRY_GROUP.to_string(),
            dataplex_endpoint: DEFAULT_DATAPLEX_ENDPOINT.to_string(),
            bigquery_endpoint: DEFAULT_BIGQUERY_ENDPOINT.to_string(),
            token: None,
        }
    }

    /// Sets the entry group.
    #[must_use]
    pub fn with_entry_group(mut self, entry_group: impl Into<String>) -> Self {
        self.entry_group = entry_group.into();
        self
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Overrides both API endpoints. Trailing slashes are trimmed so path
    /// joins stay canonical.
    #[must_use]
    pub fn with_endpoints(
        mut self,
        dataplex_endpoint: impl Into<String>,
        bigquery_endpoint: impl Into<String>,
    ) -> Self {
        self.dataplex_endpoint = dataplex_endpoint.into().trim_end_matches('/').to_string();
        self.bigquery_endpoint = bigquery_endpoint.into().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_google_endpoints() {
        let config = CatalogConfig::new("acme-project", "us-central1");
        assert_eq!(config.dataplex_endpoint, DEFAULT_DATAPLEX_ENDPOINT);
        assert_eq!(config.bigquery_endpoint, DEFAULT_BIGQUERY_ENDPOINT);
        assert_eq!(config.entry_group, "@bigquery");
        assert!(config.token.is_none());
    }

    #[test]
    fn endpoint_overrides_trim_trailing_slash() {
        let config = CatalogConfig::new("acme-project", "us-central1")
            .with_endpoints("http://localhost:8080/", "http://localhost:8081/");
        assert_eq!(config.dataplex_endpoint, "http://localhost:8080");
        assert_eq!(config.bigquery_endpoint, "http://localhost:8081");
    }
}
