//! HTTP client backing the hierarchy and catalog write seams.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use facet_core::{
    AssetSummary, CatalogConfig, CatalogWriter, DatasetPath, EntryPaths, Error, HierarchyReader,
    PatchOutcome, Result, Zone,
};

/// Client for the Dataplex and BigQuery REST surfaces.
///
/// Implements both [`HierarchyReader`] and [`CatalogWriter`] over one
/// connection pool. List calls follow `nextPageToken` until exhaustion so
/// large hierarchies are fully enumerated.
pub struct ApiClient {
    client: reqwest::Client,
    config: CatalogConfig,
    paths: EntryPaths,
}

impl ApiClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns a `Transport` error if the HTTP client cannot be constructed.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::transport_with_source("failed to create HTTP client", e))?;

        let paths = EntryPaths::new(&config);
        Ok(Self {
            client,
            config,
            paths,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.get(url);
        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Fetches every page of a listing, feeding each page to `collect`.
    ///
    /// A 404 becomes `ResourceNotFound` for the resource named by `missing`,
    /// or a plain transport error when no mapping is given.
    async fn get_paged<T, F>(
        &self,
        url: &str,
        missing: Option<(&'static str, &str)>,
        mut collect: F,
    ) -> Result<()>
    where
        T: Page,
        F: FnMut(T),
    {
        let mut page_token: Option<String> = None;
        loop {
            let mut req = self.get(url);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token.as_str())]);
            }

            let response = req
                .send()
                .await
                .map_err(|e| Error::transport_with_source(format!("GET {url} failed"), e))?;
            let status = response.status();
            if status.as_u16() == 404 {
                if let Some((resource_type, id)) = missing {
                    return Err(Error::resource_not_found(resource_type, id));
                }
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::transport(format!(
                    "GET {url} returned {status}: {body}"
                )));
            }

            let page: T = response
                .json()
                .await
                .map_err(|e| Error::transport_with_source(format!("GET {url}: invalid body"), e))?;
            page_token = page.next_page_token();
            collect(page);

            if page_token.is_none() {
                return Ok(());
            }
        }
    }
}

#[async_trait]
impl HierarchyReader for ApiClient {
    async fn list_zones(&self, lake_id: &str) -> Result<Vec<Zone>> {
        let url = format!(
            "{}/{}/zones",
            self.config.dataplex_endpoint,
            self.paths.lake(lake_id)
        );
        let mut zones = Vec::new();
        self.get_paged(&url, Some(("lake", lake_id)), |page: ZoneList| {
            zones.extend(page.zones);
        })
        .await?;
        Ok(zones)
    }

    async fn list_assets(&self, zone_name: &str) -> Result<Vec<AssetSummary>> {
        let url = format!("{}/{zone_name}/assets", self.config.dataplex_endpoint);
        let mut assets = Vec::new();
        self.get_paged(&url, None, |page: AssetList| assets.extend(page.assets))
            .await?;
        Ok(assets)
    }

    async fn list_tables(&self, dataset: &DatasetPath) -> Result<Vec<String>> {
        let url = format!(
            "{}/projects/{}/datasets/{}/tables",
            self.config.bigquery_endpoint, dataset.project, dataset.dataset
        );
        let dataset_id = format!("{}.{}", dataset.project, dataset.dataset);
        let mut tables = Vec::new();
        self.get_paged(&url, Some(("dataset", &dataset_id)), |page: TableList| {
            tables.extend(
                page.tables
                    .into_iter()
                    .map(|t| t.table_reference.table_id),
            );
        })
        .await?;
        Ok(tables)
    }

    async fn list_columns(&self, dataset: &DatasetPath, table_id: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/projects/{}/datasets/{}/tables/{table_id}",
            self.config.bigquery_endpoint, dataset.project, dataset.dataset
        );
        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::transport_with_source(format!("GET {url} failed"), e))?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Err(Error::resource_not_found("table", table_id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport(format!(
                "GET {url} returned {status}: {body}"
            )));
        }

        let table: TableDetail = response
            .json()
            .await
            .map_err(|e| Error::transport_with_source(format!("GET {url}: invalid body"), e))?;
        Ok(table
            .schema
            .map(|schema| schema.fields.into_iter().map(|f| f.name).collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl CatalogWriter for ApiClient {
    async fn patch_entry(
        &self,
        entry_name: &str,
        payload: &serde_json::Value,
    ) -> Result<PatchOutcome> {
        let url = format!("{}/{entry_name}", self.config.dataplex_endpoint);
        let mut req = self.client.patch(&url).json(payload);
        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::transport_with_source(format!("PATCH {url} failed"), e))?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(PatchOutcome { status, body })
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// A paged listing response.
trait Page: serde::de::DeserializeOwned {
    /// Takes the continuation token, if another page follows.
    fn next_page_token(&self) -> Option<String>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ZoneList {
    #[serde(default)]
    zones: Vec<Zone>,
    next_page_token: Option<String>,
}

impl Page for ZoneList {
    fn next_page_token(&self) -> Option<String> {
        self.next_page_token.clone()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetList {
    #[serde(default)]
    assets: Vec<AssetSummary>,
    next_page_token: Option<String>,
}

impl Page for AssetList {
    fn next_page_token(&self) -> Option<String> {
        self.next_page_token.clone()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableList {
    #[serde(default)]
    tables: Vec<TableItem>,
    next_page_token: Option<String>,
}

impl Page for TableList {
    fn next_page_token(&self) -> Option<String> {
        self.next_page_token.clone()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableItem {
    table_reference: TableReference,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableReference {
    table_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableDetail {
    schema: Option<TableSchema>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableSchema {
    #[serde(default)]
    fields: Vec<SchemaField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaField {
    name: String,
}
