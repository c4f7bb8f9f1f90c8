//! Hierarchy traversal: scope filter → concrete catalog entries.

use tracing::{debug, warn};

use facet_core::{DatasetPath, HierarchyReader, Result, BIGQUERY_DATASET};

use crate::scope::{EntryKind, TargetScope};

/// The granularity of a discovered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// A dataset-level entry.
    Dataset,
    /// A table-level entry.
    Table,
    /// A column sub-target of a table-level entry.
    Column,
}

/// A discovered resource that passed every scope filter on its path.
///
/// Ephemeral: produced by the walker, consumed by the attacher, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Zone the asset was found in.
    pub zone: String,
    /// Asset id within the zone.
    pub asset: String,
    /// The asset's underlying dataset.
    pub dataset: DatasetPath,
    /// Table id for table- and column-granularity entries.
    pub table: Option<String>,
    /// Column name for column-granularity entries.
    pub column: Option<String>,
}

impl CatalogEntry {
    /// Returns the granularity implied by the populated fields.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        match (&self.table, &self.column) {
            (_, Some(_)) => Granularity::Column,
            (Some(_), None) => Granularity::Table,
            (None, None) => Granularity::Dataset,
        }
    }
}

/// Walks the lake → zone → asset → table → column hierarchy, yielding the
/// entries that satisfy a [`TargetScope`].
///
/// Filters are conjunctive and short-circuit descent: an asset that fails
/// the asset filter is never listed for tables. Listing failures below the
/// lake are branch-local — the affected zone or asset is skipped with a
/// warning and the walk continues.
pub struct HierarchyWalker<'a, R> {
    reader: &'a R,
    scope: &'a TargetScope,
}

impl<'a, R: HierarchyReader> HierarchyWalker<'a, R> {
    /// Creates a walker over the given reader and scope.
    #[must_use]
    pub fn new(reader: &'a R, scope: &'a TargetScope) -> Self {
        Self { reader, scope }
    }

    /// Enumerates every entry matching the scope, in traversal order.
    ///
    /// Zero entries is a normal outcome (a filter matched nothing); the
    /// caller turns it into the terminal "nothing attached" verdict.
    ///
    /// # Errors
    ///
    /// Returns `Error::ResourceNotFound` when the lake itself is absent, or
    /// a `Transport` error when the zone listing cannot be issued at all.
    /// Nothing else aborts the walk.
    pub async fn discover(&self) -> Result<Vec<CatalogEntry>> {
        let zones = self.reader.list_zones(&self.scope.lake).await?;
        debug!(lake = %self.scope.lake, zones = zones.len(), "walking lake");

        let mut entries = Vec::new();
        for zone in &zones {
            let assets = match self.reader.list_assets(&zone.name).await {
                Ok(assets) => assets,
                Err(err) => {
                    warn!(zone = zone.zone_id(), error = %err, "skipping zone: asset listing failed");
                    continue;
                }
            };

            for asset in &assets {
                let asset_id = asset.asset_id();
                if self.scope.asset.as_deref().is_some_and(|f| f != asset_id) {
                    continue;
                }

                let Some(resource) = asset.resource_spec.resource.as_deref() else {
                    debug!(asset = asset_id, "skipping asset without a resource reference");
                    continue;
                };
                let dataset = match resource.parse::<DatasetPath>() {
                    Ok(dataset) => dataset,
                    Err(err) => {
                        warn!(asset = asset_id, error = %err, "skipping asset: unrecognized resource path");
                        continue;
                    }
                };

                match self.scope.kind {
                    EntryKind::Asset => entries.push(CatalogEntry {
                        zone: zone.zone_id().to_string(),
                        asset: asset_id.to_string(),
                        dataset,
                        table: None,
                        column: None,
                    }),
                    EntryKind::Table | EntryKind::Column => {
                        if asset.resource_spec.resource_type.as_deref() != Some(BIGQUERY_DATASET) {
                            debug!(asset = asset_id, "skipping non-dataset asset");
                            continue;
                        }
                        self.descend_into_tables(zone.zone_id(), asset_id, &dataset, &mut entries)
                            .await;
                    }
                }
            }
        }

        Ok(entries)
    }

    /// Lists the tables of one dataset-backed asset and yields its table or
    /// column entries. Listing failures skip the asset.
    async fn descend_into_tables(
        &self,
        zone_id: &str,
        asset_id: &str,
        dataset: &DatasetPath,
        entries: &mut Vec<CatalogEntry>,
    ) {
        let tables = match self.reader.list_tables(dataset).await {
            Ok(tables) => tables,
            Err(err) => {
                warn!(asset = asset_id, dataset = %dataset, error = %err, "skipping asset: table listing failed");
                return;
            }
        };

        for table in tables {
            if self.scope.table.as_deref().is_some_and(|f| f != table) {
                continue;
            }

            let entry = CatalogEntry {
                zone: zone_id.to_string(),
                asset: asset_id.to_string(),
                dataset: dataset.clone(),
                table: Some(table.clone()),
                column: None,
            };

            if self.scope.kind == EntryKind::Column {
                // Scope validation guarantees the column name is present.
                entries.push(CatalogEntry {
                    column: self.scope.column.clone(),
                    ..entry
                });
            } else {
                entries.push(entry.clone());
                if self.scope.include_columns {
                    self.push_column_entries(&entry, &table, entries).await;
                }
            }
        }
    }

    /// Yields one column entry per schema column of a table. A schema fetch
    /// failure skips the table's columns, not the table itself.
    async fn push_column_entries(
        &self,
        table_entry: &CatalogEntry,
        table: &str,
        entries: &mut Vec<CatalogEntry>,
    ) {
        let columns = match self.reader.list_columns(&table_entry.dataset, table).await {
            Ok(columns) => columns,
            Err(err) => {
                warn!(table, error = %err, "skipping columns: schema fetch failed");
                return;
            }
        };
        for column in columns {
            entries.push(CatalogEntry {
                column: Some(column),
                ..table_entry.clone()
            });
        }
    }
}
