//! Target scope: what to attach to.

use std::fmt;

use facet_core::{Error, Result};

/// The granularity of entries a run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Dataset-level entries, one per matching asset.
    Asset,
    /// Table-level entries under matching assets.
    Table,
    /// A named column of matching tables.
    Column,
}

impl EntryKind {
    /// Returns the lowercase name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Table => "table",
            Self::Column => "column",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The scope filter for one attachment run.
///
/// Built once from caller input and never mutated. Filters are conjunctive
/// and applied top-down during the walk; `None` means "match everything at
/// this level".
#[derive(Debug, Clone)]
pub struct TargetScope {
    /// Entry granularity to attach at.
    pub kind: EntryKind,
    /// Lake to walk.
    pub lake: String,
    /// Only descend into the asset with this id.
    pub asset: Option<String>,
    /// Only attach to the table with this id.
    pub table: Option<String>,
    /// Column to attach to. Required for [`EntryKind::Column`], rejected
    /// otherwise.
    pub column: Option<String>,
    /// For table runs, also attach to every column of each matched table.
    pub include_columns: bool,
}

impl TargetScope {
    /// Creates a scope targeting every entry of the given kind in a lake.
    #[must_use]
    pub fn new(kind: EntryKind, lake: impl Into<String>) -> Self {
        Self {
            kind,
            lake: lake.into(),
            asset: None,
            table: None,
            column: None,
            include_columns: false,
        }
    }

    /// Narrows the scope to one asset.
    #[must_use]
    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    /// Narrows the scope to one table.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Names the column a column run targets.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// For table runs, also attach to every column of each matched table.
    #[must_use]
    pub const fn including_columns(mut self) -> Self {
        self.include_columns = true;
        self
    }

    /// Checks the scope for internal consistency.
    ///
    /// Runs before any network call so misuse never reaches the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when:
    /// - the lake id is empty;
    /// - a column run names no table or no column;
    /// - a column name is given for a non-column run.
    pub fn validate(&self) -> Result<()> {
        if self.lake.trim().is_empty() {
            return Err(Error::config("lake id must not be empty"));
        }
        match self.kind {
            EntryKind::Column => {
                if self.table.is_none() {
                    return Err(Error::config(
                        "column runs require a table filter (--table)",
                    ));
                }
                if self.column.is_none() {
                    return Err(Error::config("column runs require a column name (--column)"));
                }
            }
            EntryKind::Asset | EntryKind::Table => {
                if self.column.is_some() {
                    return Err(Error::config(format!(
                        "a column name is only valid for column runs, not {} runs",
                        self.kind
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_scope_validates() {
        TargetScope::new(EntryKind::Asset, "operations")
            .validate()
            .unwrap();
    }

    #[test]
    fn column_scope_requires_table_filter() {
        let err = TargetScope::new(EntryKind::Column, "operations")
            .with_column("customer_id")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn column_scope_requires_column_name() {
        let err = TargetScope::new(EntryKind::Column, "operations")
            .with_table("orders")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn full_column_scope_validates() {
        TargetScope::new(EntryKind::Column, "operations")
            .with_asset("sales")
            .with_table("orders")
            .with_column("customer_id")
            .validate()
            .unwrap();
    }

    #[test]
    fn column_name_is_rejected_outside_column_runs() {
        let err = TargetScope::new(EntryKind::Table, "operations")
            .with_column("customer_id")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn empty_lake_is_rejected() {
        let err = TargetScope::new(EntryKind::Asset, "  ").validate().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
