//! Attach command - resolve aspects, walk a lake, attach to matches.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use facet_attach::{ApiClient, AttachEngine, EntryKind, TargetScope};
use facet_catalog::AspectCatalog;
use facet_core::CatalogConfig;

use crate::OutputFormat;

/// Entry granularity flag values.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum KindArg {
    /// Dataset-level entries, one per matching asset.
    Asset,
    /// Table-level entries under matching assets.
    Table,
    /// A named column of matching tables.
    Column,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Asset => Self::Asset,
            KindArg::Table => Self::Table,
            KindArg::Column => Self::Column,
        }
    }
}

/// Arguments for the attach command.
#[derive(Debug, Args)]
pub struct AttachArgs {
    /// Entry granularity to attach at.
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Lake to walk.
    #[arg(long)]
    pub lake: String,

    /// Only attach under the asset with this id.
    #[arg(long)]
    pub asset: Option<String>,

    /// Only attach to the table with this id.
    #[arg(long)]
    pub table: Option<String>,

    /// Column to attach to (column runs only).
    #[arg(long)]
    pub column: Option<String>,

    /// Aspects and/or groups to attach, comma-separated.
    #[arg(long)]
    pub aspects: String,

    /// For table runs, also attach to every column of each matched table.
    #[arg(long)]
    pub include_columns: bool,

    /// Path of the aspect catalog document.
    #[arg(long, default_value = "aspects.json")]
    pub aspects_file: PathBuf,
}

impl AttachArgs {
    fn scope(&self) -> TargetScope {
        let mut scope = TargetScope::new(EntryKind::from(self.kind), self.lake.clone());
        if let Some(asset) = &self.asset {
            scope = scope.with_asset(asset.clone());
        }
        if let Some(table) = &self.table {
            scope = scope.with_table(table.clone());
        }
        if let Some(column) = &self.column {
            scope = scope.with_column(column.clone());
        }
        if self.include_columns {
            scope = scope.including_columns();
        }
        scope
    }
}

/// Execute the attach command.
///
/// # Errors
///
/// Returns an error on invalid configuration, an unreadable aspect catalog,
/// a missing lake, or a run where nothing was attached.
pub async fn execute(args: AttachArgs, config: &CatalogConfig, format: &OutputFormat) -> Result<()> {
    let text = std::fs::read_to_string(&args.aspects_file).with_context(|| {
        format!(
            "Failed to read aspect catalog from {}",
            args.aspects_file.display()
        )
    })?;
    let catalog = AspectCatalog::from_json(&text).context("Failed to parse aspect catalog")?;

    let client = ApiClient::new(config.clone()).context("Failed to create API client")?;
    let engine = AttachEngine::new(&client, &client, config, &catalog);
    let report = engine.run(&args.scope(), &args.aspects).await?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        }
        OutputFormat::Text => {
            println!("Attachment run finished");
            println!();
            println!("  Attempted: {}", report.attempted);
            println!("  Succeeded: {}", report.succeeded);
            println!("  Failed:    {}", report.failed);
        }
    }

    if !report.is_success() {
        anyhow::bail!("no aspects were attached");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_args_parsing() {
        use clap::Parser;

        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            args: AttachArgs,
        }

        let cli = TestCli::parse_from([
            "test",
            "--kind",
            "column",
            "--lake",
            "operations",
            "--asset",
            "sales",
            "--table",
            "orders",
            "--column",
            "customer_id",
            "--aspects",
            "mandatory,quality",
        ]);

        let scope = cli.args.scope();
        assert_eq!(scope.kind, EntryKind::Column);
        assert_eq!(scope.lake, "operations");
        assert_eq!(scope.asset.as_deref(), Some("sales"));
        assert_eq!(scope.table.as_deref(), Some("orders"));
        assert_eq!(scope.column.as_deref(), Some("customer_id"));
        assert!(scope.validate().is_ok());
    }

    #[test]
    fn test_attach_args_defaults() {
        use clap::Parser;

        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            args: AttachArgs,
        }

        let cli = TestCli::parse_from([
            "test", "--kind", "table", "--lake", "operations", "--aspects", "mandatory",
        ]);

        assert_eq!(cli.args.aspects_file, PathBuf::from("aspects.json"));
        assert!(!cli.args.include_columns);
        let scope = cli.args.scope();
        assert!(scope.asset.is_none());
        assert!(!scope.include_columns);
    }
}
