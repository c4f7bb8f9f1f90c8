//! Run orchestration: resolve, discover, attach, aggregate.

use tracing::{info, warn};

use facet_core::{CatalogConfig, CatalogWriter, HierarchyReader, Result};
use facet_catalog::{resolve_selection, AspectCatalog};

use crate::attacher::{Attacher, AttachmentStatus};
use crate::report::AttachmentReport;
use crate::scope::TargetScope;
use crate::walker::HierarchyWalker;

/// Wires resolution, traversal, and attachment into one run.
///
/// Resolution and scope validation run before any network call, so a bad
/// selection or scope never issues a single write. Discovered entries are
/// attached in traversal order; individual failures are recorded and the
/// run continues.
pub struct AttachEngine<'a, R, W> {
    reader: &'a R,
    writer: &'a W,
    config: &'a CatalogConfig,
    catalog: &'a AspectCatalog,
}

impl<'a, R, W> AttachEngine<'a, R, W>
where
    R: HierarchyReader,
    W: CatalogWriter,
{
    /// Creates an engine over the two service capabilities.
    #[must_use]
    pub fn new(
        reader: &'a R,
        writer: &'a W,
        config: &'a CatalogConfig,
        catalog: &'a AspectCatalog,
    ) -> Self {
        Self {
            reader,
            writer,
            config,
            catalog,
        }
    }

    /// Executes one attachment run.
    ///
    /// # Errors
    ///
    /// Returns the fatal errors only: invalid scope or selection, unknown
    /// aspects, a missing lake, or a zone listing that could not be issued.
    /// Per-entry attachment failures end up in the report instead.
    pub async fn run(&self, scope: &TargetScope, selection: &str) -> Result<AttachmentReport> {
        scope.validate()?;
        let aspect_ids = resolve_selection(self.catalog, selection)?;
        info!(
            lake = %scope.lake,
            kind = %scope.kind,
            aspects = aspect_ids.len(),
            "starting attachment run"
        );

        let entries = HierarchyWalker::new(self.reader, scope).discover().await?;
        if entries.is_empty() {
            warn!("scope matched no entries");
        }

        let attacher = Attacher::new(self.writer, self.config, self.catalog, &aspect_ids);
        let mut report = AttachmentReport::new();
        for entry in &entries {
            let result = attacher.attach(entry).await;
            match &result.status {
                AttachmentStatus::Succeeded => {
                    info!(entry = %result.entry_name, column = result.column.as_deref().unwrap_or("-"), "aspects attached");
                }
                AttachmentStatus::Failed { status, message } => {
                    warn!(entry = %result.entry_name, status, message, "attachment failed");
                }
            }
            report.record(&result);
        }
        report.finish();

        info!(
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            "attachment run finished"
        );
        Ok(report)
    }
}
