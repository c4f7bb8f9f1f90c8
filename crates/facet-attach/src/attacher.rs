//! Patch construction and per-entry attachment.

use serde_json::{json, Map, Value};
use tracing::debug;

use facet_core::{CatalogConfig, CatalogWriter, EntryPaths};
use facet_catalog::AspectCatalog;

use crate::walker::CatalogEntry;

/// Outcome of one attachment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentStatus {
    /// The patch was accepted.
    Succeeded,
    /// The patch was rejected or could not be issued.
    Failed {
        /// HTTP status of the response, or 0 when the request never got one.
        status: u16,
        /// Human-readable failure detail.
        message: String,
    },
}

/// The recorded result of attaching aspects to one entry.
#[derive(Debug, Clone)]
pub struct AttachmentResult {
    /// Entry resource name the patch was addressed at.
    pub entry_name: String,
    /// Column sub-target, when the attachment was column-scoped.
    pub column: Option<String>,
    /// What happened.
    pub status: AttachmentStatus,
}

impl AttachmentResult {
    /// Returns true if the attempt succeeded.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.status, AttachmentStatus::Succeeded)
    }
}

/// Attaches a resolved aspect set to discovered entries.
///
/// The aspect set and payload templates are fixed at construction; every
/// entry in the run receives the same aspects, which is what makes re-runs
/// idempotent. Failures are recorded, never raised — a rejected patch must
/// not abort the traversal.
pub struct Attacher<'a, W> {
    writer: &'a W,
    paths: EntryPaths,
    catalog: &'a AspectCatalog,
    aspect_ids: &'a [String],
}

impl<'a, W: CatalogWriter> Attacher<'a, W> {
    /// Creates an attacher for a resolved aspect set.
    ///
    /// `aspect_ids` must already be validated against the catalog; ids
    /// without a definition are silently absent from the payload.
    #[must_use]
    pub fn new(
        writer: &'a W,
        config: &CatalogConfig,
        catalog: &'a AspectCatalog,
        aspect_ids: &'a [String],
    ) -> Self {
        Self {
            writer,
            paths: EntryPaths::new(config),
            catalog,
            aspect_ids,
        }
    }

    /// Builds the patch body for an entry name and optional column target.
    #[must_use]
    pub fn payload(&self, entry_name: &str, column: Option<&str>) -> Value {
        let mut aspects = Map::new();
        for id in self.aspect_ids {
            if let Some(template) = self.catalog.definition(id) {
                aspects.insert(self.paths.aspect_key(id), json!({ "data": template }));
            }
        }

        let mut payload = json!({ "name": entry_name, "aspects": aspects });
        if let Some(column) = column {
            payload["target"] = json!({ "type": "COLUMN", "name": column });
        }
        payload
    }

    /// Attaches the aspect set to one discovered entry.
    pub async fn attach(&self, entry: &CatalogEntry) -> AttachmentResult {
        let entry_id = match entry.table.as_deref() {
            Some(table) => self.paths.table_entry_id(&entry.dataset, table),
            None => self.paths.dataset_entry_id(&entry.dataset),
        };
        let entry_name = self.paths.entry_name(&entry_id);
        let column = entry.column.clone();
        let payload = self.payload(&entry_name, column.as_deref());
        debug!(entry = %entry_name, column = column.as_deref().unwrap_or("-"), "patching entry");

        let status = match self.writer.patch_entry(&entry_name, &payload).await {
            Ok(outcome) if outcome.is_success() => AttachmentStatus::Succeeded,
            Ok(outcome) => AttachmentStatus::Failed {
                status: outcome.status,
                message: failure_message(outcome.status, &outcome.body),
            },
            Err(err) => AttachmentStatus::Failed {
                status: 0,
                message: err.to_string(),
            },
        };

        AttachmentResult {
            entry_name,
            column,
            status,
        }
    }
}

/// Extracts a human-readable message from an error response body.
///
/// Structured API errors carry `{"error": {"message": ...}}`; anything else
/// falls back to the raw body. Permission denials are labeled for clearer
/// diagnostics but aggregate like any other failure.
fn failure_message(status: u16, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("error")?.get("message")?.as_str())
        .map_or_else(|| body.to_string(), str::to_string);

    if status == 403 {
        format!("permission denied: {message}")
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_prefers_structured_error() {
        let body = r#"{"error": {"code": 400, "message": "aspect type not found"}}"#;
        assert_eq!(failure_message(400, body), "aspect type not found");
    }

    #[test]
    fn failure_message_falls_back_to_raw_body() {
        assert_eq!(failure_message(500, "upstream exploded"), "upstream exploded");
        // JSON, but not the structured error shape.
        assert_eq!(failure_message(500, r#"{"detail": "nope"}"#), r#"{"detail": "nope"}"#);
    }

    #[test]
    fn permission_denied_is_labeled() {
        let body = r#"{"error": {"message": "caller lacks dataplex.entries.update"}}"#;
        assert_eq!(
            failure_message(403, body),
            "permission denied: caller lacks dataplex.entries.update"
        );
    }
}
