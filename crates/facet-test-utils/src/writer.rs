//! In-memory catalog writer with patch recording.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use facet_core::{CatalogWriter, PatchOutcome, Result};

/// Record of one patch for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedPatch {
    /// Entry resource name the patch was addressed at.
    pub entry_name: String,
    /// The full patch body.
    pub payload: Value,
}

/// Scripted response for entries matching a name fragment.
#[derive(Debug, Clone)]
struct ScriptedResponse {
    fragment: String,
    status: u16,
    body: String,
}

/// In-memory catalog writer that records every patch.
///
/// Patches succeed with `200 {}` unless a scripted response matches the
/// entry name.
#[derive(Debug, Clone, Default)]
pub struct RecordingWriter {
    patches: Arc<Mutex<Vec<RecordedPatch>>>,
    responses: Arc<Mutex<Vec<ScriptedResponse>>>,
}

impl RecordingWriter {
    /// Creates a writer where every patch succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a response for every entry whose name contains `fragment`.
    ///
    /// Fragments are matched in registration order, first match wins.
    /// Matching by fragment keeps tests readable despite percent-encoded
    /// entry names.
    pub fn respond_matching(&self, fragment: &str, status: u16, body: &str) {
        self.responses.lock().expect("lock").push(ScriptedResponse {
            fragment: fragment.to_string(),
            status,
            body: body.to_string(),
        });
    }

    /// Returns all recorded patches, in call order.
    pub fn patches(&self) -> Vec<RecordedPatch> {
        self.patches.lock().expect("lock").clone()
    }

    /// Returns the recorded entry names, in call order.
    pub fn patched_entries(&self) -> Vec<String> {
        self.patches()
            .into_iter()
            .map(|patch| patch.entry_name)
            .collect()
    }
}

#[async_trait]
impl CatalogWriter for RecordingWriter {
    async fn patch_entry(&self, entry_name: &str, payload: &Value) -> Result<PatchOutcome> {
        self.patches.lock().expect("lock").push(RecordedPatch {
            entry_name: entry_name.to_string(),
            payload: payload.clone(),
        });

        let scripted = self
            .responses
            .lock()
            .expect("lock")
            .iter()
            .find(|response| entry_name.contains(&response.fragment))
            .cloned();
        Ok(match scripted {
            Some(response) => PatchOutcome {
                status: response.status,
                body: response.body,
            },
            None => PatchOutcome {
                status: 200,
                body: "{}".to_string(),
            },
        })
    }
}
