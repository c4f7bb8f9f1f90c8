//! # facet-attach
//!
//! The aspect attachment engine: scope filtering, hierarchy traversal, patch
//! construction, and outcome aggregation.
//!
//! ## Flow
//!
//! 1. [`resolve_selection`](facet_catalog::resolve_selection) turns the
//!    caller's selection into a validated aspect id list (fail closed).
//! 2. [`HierarchyWalker`] enumerates the catalog entries matching a
//!    [`TargetScope`] by descending lake → zone → asset → table → column.
//! 3. [`Attacher`] builds the aspect payload and patches each entry.
//! 4. [`AttachmentReport`] counts outcomes; one success makes the run a
//!    success, zero makes it a failure.
//!
//! [`AttachEngine`] wires the steps together; [`ApiClient`] backs the two
//! service seams with the Dataplex and BigQuery REST surfaces.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod attacher;
pub mod engine;
pub mod http;
pub mod report;
pub mod scope;
pub mod walker;

pub use attacher::{Attacher, AttachmentResult, AttachmentStatus};
pub use engine::AttachEngine;
pub use http::ApiClient;
pub use report::{AttachmentReport, Verdict};
pub use scope::{EntryKind, TargetScope};
pub use walker::{CatalogEntry, Granularity, HierarchyWalker};
