//! # facet-core
//!
//! Core types for facet, the Dataplex aspect attachment tool.
//!
//! This crate provides:
//!
//! - **Configuration**: [`CatalogConfig`], the immutable per-run settings
//!   value passed into every component
//! - **Errors**: the shared [`Error`] taxonomy used across all facet crates
//! - **Resource paths**: [`DatasetPath`], a typed parser for the underlying
//!   resource references carried by Dataplex assets
//! - **Entry names**: [`EntryPaths`], the single source of truth for entry
//!   ids and percent-encoded entry resource names
//! - **Service seams**: [`HierarchyReader`] and [`CatalogWriter`], the two
//!   capabilities the attachment engine consumes
//! - **Observability**: [`init_logging`] and the [`LogFormat`] switch

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod entry;
pub mod error;
pub mod hierarchy;
pub mod observability;
pub mod resource;

pub use config::CatalogConfig;
pub use entry::EntryPaths;
pub use error::{Error, Result};
pub use hierarchy::{
    AssetSummary, CatalogWriter, HierarchyReader, PatchOutcome, ResourceSpec, Zone,
    BIGQUERY_DATASET,
};
pub use observability::{init_logging, LogFormat};
pub use resource::DatasetPath;
