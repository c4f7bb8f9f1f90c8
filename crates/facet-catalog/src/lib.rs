//! # facet-catalog
//!
//! Aspect catalog model and selection resolution for facet.
//!
//! An aspect catalog is one JSON document mapping aspect ids to their payload
//! templates, with a reserved `groups` key holding named, reusable lists of
//! aspect ids. This crate loads that document into [`AspectCatalog`] and
//! resolves a caller's comma-separated selection of ids and group names into
//! the validated, deduplicated id list the attachment engine runs with.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod resolver;

pub use catalog::{AspectCatalog, GROUPS_KEY};
pub use resolver::resolve_selection;
