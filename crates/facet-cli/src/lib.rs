//! # facet-cli
//!
//! Command-line interface for attaching Dataplex aspects to BigQuery
//! entries.
//!
//! ## Commands
//!
//! - `facet attach` - Resolve aspects, walk a lake, and attach
//!
//! ## Configuration
//!
//! The CLI uses environment variables or command-line flags for settings:
//!
//! - `FACET_PROJECT` - Project hosting the lake and entry group
//! - `FACET_LOCATION` - Location of the lake and entry group
//! - `FACET_ENTRY_GROUP` - Entry group written through (default `@bigquery`)
//! - `FACET_TOKEN` - Bearer token for both APIs

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
// CLI uses print! macros intentionally
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

pub mod commands;

use clap::{Parser, Subcommand};

use facet_core::config::{DEFAULT_BIGQUERY_ENDPOINT, DEFAULT_DATAPLEX_ENDPOINT, DEFAULT_ENTRY_GROUP};
use facet_core::CatalogConfig;

/// facet - attach Dataplex aspects to BigQuery entries.
#[derive(Debug, Parser)]
#[command(name = "facet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project hosting the lake, the entry group, and the aspect types.
    #[arg(long, env = "FACET_PROJECT")]
    pub project: String,

    /// Location of the lake and the entry group.
    #[arg(long, env = "FACET_LOCATION", default_value = "us-central1")]
    pub location: String,

    /// Entry group the attachments are written through.
    #[arg(long, env = "FACET_ENTRY_GROUP", default_value = DEFAULT_ENTRY_GROUP)]
    pub entry_group: String,

    /// Bearer token for the Dataplex and BigQuery APIs.
    #[arg(long, env = "FACET_TOKEN")]
    pub token: Option<String>,

    /// Dataplex API base URL.
    #[arg(long, env = "FACET_DATAPLEX_ENDPOINT", default_value = DEFAULT_DATAPLEX_ENDPOINT, hide = true)]
    pub dataplex_endpoint: String,

    /// BigQuery API base URL.
    #[arg(long, env = "FACET_BIGQUERY_ENDPOINT", default_value = DEFAULT_BIGQUERY_ENDPOINT, hide = true)]
    pub bigquery_endpoint: String,

    /// Output format.
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Emit logs as JSON.
    #[arg(long, env = "FACET_LOG_JSON")]
    pub log_json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the effective run configuration.
    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        let mut config = CatalogConfig::new(self.project.clone(), self.location.clone())
            .with_entry_group(self.entry_group.clone())
            .with_endpoints(self.dataplex_endpoint.clone(), self.bigquery_endpoint.clone());
        if let Some(token) = &self.token {
            config = config.with_token(token.clone());
        }
        config
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Attach aspects to the entries matching a scope.
    Attach(commands::attach::AttachArgs),
}

/// Output format.
#[derive(Debug, Clone, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_config_from_flags() {
        let cli = Cli::parse_from([
            "facet",
            "--project",
            "acme-project",
            "--location",
            "europe-west1",
            "--entry-group",
            "@custom",
            "--token",
            "token-abc",
            "attach",
            "--kind",
            "asset",
            "--lake",
            "operations",
            "--aspects",
            "mandatory",
        ]);

        let config = cli.config();
        assert_eq!(config.project_id, "acme-project");
        assert_eq!(config.location, "europe-west1");
        assert_eq!(config.entry_group, "@custom");
        assert_eq!(config.token.as_deref(), Some("token-abc"));
        assert_eq!(config.dataplex_endpoint, DEFAULT_DATAPLEX_ENDPOINT);
    }
}
