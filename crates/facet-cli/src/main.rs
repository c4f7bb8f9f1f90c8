//! facet - attach Dataplex aspects to BigQuery entries.
//!
//! The main entry point for the `facet` CLI binary.

use anyhow::Result;
use clap::Parser;

use facet_cli::{Cli, Commands};
use facet_core::{init_logging, LogFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    let config = cli.config();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::Attach(args) => {
                facet_cli::commands::attach::execute(args, &config, &cli.format).await
            }
        }
    })
}
