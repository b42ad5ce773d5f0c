//! CLI for the actas downloader.

mod commands;

use actas_core::config::{self, ActasConfig};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_download, run_status};

/// Top-level CLI for the actas downloader.
#[derive(Debug, Parser)]
#[command(name = "actas")]
#[command(about = "actas: bulk downloader for scanned tally-sheet images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every pending acta listed in the results export.
    Run {
        /// Results CSV to read mesa codes from (defaults to the configured path).
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
        /// Directory that receives the images (defaults to the configured path).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Office filter applied to the `Descripcion` column.
        #[arg(long)]
        office: Option<String>,
        /// Download up to N mesas concurrently.
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Show how many actas are downloaded and how many remain.
    Status {
        /// Results CSV to read mesa codes from (defaults to the configured path).
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
        /// Directory holding already-downloaded images.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Office filter applied to the `Descripcion` column.
        #[arg(long)]
        office: Option<String>,
    },
}

fn apply_overrides(
    cfg: &mut ActasConfig,
    csv: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    office: Option<String>,
) {
    if let Some(csv) = csv {
        cfg.csv_path = csv;
    }
    if let Some(dir) = output_dir {
        cfg.output_dir = dir;
    }
    if let Some(office) = office {
        cfg.office = office;
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                csv,
                output_dir,
                office,
                jobs,
            } => {
                apply_overrides(&mut cfg, csv, output_dir, office);
                if let Some(jobs) = jobs {
                    cfg.max_concurrent = jobs.max(1);
                }
                run_download(&cfg).await?;
            }
            CliCommand::Status {
                csv,
                output_dir,
                office,
            } => {
                apply_overrides(&mut cfg, csv, output_dir, office);
                run_status(&cfg)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
