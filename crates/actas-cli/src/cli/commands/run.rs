//! `actas run` – load the roster and download every pending acta.

use actas_core::config::ActasConfig;
use actas_core::roster;
use actas_core::scheduler::{self, BatchOptions};
use anyhow::{Context, Result};
use std::fs;

pub async fn run_download(cfg: &ActasConfig) -> Result<()> {
    fs::create_dir_all(&cfg.output_dir).with_context(|| {
        format!(
            "cannot create output directory {}",
            cfg.output_dir.display()
        )
    })?;

    let pending = roster::load_pending(&cfg.csv_path, &cfg.output_dir, &cfg.office)?;
    if pending.is_empty() {
        println!("No mesas pending download.");
        return Ok(());
    }
    println!("Downloading {} actas...", pending.len());

    let opts = BatchOptions::from_config(cfg);
    let summary = scheduler::run_batch(&opts, pending).await;
    println!(
        "Done. {}/{} mesas persisted.",
        summary.succeeded, summary.attempted
    );
    Ok(())
}
