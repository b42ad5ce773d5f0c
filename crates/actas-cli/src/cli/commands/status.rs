//! `actas status` – downloaded vs pending counts, without touching the network.

use actas_core::config::ActasConfig;
use actas_core::roster;
use anyhow::Result;

pub fn run_status(cfg: &ActasConfig) -> Result<()> {
    let downloaded = roster::downloaded_ids(&cfg.output_dir);
    let pending = roster::load_pending(&cfg.csv_path, &cfg.output_dir, &cfg.office)?;

    println!("{:<12} {}", "downloaded", downloaded.len());
    println!("{:<12} {}", "pending", pending.len());
    Ok(())
}
