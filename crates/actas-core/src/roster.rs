//! Pending-mesa roster: the results export filtered to one office, minus the
//! actas already on disk, shuffled.

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Integer code identifying one mesa (polling-station record).
pub type MesaId = u32;

/// Columns of the results export the roster needs; the rest are ignored.
#[derive(Debug, Deserialize)]
struct ResultRow {
    #[serde(rename = "Descripcion")]
    descripcion: String,
    #[serde(rename = "CodigoMesa")]
    codigo_mesa: String,
}

/// Ids already downloaded: the leading integer (text before the first `.`) of
/// every filename in `output_dir`. A missing directory reads as empty.
pub fn downloaded_ids(output_dir: &Path) -> HashSet<MesaId> {
    let Ok(entries) = fs::read_dir(output_dir) else {
        return HashSet::new();
    };
    entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.split('.').next()?.parse::<MesaId>().ok()
        })
        .collect()
}

/// Loads the export, keeps rows whose `Descripcion` equals `office`, drops ids
/// whose image already exists, and shuffles what is left so retries do not hit
/// the endpoint in sequential-id order.
///
/// An unreadable export is an error; a filter with zero matches is just an
/// empty roster.
pub fn load_pending(csv_path: &Path, output_dir: &Path, office: &str) -> Result<Vec<MesaId>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("cannot read results export {}", csv_path.display()))?;

    let mut codes: Vec<MesaId> = Vec::new();
    for row in reader.deserialize() {
        let row: ResultRow = row.context("malformed row in results export")?;
        if row.descripcion != office {
            continue;
        }
        match row.codigo_mesa.trim().parse::<MesaId>() {
            Ok(code) => codes.push(code),
            Err(_) => tracing::warn!("skipping unparseable mesa code {:?}", row.codigo_mesa),
        }
    }

    let downloaded = downloaded_ids(output_dir);
    tracing::info!("{} actas already downloaded", downloaded.len());

    let mut pending: Vec<MesaId> = codes
        .into_iter()
        .filter(|code| !downloaded.contains(code))
        .collect();
    pending.shuffle(&mut rand::thread_rng());
    tracing::info!("{} mesas pending download", pending.len());
    Ok(pending)
}
