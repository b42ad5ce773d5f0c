//! Per-mesa pipeline: fetch, locate the acta, persist.

use std::fmt;
use std::path::Path;

use crate::extract;
use crate::fetch::{self, FetchError, FetchOptions};
use crate::persist::{self, PersistError};
use crate::roster::MesaId;

/// Terminal state of one mesa's pipeline. Only `Persisted` counts as success.
/// Failures are carried as values; nothing here unwinds into the scheduler or
/// touches sibling mesas.
#[derive(Debug)]
pub enum MesaOutcome {
    /// Image decoded and written.
    Persisted,
    /// Request failed: transport fault, non-2xx status, or unparseable body.
    FetchFailed(FetchError),
    /// No `ACTA` attachment, or its payload was empty. Normal for some mesas.
    ActaMissing,
    /// Decode or filesystem write failed.
    PersistFailed(PersistError),
}

impl MesaOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MesaOutcome::Persisted)
    }
}

impl fmt::Display for MesaOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MesaOutcome::Persisted => write!(f, "persisted"),
            MesaOutcome::FetchFailed(e) => write!(f, "fetch failed: {}", e),
            MesaOutcome::ActaMissing => write!(f, "acta missing"),
            MesaOutcome::PersistFailed(e) => write!(f, "persist failed: {}", e),
        }
    }
}

/// Runs the full pipeline for one mesa. Blocking; the scheduler runs this via
/// `spawn_blocking`.
pub fn process_mesa(opts: &FetchOptions, output_dir: &Path, mesa: MesaId) -> MesaOutcome {
    tracing::debug!(mesa, "fetching");
    let response = match fetch::fetch_mesa(opts, mesa) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(mesa, "fetch failed: {}", e);
            return MesaOutcome::FetchFailed(e);
        }
    };

    let Some(valor) = extract::find_acta(&response) else {
        tracing::info!(mesa, "no usable acta attached");
        return MesaOutcome::ActaMissing;
    };

    match persist::persist_acta(output_dir, mesa, valor) {
        Ok(path) => {
            tracing::info!(mesa, "acta saved to {}", path.display());
            MesaOutcome::Persisted
        }
        Err(e) => {
            tracing::warn!(mesa, "persist failed: {}", e);
            MesaOutcome::PersistFailed(e)
        }
    }
}
