//! Bounded-concurrency batch run over the pending mesas.
//!
//! Keeps up to `max_concurrent` mesas in flight at once; when one finishes,
//! the next pending mesa is started until the set is drained. Outcomes are
//! joined here and reduced to a single summary once every task has reached a
//! terminal state, so no counter is shared between workers.

use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinSet;

use crate::config::ActasConfig;
use crate::fetch::FetchOptions;
use crate::pipeline::{self, MesaOutcome};
use crate::roster::MesaId;

/// Parameters for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub fetch: FetchOptions,
    pub output_dir: PathBuf,
    /// Maximum mesas in the fetch/extract/persist phase at once.
    pub max_concurrent: usize,
    /// Pause each worker holds after its mesa completes, before the slot
    /// frees. Rate-limits the endpoint independent of the concurrency width.
    pub pace: Duration,
}

impl BatchOptions {
    pub fn from_config(cfg: &ActasConfig) -> Self {
        Self {
            fetch: FetchOptions::from_config(cfg),
            output_dir: cfg.output_dir.clone(),
            max_concurrent: cfg.max_concurrent,
            pace: Duration::from_millis(cfg.pace_ms),
        }
    }
}

/// Final counts for a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub attempted: usize,
    pub succeeded: usize,
}

/// Runs every pending mesa through the pipeline with bounded concurrency and
/// returns the aggregate summary.
///
/// Each mesa reaches exactly one terminal state; a worker that panics counts
/// as a failure for its mesa and never cancels or loses the rest of the batch.
pub async fn run_batch(opts: &BatchOptions, pending: Vec<MesaId>) -> Summary {
    let max_concurrent = opts.max_concurrent.max(1);
    let mut queue = pending.into_iter();
    let mut join_set: JoinSet<MesaOutcome> = JoinSet::new();

    let mut summary = Summary::default();
    let mut fetch_failed = 0usize;
    let mut acta_missing = 0usize;
    let mut persist_failed = 0usize;

    loop {
        while join_set.len() < max_concurrent {
            let Some(mesa) = queue.next() else { break };
            let fetch = opts.fetch.clone();
            let output_dir = opts.output_dir.clone();
            let pace = opts.pace;
            join_set.spawn_blocking(move || {
                let outcome = pipeline::process_mesa(&fetch, &output_dir, mesa);
                // Pace before the slot frees.
                std::thread::sleep(pace);
                outcome
            });
        }

        if join_set.is_empty() {
            break;
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        summary.attempted += 1;
        match res {
            Ok(MesaOutcome::Persisted) => summary.succeeded += 1,
            Ok(MesaOutcome::FetchFailed(_)) => fetch_failed += 1,
            Ok(MesaOutcome::ActaMissing) => acta_missing += 1,
            Ok(MesaOutcome::PersistFailed(_)) => persist_failed += 1,
            Err(e) => tracing::error!("mesa task join: {}", e),
        }
    }

    tracing::info!(
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        fetch_failed,
        acta_missing,
        persist_failed,
        "batch finished"
    );
    summary
}
