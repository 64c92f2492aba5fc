//! Strand Runtime
//!
//! Stress harness for the work-stealing job queue: runs rounds of one owner
//! against a pool of stealers and audits that every job is delivered once.
//!
//! Usage: `strand [settings.json]` (defaults to `strand.json`, falling back to
//! built-in settings when the file does not exist). Log verbosity follows
//! `RUST_LOG`.

mod audit;
mod settings;
mod stress;

use anyhow::{Context, Result};
use settings::{StressSettings, QUEUE_CAPACITY};
use std::path::PathBuf;
use strand_metrics::RoundTimer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Strand v{}", strand_core::VERSION);

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("strand.json"));
    let settings = StressSettings::load_from_path(&path)
        .with_context(|| format!("loading stress settings from {}", path.display()))?;

    tracing::info!(
        stealers = settings.stealers,
        items = settings.items_per_round,
        rounds = settings.rounds,
        capacity = QUEUE_CAPACITY,
        "Starting stress run"
    );

    let mut timer = RoundTimer::new(settings.rounds);
    for round in 0..settings.rounds {
        timer.begin();
        let report = stress::run_round(&settings, round);
        let elapsed = timer.end();

        let summary = audit::audit(settings.items_per_round, &report.owned, &report.stolen)
            .with_context(|| format!("round {} failed the delivery audit", report.round))?;

        tracing::info!(
            round,
            delivered = summary.delivered,
            by_owner = summary.by_owner,
            by_stealers = summary.by_stealers,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Round passed"
        );

        strand_metrics::metrics! {
            let counters = report.counters;
            tracing::info!(
                round,
                pushed = counters.pushed,
                rejected = counters.rejected,
                pop_empty = counters.pop_empty,
                steal_retry = counters.steal_retry,
                steal_hit_ratio = counters.steal_hit_ratio(),
                "Queue counters"
            );
        }
    }

    strand_metrics::metrics! {
        let (min_ms, max_ms) = timer.range_ms();
        tracing::info!(
            avg_ms = timer.average_ms(),
            min_ms,
            max_ms,
            items_per_sec = timer.throughput(settings.items_per_round as usize),
            "Round timing"
        );
    }

    tracing::info!("All {} rounds delivered every job exactly once", settings.rounds);
    Ok(())
}
