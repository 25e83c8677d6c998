//! PLRU Shell - interactive menu over a priority-aware LRU cache

mod render;
mod shell;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use plrucache::{CacheConfig, EvictionPolicy, PriorityCache, PriorityOrder, ReplayOrder, MAX_EVICTED};
use plrustore::DEFAULT_SNAPSHOT_FILE;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::render::Renderer;
use crate::shell::Shell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Plain least-recently-used
    Lru,
    /// Priority first, recency as tie-break
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OrderArg {
    /// Numerically higher priority is evicted first
    Higher,
    /// Numerically lower priority is evicted first
    Lower,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (prompted for when omitted)
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Snapshot file, loaded at start and written on save/exit
    #[arg(short, long, default_value = DEFAULT_SNAPSHOT_FILE)]
    snapshot: PathBuf,

    /// Eviction policy
    #[arg(short, long, value_enum, default_value_t = PolicyArg::Hybrid)]
    policy: PolicyArg,

    /// Which end of the priority scale the hybrid policy evicts first
    #[arg(long, value_enum, default_value_t = OrderArg::Higher)]
    priority_order: OrderArg,

    /// Number of evictions kept in the history
    #[arg(long, default_value_t = MAX_EVICTED)]
    ledger_size: usize,

    /// Replay the snapshot so the saved recency order is restored
    #[arg(long)]
    preserve_recency: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Render tables, statistics and history as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn cache_config(&self, capacity: usize) -> CacheConfig {
        let order = match self.priority_order {
            OrderArg::Higher => PriorityOrder::HigherIsDisposable,
            OrderArg::Lower => PriorityOrder::LowerIsDisposable,
        };
        let policy = match self.policy {
            PolicyArg::Lru => EvictionPolicy::Lru,
            PolicyArg::Hybrid => EvictionPolicy::PriorityLru(order),
        };
        CacheConfig::new(capacity)
            .with_policy(policy)
            .with_ledger_capacity(self.ledger_size)
    }

    fn replay_order(&self) -> ReplayOrder {
        if self.preserve_recency {
            ReplayOrder::PreserveRecency
        } else {
            ReplayOrder::FileOrder
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so they don't interleave with the menu
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter())
        .init();

    let args = Args::parse();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    let capacity = match args.capacity {
        Some(capacity) => capacity,
        None => shell::prompt_capacity(&mut input, &mut output)?,
    };

    let config = args.cache_config(capacity);
    let mut cache = PriorityCache::with_config(config).context("Invalid cache configuration")?;
    info!(
        "Cache ready: capacity {}, policy {}, ledger {}",
        capacity,
        config.policy,
        config.ledger_capacity
    );

    let render = Renderer::new(!args.no_color, args.json);
    let clean_load = match cache.load_snapshot(&args.snapshot, args.replay_order()) {
        Ok(Some(report)) => match &report.stopped_at {
            None => {
                info!("Loaded {} entries from {:?}", report.replayed, args.snapshot);
                output.write_all(render.info("📂 Cache loaded from file successfully!").as_bytes())?;
                true
            }
            Some(e) => {
                warn!(
                    "Snapshot {:?} truncated after {} entries: {}",
                    args.snapshot, report.replayed, e
                );
                let message = format!(
                    "⚠️  Snapshot damaged ({}); loaded {} entries before it.",
                    e, report.replayed
                );
                output.write_all(render.error(&message).as_bytes())?;
                false
            }
        },
        Ok(None) => {
            info!("No snapshot at {:?}, starting empty", args.snapshot);
            true
        }
        Err(e) => {
            warn!("Could not read snapshot {:?}: {}", args.snapshot, e);
            false
        }
    };

    let mut shell = Shell::new(cache, input, output, render, args.snapshot);
    if !clean_load {
        shell = shell.without_autosave();
    }
    shell.run()?;
    info!("Final stats: {:?}", shell.cache().stats());
    Ok(())
}

/// `RUST_LOG` when set and valid, `warn` otherwise
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}
