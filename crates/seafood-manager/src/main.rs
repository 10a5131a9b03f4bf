//! SeafoodMan manager entry point.
//!
//! Loads configuration, builds the identifier allocators, rehydrates the
//! stored snapshot and reports what was loaded.
//!
//! # Usage
//!
//! ```text
//! seafood-manager [OPTIONS]
//!
//! Options:
//!   --config   <PATH>   Config file [default: platform config directory]
//!   --snapshot <PATH>   Snapshot file, overriding storage.snapshot_path
//!   --save     <PATH>   Write the loaded records back out as a snapshot
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()            -- defaults on first run
//!  └─ EntityAllocators         -- one counter per entity type
//!  └─ load_from_source()       -- synchronize + restore, batch by batch
//!  └─ EntityStore::to_snapshot -- only with --save
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seafood_core::EntityAllocators;
use seafood_manager::application::load_snapshot::{load_from_source, EntityStore};
use seafood_manager::infrastructure::storage::config::{load_config, load_config_from, AppConfig};
use seafood_manager::infrastructure::storage::snapshot_file::TomlSnapshotFile;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// SeafoodMan snapshot loader.
#[derive(Debug, Parser)]
#[command(
    name = "seafood-manager",
    about = "Loads SeafoodMan records and continues their identifier sequences",
    version
)]
struct Cli {
    /// Config file to read instead of the platform default.
    #[arg(long, env = "SEAFOODMAN_CONFIG")]
    config: Option<PathBuf>,

    /// Snapshot file to load, overriding `storage.snapshot_path`.
    #[arg(long, env = "SEAFOODMAN_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Write the loaded records to this file in normalized form.
    #[arg(long)]
    save: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let cfg = match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => load_config().context("failed to load config")?,
        };
        Ok(cfg)
    }

    /// The snapshot to load: the command line wins over the config file.
    fn snapshot_path(&self, cfg: &AppConfig) -> Option<PathBuf> {
        self.snapshot.clone().or_else(|| cfg.storage.snapshot_path.clone())
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = cli.load_config()?;

    // Initialise structured logging.  `RUST_LOG` overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.general.log_level)),
        )
        .init();

    info!("SeafoodMan manager starting (config version {})", cfg.general.version);

    let prefixes = cfg.identifiers.prefixes()?;
    let allocators = EntityAllocators::with_prefixes(prefixes);

    let store = match cli.snapshot_path(&cfg) {
        Some(path) => {
            let source = TomlSnapshotFile::new(path);
            let store = load_from_source(&source, &allocators)
                .with_context(|| format!("failed to load snapshot {}", source.path().display()))?;
            for (kind, count) in store.counts() {
                info!("{kind}: {count} loaded");
            }
            store
        }
        None => {
            warn!("no snapshot configured; starting with an empty store");
            EntityStore::default()
        }
    };

    if let Some(path) = &cli.save {
        let snapshot = store.to_snapshot();
        TomlSnapshotFile::new(path)
            .write(&snapshot)
            .with_context(|| format!("failed to save snapshot {}", path.display()))?;
        info!("saved {} records to {}", snapshot.record_count(), path.display());
    }

    for (kind, counter) in allocators.counters() {
        info!("{kind}: next identifier follows {counter}");
    }

    info!("SeafoodMan manager stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
