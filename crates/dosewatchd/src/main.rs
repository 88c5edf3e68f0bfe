//! dosewatchd - The dosewatch reminder service
//!
//! This is the main entry point for the dosewatchd service.
//! It wires together all the components:
//! - Configuration loading
//! - Store initialization from seed files
//! - Reminder engine and ticker

use anyhow::{Context, Result};
use clap::Parser;
use dosewatch_config::{load_config, Config, ConfigError};
use dosewatch_core::{DoseNotifier, ReminderEngine, ReminderTicker, SharedEngine};
use dosewatch_store::{MemoryStore, Seed, Store};
use dosewatch_util::{
    default_config_path, format_clock_time, format_datetime_full, is_mock_time_active, ScheduleId,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// dosewatchd - Medication reminder service
#[derive(Parser, Debug)]
#[command(name = "dosewatchd")]
#[command(about = "Medication reminder service", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Seed directory override (or set DOSEWATCH_DATA_DIR env var)
    #[arg(short, long, env = "DOSEWATCH_DATA_DIR")]
    seed_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Main service state
struct Service {
    engine: SharedEngine,
    config: Config,
}

impl Service {
    fn new(args: &Args) -> Result<Self> {
        let config = match load_config(&args.config) {
            Ok(config) => {
                info!(config_path = %args.config.display(), "Configuration loaded");
                config
            }
            Err(ConfigError::ReadError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    config_path = %args.config.display(),
                    "No configuration file, using defaults"
                );
                Config::default()
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to load config from {:?}", args.config));
            }
        };

        let seed_dir = args
            .seed_dir
            .clone()
            .unwrap_or_else(|| config.service.seed_dir.clone());

        let seed = Seed::load_dir(&seed_dir)
            .with_context(|| format!("Failed to load seed data from {:?}", seed_dir))?;

        let store: Arc<dyn Store> = Arc::new(MemoryStore::from_seed(seed));
        if !store.is_healthy() {
            anyhow::bail!("Store failed health check after seeding from {:?}", seed_dir);
        }
        info!(seed_dir = %seed_dir.display(), "Store initialized");

        let mut engine = ReminderEngine::new(store, config.reminders.clone());
        let now = dosewatch_util::now();
        engine.refresh(now).context("Failed to load today's schedules")?;

        for entry in engine.today_view(now) {
            info!(
                time = %entry.schedule.time,
                medication = %entry.medication_name,
                checked = entry.schedule.checked,
                overdue = entry.overdue,
                "Today"
            );
        }

        Ok(Self {
            engine: Arc::new(Mutex::new(engine)),
            config,
        })
    }

    async fn run(self) -> Result<()> {
        let mut sigterm = signal(SignalKind::terminate())
            .context("Failed to create SIGTERM handler")?;
        let mut sigint = signal(SignalKind::interrupt())
            .context("Failed to create SIGINT handler")?;

        let notifier = |id: &ScheduleId, name: &str| {
            warn!(
                schedule_id = %id,
                medication = %name,
                at = %format_clock_time(&dosewatch_util::now()),
                "Time to take medication"
            );
        };
        let notifier: Arc<dyn DoseNotifier> = Arc::new(notifier);

        let ticker = ReminderTicker::spawn(
            self.engine.clone(),
            notifier,
            self.config.reminders.tick_interval,
            dosewatch_util::now,
        );

        info!("Service running");

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully");
            }
        }

        ticker.shutdown().await;

        let engine = self.engine.lock().await;
        let store = engine.store();
        if !store.is_healthy() {
            warn!("Store unhealthy at shutdown");
        }
        match store.get_pending_schedules() {
            Ok(pending) => info!(unchecked = pending.len(), "Shutdown complete"),
            Err(e) => warn!(error = %e, "Shutdown complete, store unavailable"),
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        now = %format_datetime_full(&dosewatch_util::now()),
        mock_time = is_mock_time_active(),
        "dosewatchd starting"
    );

    let service = Service::new(&args)?;
    service.run().await
}
