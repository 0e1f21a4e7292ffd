mod cli;
mod commands;
mod lane;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use parkgate_attendant::Attendant;
use parkgate_core::{AppConfig, SystemClock};
use parkgate_storage::{
    Database, DatabaseConfig, SqliteDeviceRepository, SqliteOperatorRepository,
    SqliteVehicleRepository,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, GlobalOpts};

pub type Terminal =
    Attendant<SqliteVehicleRepository, SqliteOperatorRepository, SqliteDeviceRepository>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load_or_create(&cli.global.config)
        .with_context(|| format!("loading {}", cli.global.config.display()))?;

    let db = Database::new(DatabaseConfig::from(&config.storage))
        .await
        .with_context(|| format!("opening {}", config.storage.database_path.display()))?;

    debug!(device = %config.device.id, role = %config.device.role, "terminal starting");

    let terminal = build_terminal(config, &db, &cli.global);
    commands::dispatch(cli.command, terminal, &db, &cli.global).await
}

/// Attendant on this terminal's simulated gate and printer.
fn build_terminal(config: AppConfig, db: &Database, global: &GlobalOpts) -> Terminal {
    Attendant::new(
        config,
        SqliteVehicleRepository::new(db.pool().clone()),
        SqliteOperatorRepository::new(db.pool().clone()),
        SqliteDeviceRepository::new(db.pool().clone()),
        SystemClock,
    )
    .with_config_path(global.config.clone())
}
