//! Ledger - Command-Line Binary
//!
//! Loads the books, runs one command and saves them when it changed
//! anything. Reports go to stdout, logs to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Seed a sample scenario and look at it
//! ledger demo --date 2024-12-31
//! ledger trial-balance
//!
//! # Post a manual entry; accounts are codes or names
//! ledger post -m "Owner investment" --debit 1000=10000 --credit "Owner's Equity=10000"
//!
//! # Period end
//! ledger depreciate --as-of 2024-01-31 --life-years 5
//! ledger close --date 2024-12-31
//! ```
//!
//! # Environment Variables
//!
//! * `LEDGER_DATA_FILE` - Ledger data file (default: ledger_data.json)
//! * `LEDGER_BACKUP_DIR` - Backup directory (default: backups)
//! * `LEDGER_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `LEDGER_DEPRECIATION_LIFE_YEARS` - Default useful life for `depreciate` (default: 5)

use anyhow::Context;
use clap::Parser;
use interface_cli::{file_store, run, Cli, CliConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config().with_overrides(&cli);

    init_tracing(&config.log_level);

    tracing::debug!(
        data_file = %config.data_file.display(),
        backup_dir = %config.backup_dir.display(),
        "Using ledger store"
    );

    let store = file_store(&config);
    let output = run(&cli.command, &config, &store)
        .with_context(|| format!("ledger command failed ({})", config.data_file.display()))?;
    println!("{}", output);
    Ok(())
}

/// Loads CLI configuration from environment variables.
///
/// Falls back to default values if the environment cannot be read.
fn load_config() -> CliConfig {
    CliConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Ignoring invalid LEDGER_* configuration: {}", e);
        CliConfig::default()
    })
}

/// Initializes the tracing subscriber, writing to stderr so reports stay
/// clean on stdout.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
