//! # Rebate Runner
//!
//! Interactive console for registering a product and a rebate, then
//! calculating the rebate for a volume.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Runner Session                                 │
//! │                                                                         │
//! │  1. Initialize Logging (stderr, RUST_LOG or default filter)             │
//! │  2. Load RunnerConfig from REBATE_DB_* variables                        │
//! │  3. Open SQLite database, run migrations                                │
//! │  4. Product Info ──► Rebate Info ──► register (skip if present)         │
//! │  5. Volume ──► RebateService::calculate ──► print outcome               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod console;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use rebate_core::{CalculateRebateRequest, CalculateRebateResult, RebateService};
use rebate_db::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, RunnerConfig};
pub use console::{Console, ConsoleError};

/// Runs one interactive session against stdin and stdout.
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting rebate runner");

    let config = RunnerConfig::from_env()?;
    info!(
        path = %config.database_path.display(),
        max_connections = config.max_connections,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("failed to open rebate database")?;
    info!("Database connected and migrations applied");

    let service = db.rebate_service();
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let session = run_session(&service, &mut console).await;
    db.close().await;

    session.map(|_| ())
}

/// Collects input, registers the entities and reports the calculation.
pub async fn run_session<R, W>(
    service: &RebateService,
    console: &mut Console<R, W>,
) -> anyhow::Result<CalculateRebateResult>
where
    R: BufRead,
    W: Write,
{
    let product = console.read_product()?;
    let rebate = console.read_rebate()?;

    service.register_rebate_and_product(&rebate, &product).await?;

    let volume = console.read_volume()?;

    let request = CalculateRebateRequest {
        rebate_identifier: rebate.identifier,
        product_identifier: product.identifier,
        volume,
    };

    let result = service.calculate(&request).await?;
    console.report(&result)?;

    Ok(result)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with prompts.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rebate=trace` - Show trace for rebate crates only
/// - Default: `info,rebate=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rebate=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
