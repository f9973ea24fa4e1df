//! # Rebate Runner Entry Point
//!
//! ```bash
//! REBATE_DB_PATH=./rebate.db cargo run -p rebate-runner
//! ```
//!
//! Exits non-zero after printing the error if anything fails.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match rebate_runner::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
