//! # Seed Data Generator
//!
//! Registers demo rebates and products for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./rebate.db
//! cargo run -p rebate-db --bin seed
//!
//! # Specify database path
//! cargo run -p rebate-db --bin seed -- --db ./data/rebate.db
//! ```
//!
//! ## Generated Data
//! One rebate per incentive kind, each paired with a product that supports
//! it, plus one product that supports nothing:
//!
//! | Rebate       | Kind            | Product      | Try volume | Result |
//! |--------------|-----------------|--------------|------------|--------|
//! | `REB-RATE`   | FixedRateRebate | `PROD-WIDGET`| 5          | 100.00 |
//! | `REB-UOM`    | AmountPerUom    | `PROD-BULK`  | 10         | 25.00  |
//! | `REB-CASH`   | FixedCashAmount | `PROD-GIFT`  | any        | 50.00  |
//!
//! Registration skips identifiers that already exist, so re-running is safe.

use std::env;

use rebate_core::{IncentiveType, Money, Product, Rate, Rebate, SupportedIncentives};
use rebate_db::{Database, DbConfig};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// (rebate identifier, kind, amount, percentage, product identifier, price, uom, supported bits)
const DEMO_PAIRS: &[(&str, IncentiveType, i64, u32, &str, i64, &str, u8)] = &[
    ("REB-RATE", IncentiveType::FixedRateRebate, 0, 10, "PROD-WIDGET", 20_000, "each", 0b001),
    ("REB-UOM", IncentiveType::AmountPerUom, 250, 0, "PROD-BULK", 1_250, "kg", 0b011),
    ("REB-CASH", IncentiveType::FixedCashAmount, 5_000, 0, "PROD-GIFT", 999, "box", 0b100),
    ("REB-NONE", IncentiveType::FixedCashAmount, 1_000, 0, "PROD-PLAIN", 500, "each", 0b000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,rebate=debug,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let db_path = match parse_args(&args) {
        Ok(SeedCommand::Run { db_path }) => db_path,
        Ok(SeedCommand::Help) => {
            print_usage();
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!();
            print_usage();
            return Err(message.into());
        }
    };

    println!("Rebate Seed Data Generator");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let service = db.rebate_service();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    for (rebate, product) in demo_data() {
        service.register_rebate_and_product(&rebate, &product).await?;
        println!(
            "  {} ({}) ↔ {} [{}]",
            rebate.identifier, rebate.incentive, product.identifier, product.supported_incentives
        );
    }

    println!();
    println!(
        "✓ Seed complete: {} rebates, {} products",
        db.rebates().count().await?,
        db.products().count().await?
    );

    db.close().await;
    Ok(())
}

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum SeedCommand {
    Run { db_path: String },
    Help,
}

/// Parses `seed [--db PATH] [--help]`. Unknown arguments are ignored.
fn parse_args(args: &[String]) -> Result<SeedCommand, String> {
    let mut db_path = String::from("./rebate.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => match args.get(i + 1) {
                Some(path) => {
                    db_path = path.clone();
                    i += 1;
                }
                None => return Err(format!("{} requires a database path", args[i])),
            },
            "--help" | "-h" => return Ok(SeedCommand::Help),
            _ => {}
        }
        i += 1;
    }

    Ok(SeedCommand::Run { db_path })
}

fn print_usage() {
    println!("Rebate Seed Data Generator");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>    Database file path (default: ./rebate.db)");
    println!("  -h, --help         Show this help message");
}

/// Builds the demo rebate/product pairs.
///
/// Amounts and prices are given in cents, percentages in whole percent.
fn demo_data() -> Vec<(Rebate, Product)> {
    DEMO_PAIRS
        .iter()
        .map(
            |&(rebate_id, incentive, amount_cents, percent, product_id, price_cents, uom, bits)| {
                let rebate = Rebate {
                    identifier: rebate_id.to_string(),
                    incentive,
                    amount: Money::new(Decimal::new(amount_cents, 2)),
                    percentage: Rate::from_fraction(Decimal::new(i64::from(percent), 2)),
                };
                let product = Product {
                    identifier: product_id.to_string(),
                    price: Money::new(Decimal::new(price_cents, 2)),
                    uom: uom.to_string(),
                    supported_incentives: SupportedIncentives::from_bits(bits),
                };
                (rebate, product)
            },
        )
        .collect()
}
