use clap::{Parser, Subcommand};
use solarq_core::config::max_identifier_attempts_from_env_value;
use solarq_core::constants::MAX_IDENTIFIER_ATTEMPTS_ENV;
use solarq_core::{
    allocate_identifier, CoreConfig, IdentifierKind, IdentifierService, InMemoryIdentifierStore,
    Decimal, Quotation, QuotationAggregator,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "solarq")]
#[command(about = "Solar quotation marketplace tooling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate requirement or quotation identifiers
    GenerateId {
        /// requirement or quotation
        kind: IdentifierKind,
        /// How many identifiers to print
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// Never print the same identifier twice in one batch
        #[arg(long)]
        unique: bool,
    },
    /// Check an identifier against the format for its kind
    ValidateId {
        /// Identifier text, e.g. QUOT/04821/B0193
        text: String,
        /// requirement or quotation
        kind: IdentifierKind,
    },
    /// Recompute and print the total of a quotation stored as JSON
    QuoteTotal {
        /// Path to the quotation JSON file
        path: PathBuf,
    },
}

/// Entry point for the `solarq` CLI.
///
/// # Environment Variables
/// - `RUST_LOG`: log filter (logs go to stderr; default `solarq=info`)
/// - `SOLARQ_MAX_IDENTIFIER_ATTEMPTS`: attempt limit for `generate-id --unique`
fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("solarq=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::GenerateId {
            kind,
            count,
            unique,
        }) => {
            if unique {
                let attempts = max_identifier_attempts_from_env_value(
                    std::env::var(MAX_IDENTIFIER_ATTEMPTS_ENV).ok(),
                )?;
                let config = CoreConfig::new(attempts)?;
                let mut store = InMemoryIdentifierStore::new();
                for _ in 0..count {
                    println!("{}", allocate_identifier(&mut store, kind, &config)?);
                }
                tracing::info!("allocated {} distinct {} identifiers", store.len(), kind);
            } else {
                for _ in 0..count {
                    println!("{}", IdentifierService::generate(kind));
                }
            }
        }
        Some(Commands::ValidateId { text, kind }) => {
            if IdentifierService::validate(&text, kind) {
                println!("valid {} identifier: {}", kind, text);
            } else {
                println!("not a valid {} identifier: {:?}", kind, text);
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::QuoteTotal { path }) => {
            let contents = std::fs::read_to_string(&path)?;
            let quotation: Quotation = serde_json::from_str(&contents)?;
            tracing::info!(
                "loaded {} with {} components from {}",
                quotation.id(),
                quotation.components().len(),
                path.display()
            );
            let quotation = QuotationAggregator::recompute(quotation)?;
            print!("{}", render_breakdown(&quotation)?);
        }
        None => {
            println!("Use 'solarq --help' for commands");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Renders a priced quotation as one line per component followed by the totals, plus the price
/// per kilowatt for the fixed capacity classes.
fn render_breakdown(quotation: &Quotation) -> anyhow::Result<String> {
    let mut out = format!(
        "Quotation {} ({} {})\n",
        quotation.id(),
        quotation.capacity(),
        quotation.topology()
    );

    for component in quotation.components() {
        let line = QuotationAggregator::line_total(component)?;
        out.push_str(&format!(
            "  {:<20} {:<16} {:>5} x {:>12} = {:>14}\n",
            component.category.as_str(),
            component.brand.as_str(),
            component.quantity,
            component.unit_price,
            line
        ));
    }

    if let Some(charge) = quotation.installation_charge() {
        out.push_str(&format!("  {:<56} {:>14}\n", "installation", charge));
    }

    let total = quotation
        .total_price()
        .ok_or_else(|| anyhow::anyhow!("quotation {} has not been priced", quotation.id()))?;
    out.push_str(&format!("  {:<56} {:>14}\n", "total", total));

    if let Some(kw) = quotation.capacity().kilowatts() {
        if let Some(per_kw) = total.checked_div(Decimal::from(kw)) {
            out.push_str(&format!("  {:<56} {:>14}\n", "per kW", per_kw.round_dp(2)));
        }
    }

    Ok(out)
}
