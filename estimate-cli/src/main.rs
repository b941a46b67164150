use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use estimate_cli::app::{self, QuoteChoices};
use estimate_cli::csv_loader;
use estimate_cli::logging::{self, LogConfig};
use estimate_cli::render::{BatchLine, BreakdownPanel, FormPanel, OptionsPanel, ResultPanel};
use estimate_cli::session::Session;
use estimate_core::{CurrencyFormat, EstimateView, PricingEngine};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Construction cost estimator.
///
/// Prices a project from its type, area, floor count, material class and
/// timeline.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML file overriding the built-in base rates and multipliers.
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `estimate_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Hide log records on the console.
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price a single project.
    Quote {
        #[command(flatten)]
        choices: QuoteChoices,

        /// Print every factor that went into the estimate.
        #[arg(long, default_value_t = false)]
        breakdown: bool,
    },

    /// List every option with its rate or multiplier.
    Options,

    /// Price every row of a CSV file.
    Batch {
        /// CSV file with project_type, area_sqm, floors, material_tier and
        /// timeline_tier columns.
        file: PathBuf,
    },

    /// Edit a form interactively from standard input.
    Session,
}

// ─── logging ─────────────────────────────────────────────────────────────────

fn init_logging(cli: &Cli) -> Result<()> {
    logging::init(&LogConfig {
        filter: cli.log_level.clone(),
        file: cli.log_file.clone(),
        console: !cli.quiet,
    })
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    debug!(version = env!("CARGO_PKG_VERSION"), "starting");

    let rates = app::load_rate_table(cli.rates.as_deref())?;
    let engine = PricingEngine::new(&rates);
    let currency = CurrencyFormat::RU_RUB;

    match cli.command {
        Command::Quote { choices, breakdown } => {
            let form = choices.to_form()?;
            let view = form.view(&engine);
            println!("{}", FormPanel(&form));
            print!(
                "{}",
                ResultPanel {
                    view: &view,
                    currency: &currency,
                }
            );

            if breakdown {
                if let Some(input) = form.input() {
                    let breakdown = engine.breakdown(&input);
                    println!();
                    println!(
                        "{}",
                        BreakdownPanel {
                            breakdown: &breakdown,
                            currency: &currency,
                        }
                    );
                }
            }
        }
        Command::Options => {
            print!(
                "{}",
                OptionsPanel {
                    engine: &engine,
                    currency: &currency,
                }
            );
        }
        Command::Batch { file } => {
            let rows = csv_loader::load_from_file(&file)
                .with_context(|| format!("Failed to load quotes: {}", file.display()))?;
            info!(rows = rows.len(), file = %file.display(), "loaded batch");

            let mut priced = 0usize;
            for row in &rows {
                let view = row.form.view(&engine);
                if matches!(view, EstimateView::Amount(_)) {
                    priced += 1;
                }
                println!(
                    "{}",
                    BatchLine {
                        row: row.row,
                        view: &view,
                        currency: &currency,
                    }
                );
            }
            info!(priced, incomplete = rows.len() - priced, "batch complete");
        }
        Command::Session => {
            let mut session = Session::new(engine, currency);
            session.run(io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}
