use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use finsense::core::log::init_logging;
use finsense::core::{CurrencyCode, Expense, GoalRequest};
use std::net::SocketAddr;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for finsense::AppCommand {
    fn from(cmd: Commands) -> finsense::AppCommand {
        match cmd {
            Commands::Analyze {
                income,
                expenses,
                currency,
            } => finsense::AppCommand::Analyze {
                income,
                expenses,
                currency,
            },
            Commands::Goal {
                target,
                current,
                monthly,
                months,
                currency,
            } => finsense::AppCommand::Goal {
                request: GoalRequest {
                    target,
                    current_savings: current,
                    monthly_contribution: monthly,
                    desired_months: months,
                },
                currency,
            },
            Commands::Convert { amount, from, to } => {
                finsense::AppCommand::Convert { amount, from, to }
            }
            Commands::Currencies => finsense::AppCommand::Currencies,
            Commands::Tips => finsense::AppCommand::Tips,
            Commands::Serve { listen } => finsense::AppCommand::Serve { listen },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Check a month of spending against the 50/30/20 rule
    #[command(visible_alias = "analizar")]
    Analyze {
        /// Monthly income
        #[arg(long)]
        income: f64,
        /// Expense as AMOUNT:CATEGORY (need, want or saving), repeatable
        #[arg(short, long = "expense")]
        expenses: Vec<Expense>,
        /// Currency of the amounts
        #[arg(long)]
        currency: Option<CurrencyCode>,
    },
    /// Project how long a savings goal takes
    #[command(visible_alias = "meta")]
    Goal {
        /// Amount to reach
        #[arg(long)]
        target: f64,
        /// Savings already put aside
        #[arg(long, default_value_t = 0.0)]
        current: f64,
        /// Monthly contribution
        #[arg(long)]
        monthly: Option<f64>,
        /// Desired timeframe in months, ignored unless positive
        #[arg(long, allow_negative_numbers = true)]
        months: Option<i64>,
        #[arg(long)]
        currency: Option<CurrencyCode>,
    },
    /// Convert an amount between supported currencies
    #[command(visible_alias = "convertir")]
    Convert {
        amount: f64,
        from: CurrencyCode,
        to: CurrencyCode,
    },
    /// List supported currencies with their current rates
    #[command(visible_alias = "monedas")]
    Currencies,
    /// Show personal finance tips
    #[command(visible_alias = "recomendaciones")]
    Tips,
    /// Run the HTTP API
    Serve {
        /// Address to listen on, overrides the configured one
        #[arg(long)]
        listen: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match (&cli.command, cli.verbose) {
        (_, true) => LevelFilter::DEBUG,
        (Some(Commands::Serve { .. }), false) => LevelFilter::INFO,
        _ => LevelFilter::OFF,
    };
    init_logging(level);

    let result = match cli.command {
        Some(Commands::Setup) => finsense::cli::setup::setup(),
        Some(cmd) => finsense::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
