pub mod cli;
pub mod core;
pub mod providers;
pub mod server;

use crate::core::config::AppConfig;
use crate::core::{CurrencyCode, Expense, GoalRequest, RateCache};
use anyhow::Result;
use std::net::SocketAddr;
use tracing::{debug, info};

pub enum AppCommand {
    Analyze {
        income: f64,
        expenses: Vec<Expense>,
        currency: Option<CurrencyCode>,
    },
    Goal {
        request: GoalRequest,
        currency: Option<CurrencyCode>,
    },
    Convert {
        amount: f64,
        from: CurrencyCode,
        to: CurrencyCode,
    },
    Currencies,
    Tips,
    Serve {
        listen: Option<SocketAddr>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let default_currency = || config.currency.parse::<CurrencyCode>();

    match command {
        AppCommand::Analyze {
            income,
            expenses,
            currency,
        } => {
            let currency = match currency {
                Some(c) => c,
                None => default_currency()?,
            };
            cli::analyze::run(income, &expenses, currency)
        }
        AppCommand::Goal { request, currency } => {
            let currency = match currency {
                Some(c) => c,
                None => default_currency()?,
            };
            cli::goal::run(&request, currency)
        }
        AppCommand::Convert { amount, from, to } => {
            let loader = providers::rate_loader(&config.rates);
            cli::currency::convert(amount, from, to, &loader).await
        }
        AppCommand::Currencies => {
            let loader = providers::rate_loader(&config.rates);
            cli::currency::list(&loader).await
        }
        AppCommand::Tips => cli::tips::run(),
        AppCommand::Serve { listen } => {
            let mut server_config = config.server.clone();
            if let Some(addr) = listen {
                server_config.listen_addr = addr;
            }
            info!("finsense server starting...");
            let rates = RateCache::load(
                providers::rate_loader(&config.rates),
                config.rates.refresh_interval(),
            )
            .await;
            server::serve(server::AppState::new(rates), &server_config).await
        }
    }
}
