use std::env;
use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use log::info;
use crate::config::load_config;
use crate::initialization::init;
use crate::logging::setup_logger;
use crate::pipeline::{run, Outcome};

mod classifier;
mod config;
mod errors;
mod initialization;
mod logging;
mod manager_octopus;
mod manager_telegram;
mod models;
mod pipeline;
mod presentation;
mod run_marker;
mod window_cost;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config_path = env::var("AGILEPOST_CONFIG").unwrap_or("config.toml".to_string());
    let config = load_config(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;

    setup_logger(&config.general).context("failed to set up logging")?;
    info!("===== agilepost started =====");

    let mut mgr = init(&config)?;

    // Day-ahead prices are published per UTC day
    let tomorrow = (Utc::now() + TimeDelta::days(1)).date_naive();
    let outcome = run(&mut mgr, &config.tariff, &config.general.timezone, tomorrow)?;

    if outcome == Outcome::Posted {
        info!("Posted prices for {}", tomorrow);
    }
    info!("===== agilepost finished =====");

    Ok(())
}
