use crate::cli::Cli;
use crate::config::AppConfig;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod config;
mod db;
mod domain;
mod errors;
mod map;
mod pipeline;
mod prompts;
mod remote;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = cli::execute(cli, config) {
        eprintln!("❌ Run failed: {e}");
        std::process::exit(1);
    }
}
