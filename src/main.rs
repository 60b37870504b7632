use anyhow::Result;
use clap::Parser;
use colored::*;
use log::{debug, info};
use std::path::Path;

use sentinel_token::cli::{Cli, logging};
use sentinel_token::ui::Reporter;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init(Path::new(logging::LOG_FILE));

    // Optional; feeds the clap `env` fallbacks below
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let cli = Cli::parse();
    info!("Starting sentinel-token");

    let credentials = match cli.credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("{} {:#}", "❌".bright_red().bold(), e);
            std::process::exit(1);
        }
    };
    let fetcher = cli.fetcher()?;

    let mut reporter = Reporter::stdout();
    let token = fetcher.fetch(&credentials, &mut reporter).await;
    reporter.access_token(token.as_deref());

    Ok(())
}

