use std::process::ExitCode;

use anyhow::Context;
use cctv_cli::main_lib::{build_briefing, init_tracing};
use cctv_cli::Config;
use clap::Parser;

/// Get a concise weather forecast and dressing tip for a city or country.
#[derive(Parser, Debug)]
#[command(name = "cctv", version, about)]
struct Cli {
    /// Location string, e.g. "Beijing, China".
    location: String,
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);
    let briefing = build_briefing(&config).context("Failed to set up clients")?;
    let summary = briefing.run(&cli.location).await?;
    Ok(summary)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
