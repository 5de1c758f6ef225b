//! Local host for the price agent.
//!
//! Stands in for the agent runtime: every command line becomes one task, run
//! through `TaskHandler::process_task` with a fresh cancellable `TaskContext`,
//! and the reply is printed to stdout.
//!
//! Usage example (CLI):
//! ```bash
//! price_agent --command "/price BTC"
//! echo "/market 0x6982508145454ce325ddbe47a25d4ec3d2311933" | price_agent --json
//! price_agent --kv --command "/market ETH"
//! ```
//!
//! Ctrl+C cancels the task in flight and the next command still runs; when idle it exits.
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use log::{error, info, warn};
use price_agent::handler::{AGENT_CAPABILITIES, AGENT_DESCRIPTION, AGENT_NAME};
use price_agent::{AgentConfig, InFlight, PriceAgent, Resolution, TaskHandler};
use price_common::{PriceError, Result, Summary};
use serde_json::json;
use std::io::{self, BufRead, Write};

/// How a reply is printed.
#[derive(Debug, Clone, Copy)]
enum Output {
    Overview,
    Json,
    KeyValue,
}

fn main() -> Result<(), PriceError> {
    init_logger();
    let args = Args::parse();

    let config = AgentConfig::from_env()?;
    info!("Starting {} agent...", AGENT_NAME);
    info!("{}", AGENT_DESCRIPTION);
    info!("Capabilities: {:?}", AGENT_CAPABILITIES);
    if config.cmc_api_key.is_none() {
        warn!("CMC_API_KEY is not set; symbol lookups go straight to CoinGecko");
    }
    let agent = PriceAgent::from_config(&config)?;

    let output = if args.json {
        Output::Json
    } else if args.kv {
        Output::KeyValue
    } else {
        Output::Overview
    };

    let in_flight = InFlight::default();
    {
        let in_flight = in_flight.clone();
        ctrlc::set_handler(move || {
            if in_flight.interrupt() {
                info!("Ctrl+C received. Cancelled the running task.");
            } else {
                info!("Ctrl+C received. Shutting down...");
                std::process::exit(0);
            }
        })
        .map_err(|e| PriceError::Host(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    if let Some(command) = args.command.as_deref() {
        return run_task(&agent, &in_flight, command, output);
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = run_task(&agent, &in_flight, &line, output) {
            if matches!(e, PriceError::Io(_)) {
                return Err(e);
            }
        }
    }
    info!("Input closed, stopping.");
    Ok(())
}

/// Runs one task and prints its reply. Task failures are printed as their user message.
fn run_task(agent: &PriceAgent, in_flight: &InFlight, input: &str, output: Output) -> Result<(), PriceError> {
    let ctx = in_flight.begin();
    let outcome = match output {
        Output::Overview => agent.process_task(&ctx, input),
        Output::Json => agent
            .dispatcher()
            .resolve(&ctx, input)
            .and_then(|resolution| render_json(&resolution)),
        Output::KeyValue => agent
            .dispatcher()
            .resolve(&ctx, input)
            .map(|resolution| render_kv(&resolution)),
    };
    in_flight.finish();

    let mut stdout = io::stdout().lock();
    match outcome {
        Ok(reply) => writeln!(stdout, "{}", reply)?,
        Err(e) => {
            error!("{}", e);
            writeln!(stdout, "{}", e.user_message())?;
            stdout.flush()?;
            return Err(e);
        }
    }
    stdout.flush()?;
    Ok(())
}

fn render_json(resolution: &Resolution) -> Result<String, PriceError> {
    let value = match resolution {
        Resolution::Quote(quote) => serde_json::to_value(quote)?,
        Resolution::Message(text) => json!({ "message": text }),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

fn render_kv(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Quote(quote) => Summary::from(quote).to_kv_string(),
        Resolution::Message(text) => text.clone(),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
