// Fintent console entry point
// Reads communications from stdin and prints the view aggregates as JSON.

use anyhow::Context;
use fintent_core::actors::StoreState;
use fintent_core::config::AnalysisMode;
use fintent_core::remote::HttpAnalysisClient;
use fintent_core::views::{CommunicationView, DashboardView, InsightsView};
use fintent_core::{seed, telemetry};
use fintent_core::{AnalysisSource, AppConfig, CommunicationStore, StoreHandle};
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Applies one console line. Returns `false` on `:quit`.
async fn handle_line(store: &StoreHandle, line: &str) -> anyhow::Result<bool> {
    match line {
        ":quit" => return Ok(false),
        ":refresh" => {
            store.refresh_insights().await?;
            print_json(&InsightsView::from_snapshot(&store.snapshot().await?))?;
        }
        ":clear" => {
            store.clear_all().await?;
            print_json(&DashboardView::from_snapshot(&store.snapshot().await?))?;
        }
        ":dashboard" => {
            print_json(&DashboardView::from_snapshot(&store.snapshot().await?))?;
        }
        ":insights" => {
            print_json(&InsightsView::from_snapshot(&store.snapshot().await?))?;
        }
        text => match store.append(text.to_string()).await {
            Ok(_) => print_json(&CommunicationView::from_snapshot(&store.snapshot().await?))?,
            // A failed append leaves the store as it was; report it and keep reading.
            Err(e) => eprintln!("Failed to analyze communication: {}", e),
        },
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    telemetry::init_tracing(config.log_format)?;

    let source = match config.analysis_mode {
        AnalysisMode::Local => AnalysisSource::Local,
        AnalysisMode::Remote => {
            let client = HttpAnalysisClient::from_config(&config)?;
            info!(endpoint = %client.endpoint(), "Using external analysis endpoint");
            AnalysisSource::Remote(Arc::new(client))
        }
    };

    let state = if config.seed_data {
        seed::seed_state()
    } else {
        StoreState::default()
    };
    let store = StoreHandle::with_state(source, state);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match handle_line(&store, line).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => error!("Command failed: {:#}", e),
        }
    }

    store.shutdown().await?;
    Ok(())
}
