//! # Brew Detective console
//!
//! Runs the client headless against the real backend: commands on stdin,
//! page state on stdout.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use brew_infra::{
    HeadlessBrowser, InMemoryStorage, JsonFileStorage, JwtTokenDecoder, ReqwestTransport,
};
use web_client::console::{Command, Console, HELP};
use web_client::telemetry::{TelemetryConfig, init_telemetry};
use web_client::{AppConfig, AppContext, Ports, auth, layout};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    let start = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());

    tracing::info!(
        api_base_url = %config.api_base_url,
        storage = %config.storage_path.display(),
        start = %start,
        "Starting Brew Detective console"
    );

    let storage = JsonFileStorage::open(&config.storage_path)
        .with_context(|| format!("opening {}", config.storage_path.display()))?;
    let doc = Arc::new(layout::standard_document());
    let browser = Arc::new(HeadlessBrowser::new(&start));

    let ports = Ports {
        storage: Arc::new(storage),
        scratch: Arc::new(InMemoryStorage::new()),
        decoder: Arc::new(JwtTokenDecoder::new()),
        transport: Arc::new(ReqwestTransport::new()),
        document: doc.clone(),
        browser: browser.clone(),
    };
    let ctx = AppContext::new(config, ports);

    auth::boot(&ctx).await;

    let mut console = Console::new(ctx, doc, browser);
    print!("{}", console.report());
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("error: {}", e);
                continue;
            }
        };
        if command == Command::Help {
            println!("{}", HELP);
        }
        if !console.execute(command).await {
            break;
        }
        print!("{}", console.report());
    }

    tracing::info!("Console closed");
    Ok(())
}
