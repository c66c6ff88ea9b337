mod client;
mod config;
mod entities;
mod error;
mod incident;
mod ir;
mod jsonreader;
mod poller;
mod status;
mod store;
mod transport;
mod update;

use std::time::Duration;

use clap::Parser;
use tracing::info;

use client::ZabbixClient;
use config::{Cli, FleetConfig};
use poller::{ExitSignal, Poller};
use status::StatusBoard;
use store::memory::{MemoryNormalizedStore, MemoryRawCache};
use transport::Transport;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug,reqwest=info" } else { "warn,zbxpoller=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let fleet = match FleetConfig::load(&cli) {
        Ok(fleet) => fleet,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    info!(sources = fleet.sources.len(), status_port = fleet.status_port, "starting zbxpoller");

    let http = reqwest::Client::new();
    let status = StatusBoard::new();
    let norm = MemoryNormalizedStore::new();
    let exit = ExitSignal::new();

    let mut handles = Vec::with_capacity(fleet.sources.len());
    for source in &fleet.sources {
        let transport = Transport::new(http.clone(), source.endpoint());
        let client = ZabbixClient::new(transport, source.user.clone(), source.password.clone());
        let raw = MemoryRawCache::new();

        let poller = Poller::new(
            source.id.clone(),
            client,
            raw,
            norm.clone(),
            Duration::from_secs(source.poll_interval_sec),
            Duration::from_secs(source.retry_interval_sec),
            exit.clone(),
            status.clone(),
        );

        info!(source = %source.id, host = %source.host, port = source.port, "poller starting");
        handles.push(tokio::spawn(poller.run()));
    }

    let app = status::router(status.clone());
    let addr = format!("0.0.0.0:{}", fleet.status_port);
    let listener = tokio::net::TcpListener::bind(&addr).await.expect("failed to bind status listener");
    info!(addr = %addr, "status endpoint listening");
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("status server error");
    });

    tokio::signal::ctrl_c().await.expect("failed to listen for ctrl-c");
    info!("shutdown requested, waiting for in-flight cycles to finish");
    exit.request_exit();

    for handle in handles {
        let _ = handle.await;
    }
    server.abort();
}
