use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use essaycoach::cli::{Cli, Commands};
use essaycoach::client::HttpFeedbackClient;
use essaycoach::config::Config;
use essaycoach::{gateway, ui};

#[tokio::main]
async fn main() -> Result<()> {
    // Install default crypto provider for Rustls TLS before any client is built.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let config = Config::load_or_init()?;

    match cli.command {
        Commands::Serve { port, host } => {
            let port = port.unwrap_or_else(|| config.resolve_port());
            gateway::run_gateway(&host, port, &config).await
        }
        Commands::Write { gateway } => {
            let base_url = gateway.unwrap_or_else(|| config.gateway.base_url.clone());
            ui::run_write_flow(&base_url).await
        }
        Commands::Health { gateway } => {
            let base_url = gateway.unwrap_or_else(|| config.gateway.base_url.clone());
            let client = HttpFeedbackClient::new(&base_url);
            match client.health().await {
                Ok(health) => {
                    println!("{}: {}", health.status, health.message);
                    Ok(())
                }
                Err(e) => Err(anyhow::anyhow!("gateway health check failed: {e}")),
            }
        }
    }
}
