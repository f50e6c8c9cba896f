//! CLI for PullBroker
//!
//! Subcommands:
//! - `serve`: run the HTTP broker
//! - `sign`: print the signature of a JSON body under the configured secret

use clap::Parser;
use pullbroker::auth::Signer;
use pullbroker::broker::Broker;
use pullbroker::config::{Settings, load_config};
use pullbroker::transport::start_http_server;
use pullbroker::utils::logging;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pullbroker")]
enum Command {
    /// Start the HTTP broker
    Serve,
    /// Sign a JSON body (as sent to /poll or /ack) with the shared secret
    Sign {
        /// The complete JSON body with every field present,
        /// e.g. '{"machine_id":"m1","capabilities":[]}'
        body: String,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cmd = Command::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&config.log_level);

    let outcome = match cmd {
        Command::Serve => run_server(config).await,
        Command::Sign { body } => run_sign(&config, &body),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let broker = Arc::new(Broker::from_settings(&config.auth)?);

    if !broker.policy().admin_required() {
        info!("No admin key configured; admin endpoints are open");
    }

    tokio::select! {
        result = start_http_server(&addr, broker) => {
            result?;
            error!("HTTP server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

fn run_sign(config: &Settings, body: &str) -> Result<(), Box<dyn std::error::Error>> {
    let signer = Signer::new(&config.auth.shared_secret)?;
    println!("{}", signer.sign_json(body)?);
    Ok(())
}
