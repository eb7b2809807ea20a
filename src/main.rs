//! ChatKit session service entry point.

use std::net::IpAddr;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chatkit_session::config::Config;
use chatkit_session::metrics;
use chatkit_session::startup;

/// ChatKit session service.
#[derive(Parser, Debug)]
#[command(name = "chatkit-session")]
#[command(about = "Mints ChatKit session client secrets for frontend clients")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Interface to bind (overrides BIND_HOST).
    #[arg(long, global = true)]
    host: Option<IpAddr>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("chatkit_session=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    metrics::init_metrics();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(args.host, args.port),
        Some(Command::Serve) | None => cmd_serve(args.host, args.port).await,
    }
}

/// Load configuration and apply CLI overrides.
fn load_config(host: Option<IpAddr>, port: Option<u16>) -> anyhow::Result<Config> {
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Some(host) = host {
        config.bind_host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(host: Option<IpAddr>, port: Option<u16>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CHATKIT SESSION SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match load_config(host, port) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!(
        "  API Key: {}",
        if config.has_api_key() { "present" } else { "missing" }
    );
    println!("  Base URL: {}", config.openai_base_url);
    println!("  Bind Address: {}", config.bind_addr());
    println!("  Upstream Timeout: {}ms", config.upstream_timeout_ms);
    println!("  Connect Timeout: {}ms", config.upstream_connect_timeout_ms);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server.
async fn cmd_serve(host: Option<IpAddr>, port: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = load_config(host, port)?;

    let state = startup::build_state(&config).map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");
    info!("Upstream: {}", config.openai_base_url);
    info!("Upstream timeout: {}ms", config.upstream_timeout_ms);

    let listener = startup::bind(&config).await?;
    startup::serve(listener, state).await?;

    Ok(())
}
