//! Attendance and salary server.
//!
//! Loads the service settings, then serves the JSON API.

use std::path::PathBuf;

use attendance_payroll::api::{AppState, create_router};
use attendance_payroll::config::ConfigLoader;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "attendance-payroll", version, about)]
struct Cli {
    /// Settings file (YAML). Built-in defaults are used when omitted.
    #[arg(long, env = "PAYROLL_CONFIG")]
    config: Option<PathBuf>,

    /// Record file, overriding the settings file.
    #[arg(long, env = "PAYROLL_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Address to listen on, overriding the settings file.
    #[arg(long, env = "PAYROLL_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::defaults(),
    };
    let mut config = loader.into_config();
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }

    let state = AppState::from_config(&config);
    let router = create_router(state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!(
        address = %config.bind_address,
        data_file = %config.data_file.display(),
        "Attendance service listening"
    );
    axum::serve(listener, router).await?;

    Ok(())
}
