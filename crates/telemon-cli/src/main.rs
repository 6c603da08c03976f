//! telemon - operator console for industrial sensor telemetry
//!
//! Lists sensors and readings from the configured backend, registers new
//! readings and shows derived views (statistics, chart windows, risk).

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use telemon_client::{EndpointConfig, EndpointStore, TelemetryClient};
use telemon_core::DEFAULT_CHART_WINDOW;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "telemon")]
#[command(author, version, about = "Industrial sensor telemetry console")]
#[command(propagate_version = true)]
struct Cli {
    /// Backend URL for this invocation only (the saved endpoint is not changed)
    #[arg(short, long, env = "TELEMON_SERVER")]
    server: Option<String>,

    /// Endpoint config file path
    #[arg(short, long, env = "TELEMON_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change the saved backend endpoint
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List sensors and their declared status
    Sensors,

    /// List readings
    Readings {
        /// Only readings of this sensor
        #[arg(long)]
        sensor: Option<String>,
    },

    /// Register a new reading
    Submit {
        /// Sensor ID
        sensor: String,

        /// Reading value
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },

    /// Summary statistics for a sensor's readings
    Stats {
        /// Sensor ID
        sensor: String,
    },

    /// Most recent readings of a sensor, oldest first
    Chart {
        /// Sensor ID
        sensor: String,

        /// Number of points
        #[arg(long, default_value_t = DEFAULT_CHART_WINDOW)]
        window: usize,
    },

    /// Classify risk from a primary (e.g. humidity %) and optional secondary (e.g. tilt °) signal
    Risk {
        #[arg(long, allow_hyphen_values = true)]
        primary: f64,

        #[arg(long, allow_hyphen_values = true)]
        secondary: Option<f64>,
    },

    /// Compare a sensor's declared status with the one derived from its latest reading
    Status {
        /// Sensor ID
        sensor: String,
    },

    /// Test connectivity to the backend
    Test,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the saved endpoint
    Show,

    /// Save a new endpoint (must start with http:// or https://)
    Set { url: String },

    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let store = match &cli.config {
        Some(path) => EndpointStore::at(path),
        None => EndpointStore::open_default().context("Could not locate config directory")?,
    };

    let ctx = OutputContext::new(cli.output, cli.no_color, cli.quiet);

    match &cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&store, &ctx)?,
            ConfigAction::Set { url } => commands::config::set(&store, url, &ctx)?,
            ConfigAction::Path => commands::config::path(&store),
        },

        Commands::Sensors => {
            let client = create_client(&store, cli.server.as_deref())?;
            commands::sensors(&client, &ctx).await?;
        }

        Commands::Readings { sensor } => {
            let client = create_client(&store, cli.server.as_deref())?;
            commands::readings(&client, sensor.as_deref(), &ctx).await?;
        }

        Commands::Submit { sensor, value } => {
            let client = create_client(&store, cli.server.as_deref())?;
            commands::submit(&client, sensor, *value, &ctx).await?;
        }

        Commands::Stats { sensor } => {
            let client = create_client(&store, cli.server.as_deref())?;
            commands::stats(&client, sensor, &ctx).await?;
        }

        Commands::Chart { sensor, window } => {
            let client = create_client(&store, cli.server.as_deref())?;
            commands::chart(&client, sensor, *window, &ctx).await?;
        }

        Commands::Risk { primary, secondary } => {
            commands::risk(*primary, *secondary, &ctx)?;
        }

        Commands::Status { sensor } => {
            let client = create_client(&store, cli.server.as_deref())?;
            commands::status(&client, sensor, &ctx).await?;
        }

        Commands::Test => {
            let client = create_client(&store, cli.server.as_deref())?;
            if !commands::test_connection(&client, &ctx).await {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Client over the saved endpoint, or over `server` when given
fn create_client(store: &EndpointStore, server: Option<&str>) -> Result<TelemetryClient> {
    let client = match server {
        Some(url) => {
            tracing::debug!(server = url, "Using endpoint override");
            TelemetryClient::new(EndpointConfig::new(url))
        }
        None => {
            tracing::debug!(config = %store.path().display(), "Using saved endpoint");
            TelemetryClient::new(store.clone())
        }
    };
    client.context("Failed to create telemetry client")
}
