//! Pay-equity analysis service binary.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use peq_model::AnalysisConfig;
use peq_server::logging::{LogConfig, LogFormat, init_logging};
use peq_server::{AppState, app};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "peq-server", about = "Employee compensation analysis service")]
struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Path to the employees database.
    #[arg(long, default_value = "employees.db")]
    database: PathBuf,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let log_config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        },
    };
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let state = AppState::new(&cli.database, AnalysisConfig::default());
    let router = app(state);

    let addr = ("0.0.0.0", cli.port);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(error) => {
            eprintln!("error: failed to bind port {}: {error}", cli.port);
            std::process::exit(1);
        }
    };
    info!(port = cli.port, database = %cli.database.display(), "serving");
    if let Err(error) = axum::serve(listener, router).await {
        eprintln!("error: server failed: {error}");
        std::process::exit(1);
    }
}
