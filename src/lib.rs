use clap::Parser;
use env_logger::{Builder, Env};
use log::{error, info};
use std::process::ExitCode;

pub mod config;
pub mod download;
pub mod error;

pub use download::format::format_size;
pub use download::types::{PollOutcome, PollStatus, Region, StatusResponse};
pub use download::view::StatusView;
pub use download::worker::PollSession;
pub use error::PollError;

use config::Cli;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    if let Err(e) = Builder::from_env(Env::default().default_filter_or(default_filter)).try_init() {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(download::commands::wait_for_download(&config)) {
        Ok(outcome) if outcome.is_success() => {
            info!("download ready: {}", config.url);
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            info!("download not available: {:?}", outcome);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
