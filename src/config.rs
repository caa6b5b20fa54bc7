//! Command-line configuration

use clap::Parser;
use reqwest::Url;
use std::time::Duration;

/// Wait until a prepared download is ready.
#[derive(Parser, Debug)]
#[command(
    name = "zwp-wait",
    version = env!("CARGO_PKG_VERSION"),
    about = "Polls a download status endpoint until the archive is ready or has failed"
)]
pub struct Cli {
    /// Status URL of the download batch.
    pub url: String,

    /// Delay between status checks in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,

    /// Timeout for a single status request in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Emit one JSON event per line instead of text.
    #[arg(long)]
    pub json: bool,

    /// Log every status check.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validated settings for one wait
#[derive(Debug, Clone)]
pub struct Config {
    pub url: Url,
    pub interval: Duration,
    pub request_timeout: Duration,
    pub output: OutputFormat,
}

impl Cli {
    pub fn into_config(self) -> Result<Config, String> {
        let url = Url::parse(&self.url).map_err(|e| format!("Invalid status URL: {}", e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("Unsupported URL scheme: {}", url.scheme()));
        }
        if self.interval_ms == 0 {
            return Err("Poll interval must be greater than zero".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("Request timeout must be greater than zero".to_string());
        }

        Ok(Config {
            url,
            interval: Duration::from_millis(self.interval_ms),
            request_timeout: Duration::from_secs(self.timeout_secs),
            output: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        })
    }
}
