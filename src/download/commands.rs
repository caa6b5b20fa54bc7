//! Download wait operations used by the binary

use log::info;
use reqwest::Client;
use std::io::Write;

use super::types::PollOutcome;
use super::view::{JsonView, StatusView, TerminalView};
use super::worker::PollSession;
use crate::config::{Config, OutputFormat};

fn build_view<W: Write + Send + 'static>(format: OutputFormat, out: W) -> Box<dyn StatusView + Send> {
    match format {
        OutputFormat::Text => Box::new(TerminalView::new(out)),
        OutputFormat::Json => Box::new(JsonView::new(out)),
    }
}

/// Poll the configured status URL, rendering to `out`, until a terminal state
pub async fn wait_for_download_to<W: Write + Send + 'static>(
    config: &Config,
    out: W,
) -> Result<PollOutcome, String> {
    let client = Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

    info!(
        "waiting for download: url={} interval={:?}",
        config.url, config.interval
    );

    let view = build_view(config.output, out);
    let outcome = PollSession::new(client, config.url.clone(), view)
        .with_interval(config.interval)
        .run()
        .await;

    Ok(outcome)
}

/// Poll the configured status URL, rendering to stdout
pub async fn wait_for_download(config: &Config) -> Result<PollOutcome, String> {
    wait_for_download_to(config, std::io::stdout()).await
}
