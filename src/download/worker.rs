//! Poll worker - status checks, state transitions and the poll loop

use log::{debug, info, warn};
use reqwest::{Client, Url};
use std::time::Duration;
use tokio::task::JoinHandle;

use super::format::format_size;
use super::types::{PollOutcome, PollStatus, Region, StatusResponse, POLL_INTERVAL};
use super::view::StatusView;
use crate::error::PollError;

/// What the loop does after a successful check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Reschedule,
    Finish(PollOutcome),
}

/// Fetch and decode the status document once
pub async fn fetch_status(client: &Client, url: &Url) -> Result<StatusResponse, PollError> {
    let response = client.get(url.clone()).send().await?;

    if !response.status().is_success() {
        return Err(PollError::HttpStatus(response.status().as_u16()));
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

fn finish<V: StatusView + ?Sized>(view: &mut V, outcome: PollOutcome) -> PollOutcome {
    view.set_visible(Region::Preparing, false);
    view.set_visible(outcome.region(), true);
    outcome
}

/// Update the view for a decoded response and decide whether to keep polling
pub fn apply_status<V: StatusView + ?Sized>(view: &mut V, response: &StatusResponse) -> Step {
    match response.status() {
        Some(PollStatus::Open) | Some(PollStatus::Preparing) => {
            view.set_visible(Region::Preparing, true);
            view.set_progress(&format_size(response.real_size));
            Step::Reschedule
        }
        Some(PollStatus::Done) => Step::Finish(finish(view, PollOutcome::Done)),
        Some(PollStatus::Closed) => Step::Finish(finish(view, PollOutcome::Closed)),
        Some(PollStatus::Error) => Step::Finish(finish(
            view,
            PollOutcome::Failed {
                code: response.state,
            },
        )),
        None => {
            warn!("status endpoint returned unknown state {}", response.state);
            Step::Finish(finish(
                view,
                PollOutcome::Failed {
                    code: response.state,
                },
            ))
        }
    }
}

/// Update the view for a failed check. Failures are never retried.
pub fn apply_failure<V: StatusView + ?Sized>(view: &mut V, error: &PollError) -> PollOutcome {
    warn!("status check failed: {}", error);
    finish(
        view,
        PollOutcome::TransportFailed {
            reason: error.to_string(),
        },
    )
}

/// A single wait on one status URL
///
/// Each iteration sleeps for the interval, checks the status once and
/// updates the view. Only one sleep is ever pending. The loop ends on the
/// first terminal state or failure; dropping the future stops it earlier.
pub struct PollSession<V> {
    client: Client,
    url: Url,
    interval: Duration,
    view: V,
}

impl<V: StatusView> PollSession<V> {
    pub fn new(client: Client, url: Url, view: V) -> Self {
        Self {
            client,
            url,
            interval: POLL_INTERVAL,
            view,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub async fn run(mut self) -> PollOutcome {
        let mut last_state: Option<i64> = None;
        let mut checks: u64 = 0;

        loop {
            tokio::time::sleep(self.interval).await;
            checks += 1;
            debug!("status check #{} for {}", checks, self.url);

            let response = match fetch_status(&self.client, &self.url).await {
                Ok(response) => response,
                Err(e) => return apply_failure(&mut self.view, &e),
            };

            if last_state != Some(response.state) {
                match response.status() {
                    Some(status) => info!("download {}: {}", self.url, status),
                    None => info!("download {}: state {}", self.url, response.state),
                }
                last_state = Some(response.state);
            }

            if let Step::Finish(outcome) = apply_status(&mut self.view, &response) {
                info!("stopped polling {} after {} checks", self.url, checks);
                return outcome;
            }
        }
    }
}

impl<V: StatusView + Send + 'static> PollSession<V> {
    /// Run the session on the tokio runtime in the background
    pub fn spawn(self) -> JoinHandle<PollOutcome> {
        tokio::spawn(self.run())
    }
}
