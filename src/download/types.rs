//! Status codes, response payloads and event types for download polling

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay between status checks, including the very first one
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// State of a download batch as reported by the status endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Open,
    Preparing,
    Done,
    Closed,
    Error,
}

impl PollStatus {
    /// Map a wire code to a status. Unknown codes yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(PollStatus::Open),
            1 => Some(PollStatus::Preparing),
            2 => Some(PollStatus::Done),
            3 => Some(PollStatus::Closed),
            4 => Some(PollStatus::Error),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            PollStatus::Open => 0,
            PollStatus::Preparing => 1,
            PollStatus::Done => 2,
            PollStatus::Closed => 3,
            PollStatus::Error => 4,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, PollStatus::Open | PollStatus::Preparing)
    }
}

impl std::fmt::Display for PollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollStatus::Open => write!(f, "open"),
            PollStatus::Preparing => write!(f, "preparing"),
            PollStatus::Done => write!(f, "done"),
            PollStatus::Closed => write!(f, "closed"),
            PollStatus::Error => write!(f, "error"),
        }
    }
}

/// JSON body returned by the status endpoint
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub state: i64,
    #[serde(default)]
    pub real_size: Option<u64>,
}

impl StatusResponse {
    pub fn status(&self) -> Option<PollStatus> {
        PollStatus::from_code(self.state)
    }
}

/// Visible areas of the waiting page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Preparing,
    Done,
    Error,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Preparing => write!(f, "preparing"),
            Region::Done => write!(f, "done"),
            Region::Error => write!(f, "error"),
        }
    }
}

/// How a poll session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Done,
    Closed,
    /// State 4 or a code outside the known range
    Failed { code: i64 },
    TransportFailed { reason: String },
}

impl PollOutcome {
    /// Region left visible once the session has ended
    pub fn region(&self) -> Region {
        match self {
            PollOutcome::Done => Region::Done,
            _ => Region::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PollOutcome::Done)
    }
}

/// Region visibility change event payload
#[derive(Debug, Clone, Serialize)]
pub struct RegionChanged {
    pub event: &'static str,
    pub region: Region,
    pub visible: bool,
    pub at: i64,
}

/// Progress text change event payload
#[derive(Debug, Clone, Serialize)]
pub struct ProgressChanged {
    pub event: &'static str,
    pub text: String,
    pub at: i64,
}

#[cfg(test)]
mod tests {
    use super::{PollOutcome, PollStatus, Region, StatusResponse};

    #[test]
    fn status_codes_round_trip_through_known_range() {
        for code in 0..=4 {
            let status = PollStatus::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
        assert_eq!(PollStatus::from_code(5), None);
        assert_eq!(PollStatus::from_code(-1), None);
    }

    #[test]
    fn only_open_and_preparing_are_non_terminal() {
        assert!(!PollStatus::Open.is_terminal());
        assert!(!PollStatus::Preparing.is_terminal());
        assert!(PollStatus::Done.is_terminal());
        assert!(PollStatus::Closed.is_terminal());
        assert!(PollStatus::Error.is_terminal());
    }

    #[test]
    fn response_accepts_null_and_missing_size() {
        let with_null: StatusResponse =
            serde_json::from_str(r#"{"state": 1, "real_size": null}"#).unwrap();
        assert_eq!(with_null.real_size, None);
        assert_eq!(with_null.status(), Some(PollStatus::Preparing));

        let missing: StatusResponse = serde_json::from_str(r#"{"state": 0}"#).unwrap();
        assert_eq!(missing.real_size, None);

        let extra: StatusResponse =
            serde_json::from_str(r#"{"state": 2, "real_size": 2048, "zip": "parts-1"}"#).unwrap();
        assert_eq!(extra.real_size, Some(2048));
    }

    #[test]
    fn only_done_outcome_leaves_done_region_visible() {
        assert_eq!(PollOutcome::Done.region(), Region::Done);
        assert_eq!(PollOutcome::Closed.region(), Region::Error);
        assert_eq!(PollOutcome::Failed { code: 9 }.region(), Region::Error);
        assert_eq!(
            PollOutcome::TransportFailed {
                reason: "refused".to_string()
            }
            .region(),
            Region::Error
        );
    }
}
