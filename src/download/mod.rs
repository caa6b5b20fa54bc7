//! Download readiness polling
//!
//! Waits for a server-side archive to be prepared:
//! - Polls the status endpoint once per interval until a terminal state
//! - Maps each state to preparing/done/error region visibility
//! - Shows the size prepared so far while the archive is being built
//! - Treats transport failures as terminal, with no retry

pub mod commands;
pub mod format;
pub mod types;
pub mod view;
pub mod worker;
