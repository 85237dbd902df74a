//! Application layer used by the CLI binary.
//!
//! This module provides:
//! - `run_inspection()` - turn a `Config` into one chain retrieval
//! - `LogObserver` - connector events routed to `log`
//! - `Inspection` / `InspectionReport` - text and JSON presentation
//! - `exit_code()` - process exit status for a failure

mod observer;
mod report;

use std::sync::Arc;

use log::debug;

use crate::config::Config;
use crate::error_handling::InspectError;
use crate::tls::Connector;

pub use observer::LogObserver;
pub use report::{Inspection, InspectionReport};

/// Exit status for invalid input.
pub const EXIT_INVALID_INPUT: i32 = 2;
/// Exit status for handshake and network failures.
pub const EXIT_REMOTE_FAILURE: i32 = 1;

/// Runs one inspection as described by `config`.
///
/// # Errors
///
/// Any `InspectError` from target validation or chain retrieval.
pub async fn run_inspection(config: &Config) -> Result<Inspection, InspectError> {
    let target = config.target()?;
    let options = config.connection_options();
    debug!(
        "Inspecting {target} with {:?} verification (connect {:?}, read {:?})",
        options.policy, options.connect_timeout, options.read_timeout
    );

    let chain = Connector::new(options)
        .with_observer(Arc::new(LogObserver))
        .fetch_chain(&target)
        .await?;

    Ok(Inspection {
        domain: target.server_name().to_string(),
        chain,
    })
}

/// Maps a failure to the process exit status.
pub fn exit_code(error: &InspectError) -> i32 {
    if error.is_client_error() {
        EXIT_INVALID_INPUT
    } else {
        EXIT_REMOTE_FAILURE
    }
}
