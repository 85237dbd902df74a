//! Hooks for reporting connector progress.
//!
//! The connector never logs on its own. Callers that want visibility hand it
//! an `InspectionObserver`; the default is `NoopObserver`.

use crate::certificate::{CertificateChain, SessionInfo};
use crate::error_handling::InspectError;

use super::target::Target;

/// Receives progress events from a `Connector`.
///
/// All methods have empty default bodies. Implementations must be cheap and
/// must not block; they run inline on the inspection task.
pub trait InspectionObserver: Send + Sync {
    /// About to open the TCP connection.
    fn connecting(&self, _target: &Target) {}

    /// Handshake finished.
    fn handshake_complete(&self, _target: &Target, _session: &SessionInfo) {}

    /// Chain read back from the session.
    fn chain_received(&self, _target: &Target, _chain: &CertificateChain) {}

    /// The inspection failed. The error is still returned to the caller.
    fn failed(&self, _target: &Target, _error: &InspectError) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl InspectionObserver for NoopObserver {}
