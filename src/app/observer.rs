//! `log`-backed inspection observer.

use log::{debug, info, warn};

use crate::certificate::{CertificateChain, SessionInfo};
use crate::error_handling::InspectError;
use crate::tls::{InspectionObserver, Target};

/// Forwards connector events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl InspectionObserver for LogObserver {
    fn connecting(&self, target: &Target) {
        debug!("Connecting to {target}");
    }

    fn handshake_complete(&self, target: &Target, session: &SessionInfo) {
        debug!(
            "Handshake with {} complete: protocol={} cipher={}",
            target.endpoint(),
            session.protocol_version.as_deref().unwrap_or("unknown"),
            session.cipher_suite.as_deref().unwrap_or("unknown")
        );
    }

    fn chain_received(&self, target: &Target, chain: &CertificateChain) {
        info!(
            "Received {} certificate{} from {}",
            chain.len(),
            if chain.len() == 1 { "" } else { "s" },
            target
        );
    }

    fn failed(&self, target: &Target, error: &InspectError) {
        warn!("Inspection of {target} failed: {error}");
    }
}
