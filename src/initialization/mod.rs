//! Application initialization.
//!
//! Logging is the only process-wide resource. TLS configuration is built per
//! connection from the selected verification policy, so no global crypto
//! provider is installed.

mod logger;

pub use logger::init_logger_with;
