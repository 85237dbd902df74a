//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{CONNECT_TIMEOUT_SECS, DEFAULT_HTTPS_PORT, READ_TIMEOUT_SECS};
use crate::error_handling::InspectError;
use crate::tls::{ConnectionOptions, Target, VerificationPolicy};
use crate::validation::looks_like_domain;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the inspection result is printed on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Certificate details as text
    Plain,
    /// One JSON document
    Json,
}

/// Command-line configuration.
///
/// # Examples
///
/// ```
/// use cert_inspector::Config;
///
/// let config = Config {
///     domain: "www.google.com".to_string(),
///     ip: Some("142.250.185.46".to_string()),
///     ..Default::default()
/// };
/// assert!(config.target().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cert_inspector",
    version,
    about = "Fetch the certificate chain a TLS server presents and check it against a domain"
)]
pub struct Config {
    /// Domain to inspect, used as SNI and Host (e.g. www.example.com)
    #[arg(value_parser = parse_domain)]
    pub domain: String,

    /// Connect to this IPv4 address instead of resolving the domain
    #[arg(long, value_name = "IPV4")]
    pub ip: Option<String>,

    /// TCP port
    #[arg(long, default_value_t = DEFAULT_HTTPS_PORT)]
    pub port: u16,

    /// Enforce chain validation and hostname verification (default: trust all)
    #[arg(long)]
    pub strict: bool,

    /// TCP connect timeout in seconds
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_secs: u64,

    /// Handshake and read timeout in seconds
    #[arg(long, default_value_t = READ_TIMEOUT_SECS)]
    pub read_timeout_secs: u64,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            ip: None,
            port: DEFAULT_HTTPS_PORT,
            strict: false,
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            output: OutputFormat::Plain,
        }
    }
}

impl Config {
    /// Verification policy selected by `--strict`.
    pub fn policy(&self) -> VerificationPolicy {
        VerificationPolicy::from_trust_all(!self.strict)
    }

    /// Connector options derived from the CLI flags.
    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            read_timeout: Duration::from_secs(self.read_timeout_secs),
            policy: self.policy(),
        }
    }

    /// The inspection target: an IP override when `--ip` is given, the domain
    /// itself otherwise.
    ///
    /// # Errors
    ///
    /// `InspectError::InvalidTarget` for a malformed address or a domain that
    /// cannot be used as a hostname target.
    pub fn target(&self) -> Result<Target, InspectError> {
        match &self.ip {
            Some(ip) => Target::ip_override(ip, &self.domain, self.port),
            None => Target::hostname(&self.domain, self.port),
        }
    }
}

fn parse_domain(value: &str) -> Result<String, String> {
    if looks_like_domain(value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "'{value}' should be a valid domain (contain a dot and no whitespace)"
        ))
    }
}
