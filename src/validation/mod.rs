//! Syntactic checks on addresses and domain names.
//!
//! Two IP checks with different policies:
//! - `is_valid_ipv4()` - strict dotted-quad check used for IP-override targets
//! - `is_ip_literal()` - recognizes any IPv4/IPv6 literal; used to refuse IP
//!   literals where a hostname is required
//!
//! `looks_like_domain()` is the loose shape check applied to user input before
//! it reaches the connector.
//!
//! All functions are pure and perform no I/O.

mod address;
mod domain;

pub use address::{is_ip_literal, is_valid_ipv4, parse_ipv4};
pub use domain::looks_like_domain;
