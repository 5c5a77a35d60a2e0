//! Shared utilities: IP helpers, LF time values, configuration validation.

pub mod duration;
pub mod ip_utils;
pub mod validation;

pub use duration::format_lf_time;
pub use ip_utils::{is_valid_ipv4, is_private_ip};
pub use validation::{validate_client_macs, validate_fallback_ip};
