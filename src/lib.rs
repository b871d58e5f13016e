pub mod config;
pub mod dns;
pub mod error;
pub mod ip;
pub mod reconcile;

pub use error::{Error, Result};

/// Sent on every outbound request
pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
