use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Exit status for a missing or invalid configuration value
pub const EXIT_CONFIG: u8 = 1;
/// Exit status when the public IP could not be resolved
pub const EXIT_NETWORK: u8 = 2;
/// Exit status for any DNS API failure
pub const EXIT_API: u8 = 3;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Public IP service unreachable, non-success or returned garbage
    #[error("Unable to resolve public IP: {0}")]
    Network(String),

    /// DNS API answered with a non-2xx status
    #[error("DNS API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("DNS API request failed: {0}")]
    Transport(String),

    #[error("Unexpected DNS API response: {0}")]
    Decode(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(_) => EXIT_CONFIG,
            Error::Network(_) => EXIT_NETWORK,
            Error::Api { .. } | Error::Transport(_) | Error::Decode(_) => EXIT_API,
        }
    }
}
