use thiserror::Error;
use tracing::error;

/// Failure taxonomy for the Looker client.
///
/// `Configuration` is always produced before any network I/O. `Transport`
/// and `Status` are the two request-failure shapes; `Status` renders as
/// `{status}:{reason}` and callers match on that.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),

    #[error("authentication failed: {status}:{reason}")]
    Authentication { status: u16, reason: String },

    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("{status}:{reason}")]
    Status { status: u16, reason: String },
}

impl Error {
    /// Configuration failure; logs the message at the point of detection.
    pub fn configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        error!("{message}");
        Self::Configuration(message)
    }

    /// Configuration failure for a required value that was not supplied.
    pub fn missing(field: &str) -> Self {
        Self::configuration(format!("{field} not provided"))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// `true` for both request-failure shapes, transport and status.
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}
