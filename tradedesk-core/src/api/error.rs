use thiserror::Error;

/// Errors from the brokerage REST API.
///
/// The `Display` output is the user-facing message; front ends render it
/// verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is extracted from the body, see
    /// [`super::message::extract_error_message`].
    #[error("{message}")]
    Status { status: u16, message: String },

    /// No response at all (connection refused, timeout, DNS...).
    #[error("Błąd połączenia z serwerem: {0}")]
    Transport(String),

    /// 2xx response whose body did not match the expected shape.
    #[error("Nieprawidłowa odpowiedź serwera: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short category label for error histories.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::Status { .. } => "HTTP",
            ApiError::Transport(_) => "NET",
            ApiError::Decode(_) => "DATA",
        }
    }
}
