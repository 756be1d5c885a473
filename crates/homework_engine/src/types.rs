use std::error::Error as StdError;
use std::fmt;

use homework_core::{FormatError, ValidationError};

/// Failures of the status poll itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("request to the API failed: {0}")]
    Request(String),
    #[error("request to the API timed out")]
    Timeout,
    /// `body` is kept for the log only; it stays out of the notification text.
    #[error("API responded with status {code}")]
    BadStatus { code: u16, body: String },
    #[error("API response could not be decoded: {0}")]
    Undecodable(String),
}

/// Failures of message delivery. These are logged and never escalate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("telegram request failed: {0}")]
    Request(String),
    #[error("telegram rejected the message ({code}): {description}")]
    Rejected { code: u16, description: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transport,
    Validation,
    Domain,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorClass::Transport => write!(f, "transport"),
            ErrorClass::Validation => write!(f, "validation"),
            ErrorClass::Domain => write!(f, "domain"),
        }
    }
}

/// Anything that can fail one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    #[error(transparent)]
    Transport(#[from] ApiError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Domain(#[from] FormatError),
}

impl CycleError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CycleError::Transport(_) => ErrorClass::Transport,
            CycleError::Validation(_) => ErrorClass::Validation,
            CycleError::Domain(_) => ErrorClass::Domain,
        }
    }
}

/// Renders an error and every `source()` below it as one `outer: inner: ...` line.
pub(crate) fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // Some wrappers already embed their cause in their own message.
        if !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request")]
    struct Outer(#[source] Middle);

    #[derive(Debug, thiserror::Error)]
    #[error("tcp connect error")]
    struct Middle(#[source] io::Error);

    #[test]
    fn error_chain_includes_every_cause() {
        let err = Outer(Middle(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "connection refused",
        )));
        assert_eq!(
            error_chain(&err),
            "error sending request: tcp connect error: connection refused"
        );
    }

    #[derive(Debug, thiserror::Error)]
    #[error("client error: {0}")]
    struct Embeds(#[source] io::Error);

    #[test]
    fn error_chain_skips_causes_already_in_the_message() {
        let err = Embeds(io::Error::new(io::ErrorKind::Other, "dns failure"));
        assert_eq!(error_chain(&err), "client error: dns failure");

        let wrapped = CycleError::from(ApiError::Timeout);
        assert_eq!(error_chain(&wrapped), "request to the API timed out");
    }
}
