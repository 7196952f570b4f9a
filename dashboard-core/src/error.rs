use std::error::Error as StdError;

use thiserror::Error;

/// Message used when a failed response carries no readable provider error.
pub const GENERIC_PROVIDER_MESSAGE: &str = "An unknown HTTP error occurred.";

/// Errors produced while fetching weather for a city.
#[derive(Debug, Error)]
pub enum FetchError {
    /// City name was empty or whitespace; no request was sent.
    #[error("City name cannot be empty")]
    EmptyInput,

    /// The request never produced a response (DNS, refused connection, timeout).
    #[error("Network or connection error: {0}")]
    Network(String),

    /// The provider answered with a 4xx/5xx status.
    #[error("HTTP error {status} for '{city}': {message}")]
    Provider {
        city: String,
        status: u16,
        message: String,
    },

    /// Anything else, typically a malformed or incomplete response body.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// The dashboard image could not be produced.
#[derive(Debug, Error)]
#[error("Failed to render dashboard to '{path}': {cause}")]
pub struct RenderError {
    pub path: String,
    pub cause: String,
}

impl RenderError {
    pub fn new(path: impl Into<String>, cause: impl ToString) -> Self {
        Self {
            path: path.into(),
            cause: cause.to_string(),
        }
    }
}

/// Failure of the fetch-then-render pipeline.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Render an error and its sources as a single `a: b: c` line.
pub(crate) fn describe_error(err: &dyn StdError) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !msg.contains(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        source = cause.source();
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_names_city_and_message() {
        let err = FetchError::Provider {
            city: "Atlantis".into(),
            status: 400,
            message: "No matching location found.".into(),
        };

        let msg = err.to_string();
        assert!(msg.contains("Atlantis"));
        assert!(msg.contains("No matching location found."));
        assert!(msg.contains("400"));
    }

    #[test]
    fn dashboard_error_is_transparent() {
        let err = DashboardError::from(FetchError::EmptyInput);
        assert_eq!(err.to_string(), FetchError::EmptyInput.to_string());
    }

    #[test]
    fn describe_error_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let outer = WrappedError(inner);

        assert_eq!(describe_error(&outer), "outer failed: refused");
    }

    #[derive(Debug)]
    struct WrappedError(std::io::Error);

    impl std::fmt::Display for WrappedError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("outer failed")
        }
    }

    impl StdError for WrappedError {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }
}
