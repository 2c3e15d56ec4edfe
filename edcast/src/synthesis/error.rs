//! Error types for speech synthesis.
//!
//! [`SynthesisError`] covers every way a call to the speech backend can fail.
//! It integrates into the crate [`Error`](crate::Error) via `Error::Synthesis`
//! and is flattened into a diagnostic string by
//! [`SynthesisOutcome`](super::SynthesisOutcome).

/// Error type for speech synthesis.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum SynthesisError {
    /// Authentication or authorization failure.
    #[error("[{provider}] {message}")]
    Auth {
        /// Provider name.
        provider: String,
        /// Error description.
        message: String,
    },

    /// Rate limit or quota exceeded.
    #[error("[{provider}] rate limit exceeded: {message}")]
    RateLimited {
        /// Provider name.
        provider: String,
        /// Error description from the provider.
        message: String,
    },

    /// Non-success HTTP status with an unparseable body.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Provider-reported error.
    #[error("[{provider}] {message}")]
    Provider {
        /// Provider name.
        provider: String,
        /// Error description.
        message: String,
        /// Optional error code or status from the provider.
        code: Option<String>,
    },

    /// Network or connection error.
    #[error("{0}")]
    Network(String),

    /// Response body did not have the expected shape.
    #[error("expected {expected}, got {got}")]
    ResponseFormat {
        /// Expected format description.
        expected: String,
        /// Actual format received.
        got: String,
    },

    /// The response was well-formed but carried no audio.
    #[error("no audio data in response: {0}")]
    EmptyAudio(String),

    /// Internal error.
    #[error("{0}")]
    Internal(String),
}

impl SynthesisError {
    /// Create an authentication error.
    #[must_use]
    pub fn auth(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a rate limit error.
    #[must_use]
    pub fn rate_limited(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error.
    #[must_use]
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a provider-specific error.
    #[must_use]
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Create a provider error with an error code.
    #[must_use]
    pub fn provider_code(
        provider: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a response format error.
    #[must_use]
    pub fn response_format(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::ResponseFormat {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Create an empty-audio error.
    #[must_use]
    pub fn empty_audio(reason: impl Into<String>) -> Self {
        Self::EmptyAudio(reason.into())
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether a later retry might succeed. Nothing in this crate retries;
    /// the flag only shapes the user-facing hint.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Network(_))
    }
}

impl From<reqwest::Error> for SynthesisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network("request timed out")
        } else if err.is_connect() {
            Self::network(format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::response_format("JSON response", err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_provider() {
        let err = SynthesisError::auth("gemini", "API key not valid");
        assert_eq!(err.to_string(), "[gemini] API key not valid");

        let err = SynthesisError::provider_code("gemini", "INVALID_ARGUMENT", "bad voice");
        assert_eq!(err.to_string(), "[gemini] bad voice");
    }

    #[test]
    fn transient_classification() {
        assert!(SynthesisError::rate_limited("gemini", "quota").is_transient());
        assert!(SynthesisError::network("reset").is_transient());
        assert!(!SynthesisError::auth("gemini", "nope").is_transient());
        assert!(!SynthesisError::empty_audio("no parts").is_transient());
    }

    #[test]
    fn http_status_display() {
        let err = SynthesisError::http_status(502, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "HTTP 502: <html>bad gateway</html>");
    }
}
