//! Error taxonomy shared by every layer.
//!
//! [`ErrorKind`] is the closed set of failure classes a chat call can end
//! with. Adapters classify provider failures into it, the orchestration
//! service decides retries from it, and the HTTP boundary maps it to a
//! status code and a stable message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified failure of a chat completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed or empty conversation, or a request the provider rejected
    /// as malformed.
    InvalidInput,
    /// Credential or permission failure talking to the provider.
    Unauthorized,
    /// Provider quota or backpressure signal.
    RateLimited,
    /// Transient provider-side fault or network failure.
    ProviderUnavailable,
    /// The per-call deadline elapsed.
    Timeout,
    /// Provider failure that fits no other class.
    UnknownProviderError,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::InvalidInput,
        ErrorKind::Unauthorized,
        ErrorKind::RateLimited,
        ErrorKind::ProviderUnavailable,
        ErrorKind::Timeout,
        ErrorKind::UnknownProviderError,
    ];

    /// Whether a failure of this kind is eligible for bounded retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorKind::RateLimited | ErrorKind::ProviderUnavailable | ErrorKind::Timeout
        )
    }

    /// Stable identifier used in error payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::RateLimited => "RateLimited",
            ErrorKind::ProviderUnavailable => "ProviderUnavailable",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::UnknownProviderError => "UnknownProviderError",
        }
    }

    /// Caller-facing description. Never carries provider detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "The request conversation is malformed or empty",
            ErrorKind::Unauthorized => "The gateway is not authorized to use the model provider",
            ErrorKind::RateLimited => "The model provider is rate limiting requests",
            ErrorKind::ProviderUnavailable => "The model provider is temporarily unavailable",
            ErrorKind::Timeout => "The model provider did not respond in time",
            ErrorKind::UnknownProviderError => "The model provider returned an unexpected error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_kinds() {
        let transient: Vec<_> = ErrorKind::ALL
            .iter()
            .filter(|k| k.is_transient())
            .copied()
            .collect();
        assert_eq!(
            transient,
            vec![
                ErrorKind::RateLimited,
                ErrorKind::ProviderUnavailable,
                ErrorKind::Timeout
            ]
        );
    }

    #[test]
    fn test_as_str_matches_serde_name() {
        for kind in ErrorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_public_messages_are_distinct() {
        let mut messages: Vec<_> = ErrorKind::ALL.iter().map(|k| k.public_message()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), ErrorKind::ALL.len());
    }
}
