//! GitHub API failure taxonomy.
//!
//! This module defines the closed set of failure shapes produced at the
//! boundary where the external client's errors are first caught. The
//! distinction between transient and terminal failures drives retry logic:
//!
//! - **Transient** failures are retriable (5xx server errors, a fixed set of
//!   OS-level connection errors)
//! - **Terminal** failures propagate immediately (4xx including 404,
//!   timeouts, anything unclassifiable)
//!
//! Classifying once, at the boundary, means retry decisions operate over a
//! typed set rather than inspecting free-form error shapes downstream.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// OS-level network failure codes that warrant a retry.
///
/// Membership in this enum IS the transient set: any connection-level failure
/// that doesn't map to one of these is treated as terminal rather than
/// retried blindly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkErrorCode {
    /// Peer reset the connection (ECONNRESET).
    ConnectionReset,
    /// Connection refused (ECONNREFUSED).
    ConnectionRefused,
    /// Write on a closed socket (EPIPE).
    BrokenPipe,
    /// Socket-level timeout (ETIMEDOUT).
    TimedOut,
    /// Connection aborted (ECONNABORTED).
    ConnectionAborted,
    /// Temporary DNS failure, resolution may succeed on retry (EAI_AGAIN).
    DnsTemporaryFailure,
    /// DNS resolution failed outright (ENOTFOUND).
    DnsNotFound,
}

impl NetworkErrorCode {
    /// Returns a short human-readable label for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkErrorCode::ConnectionReset => "connection reset",
            NetworkErrorCode::ConnectionRefused => "connection refused",
            NetworkErrorCode::BrokenPipe => "broken pipe",
            NetworkErrorCode::TimedOut => "timed out",
            NetworkErrorCode::ConnectionAborted => "connection aborted",
            NetworkErrorCode::DnsTemporaryFailure => "dns temporary failure",
            NetworkErrorCode::DnsNotFound => "dns not found",
        }
    }
}

impl fmt::Display for NetworkErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A GitHub API failure, categorized for retry decisions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    /// The API responded with an HTTP error status.
    #[error("GitHub API error (HTTP {status}): {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The error message reported by GitHub.
        message: String,
    },

    /// The request failed below HTTP with a recognized connection error.
    #[error("network error ({code}): {message}")]
    Network {
        /// The classified OS-level failure.
        code: NetworkErrorCode,
        /// The underlying error text.
        message: String,
    },

    /// A locally-enforced deadline fired before the call completed.
    ///
    /// The message is exactly the one configured at the call site, so
    /// operators can tell which call stalled.
    #[error("{message}")]
    Timeout { message: String },

    /// An error whose shape this crate does not recognize.
    #[error("GitHub API error: {message}")]
    Unknown { message: String },
}

impl ApiFailure {
    /// Creates an `Unknown` failure from a message.
    pub fn unknown(message: impl Into<String>) -> Self {
        ApiFailure::Unknown {
            message: message.into(),
        }
    }

    /// Returns true if retrying this failure may succeed.
    ///
    /// Server errors (5xx) and recognized connection errors are transient.
    /// Everything else - client errors including 404, timeouts, unknown
    /// shapes - is terminal: fail fast rather than retry blindly.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiFailure::Status { status, .. } => (500..600).contains(status),
            ApiFailure::Network { .. } => true,
            ApiFailure::Timeout { .. } | ApiFailure::Unknown { .. } => false,
        }
    }

    /// Returns true if the API reported HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiFailure::Status { status: 404, .. })
    }

    /// Categorizes an octocrab error at the boundary.
    ///
    /// GitHub-reported errors carry their HTTP status directly. Transport
    /// errors are resolved by walking the source chain for an `io::Error`,
    /// with a message-based fallback for DNS failures, which surface without
    /// a distinguishing `io::ErrorKind`. Anything else is `Unknown`.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        if let octocrab::Error::GitHub { source, .. } = &err {
            return ApiFailure::Status {
                status: source.status_code.as_u16(),
                message: source.message.clone(),
            };
        }

        let message = err.to_string();
        let code =
            network_code_from_chain(&err).or_else(|| network_code_from_message(&message));
        match code {
            Some(code) => ApiFailure::Network { code, message },
            None => ApiFailure::Unknown { message },
        }
    }
}

/// Walks an error's source chain looking for a classifiable `io::Error`.
fn network_code_from_chain(err: &(dyn StdError + 'static)) -> Option<NetworkErrorCode> {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if let Some(code) = network_code_from_io(io) {
                return Some(code);
            }
        }
        current = e.source();
    }
    None
}

fn network_code_from_io(err: &std::io::Error) -> Option<NetworkErrorCode> {
    use std::io::ErrorKind;
    match err.kind() {
        ErrorKind::ConnectionReset => Some(NetworkErrorCode::ConnectionReset),
        ErrorKind::ConnectionRefused => Some(NetworkErrorCode::ConnectionRefused),
        ErrorKind::BrokenPipe => Some(NetworkErrorCode::BrokenPipe),
        ErrorKind::TimedOut => Some(NetworkErrorCode::TimedOut),
        ErrorKind::ConnectionAborted => Some(NetworkErrorCode::ConnectionAborted),
        _ => None,
    }
}

/// Classifies DNS and socket failures that only surface as message text.
///
/// Hyper reports resolver errors as opaque strings; the patterns here are the
/// ones glibc and macOS emit for EAI_AGAIN and EAI_NONAME.
fn network_code_from_message(message: &str) -> Option<NetworkErrorCode> {
    let message_lower = message.to_lowercase();

    if message_lower.contains("temporary failure in name resolution")
        || (message_lower.contains("dns") && message_lower.contains("try again"))
    {
        return Some(NetworkErrorCode::DnsTemporaryFailure);
    }

    if message_lower.contains("failed to lookup address")
        || message_lower.contains("name or service not known")
        || message_lower.contains("nodename nor servname")
    {
        return Some(NetworkErrorCode::DnsNotFound);
    }

    if message_lower.contains("connection reset") {
        return Some(NetworkErrorCode::ConnectionReset);
    }

    if message_lower.contains("connection refused") {
        return Some(NetworkErrorCode::ConnectionRefused);
    }

    if message_lower.contains("timed out") {
        return Some(NetworkErrorCode::TimedOut);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn status(status: u16) -> ApiFailure {
        ApiFailure::Status {
            status,
            message: "test".to_string(),
        }
    }

    #[test]
    fn server_errors_are_transient() {
        assert!(status(500).is_transient());
        assert!(status(502).is_transient());
        assert!(status(503).is_transient());
        assert!(status(599).is_transient());
    }

    #[test]
    fn client_errors_are_terminal() {
        assert!(!status(404).is_transient());
        assert!(!status(403).is_transient());
        assert!(!status(422).is_transient());
        assert!(!status(429).is_transient());
    }

    #[test]
    fn every_network_code_is_transient() {
        let codes = [
            NetworkErrorCode::ConnectionReset,
            NetworkErrorCode::ConnectionRefused,
            NetworkErrorCode::BrokenPipe,
            NetworkErrorCode::TimedOut,
            NetworkErrorCode::ConnectionAborted,
            NetworkErrorCode::DnsTemporaryFailure,
            NetworkErrorCode::DnsNotFound,
        ];
        for code in codes {
            let failure = ApiFailure::Network {
                code,
                message: code.as_str().to_string(),
            };
            assert!(failure.is_transient(), "{code} should be transient");
        }
    }

    #[test]
    fn timeout_and_unknown_are_terminal() {
        let timeout = ApiFailure::Timeout {
            message: "deadline".to_string(),
        };
        assert!(!timeout.is_transient());
        assert!(!ApiFailure::unknown("???").is_transient());
    }

    #[test]
    fn not_found_detection() {
        assert!(status(404).is_not_found());
        assert!(!status(500).is_not_found());
        assert!(!ApiFailure::unknown("missing").is_not_found());
    }

    #[test]
    fn io_error_chain_classification() {
        use std::io::ErrorKind;

        // A wrapper error whose source is an io::Error, mimicking how
        // transport errors arrive nested inside client errors.
        #[derive(Debug)]
        struct Wrapper(std::io::Error);

        impl fmt::Display for Wrapper {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "request failed: {}", self.0)
            }
        }

        impl StdError for Wrapper {
            fn source(&self) -> Option<&(dyn StdError + 'static)> {
                Some(&self.0)
            }
        }

        let cases = [
            (ErrorKind::ConnectionReset, NetworkErrorCode::ConnectionReset),
            (
                ErrorKind::ConnectionRefused,
                NetworkErrorCode::ConnectionRefused,
            ),
            (ErrorKind::BrokenPipe, NetworkErrorCode::BrokenPipe),
            (ErrorKind::TimedOut, NetworkErrorCode::TimedOut),
            (
                ErrorKind::ConnectionAborted,
                NetworkErrorCode::ConnectionAborted,
            ),
        ];
        for (kind, expected) in cases {
            let wrapper = Wrapper(std::io::Error::from(kind));
            assert_eq!(network_code_from_chain(&wrapper), Some(expected));
        }

        let unclassified = Wrapper(std::io::Error::from(ErrorKind::PermissionDenied));
        assert_eq!(network_code_from_chain(&unclassified), None);
    }

    #[test]
    fn dns_message_classification() {
        assert_eq!(
            network_code_from_message("Temporary failure in name resolution"),
            Some(NetworkErrorCode::DnsTemporaryFailure)
        );
        assert_eq!(
            network_code_from_message("failed to lookup address information"),
            Some(NetworkErrorCode::DnsNotFound)
        );
        assert_eq!(
            network_code_from_message("connection reset by peer"),
            Some(NetworkErrorCode::ConnectionReset)
        );
        assert_eq!(network_code_from_message("Not found"), None);
    }

    #[test]
    fn timeout_display_is_the_configured_message() {
        let failure = ApiFailure::Timeout {
            message: "GitHub API timeout getting installation for octo/widgets".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "GitHub API timeout getting installation for octo/widgets"
        );
    }

    proptest! {
        #[test]
        fn status_transience_matches_5xx_range(code in 100u16..600) {
            prop_assert_eq!(status(code).is_transient(), (500..600).contains(&code));
        }
    }
}
