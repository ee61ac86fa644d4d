//! Application error types and user-facing error formatting.
//!
//! Every failure in the pipeline is funnelled into [`SearchError`]. The
//! variants exist so the diagnostic stream can say *what* went wrong; the
//! launcher only ever sees the single error entry rendered by
//! [`crate::output::write_error`].

use thiserror::Error;

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

/// Exit code for any handled failure (configuration, transport, remote,
/// format, usage). Success exits with `0`.
pub const EXIT_ERROR: i32 = 1;

// ---------------------------------------------------------------------------
// Unified application error
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SearchError {
    /// Domain or token missing, or the config file could not be read.
    #[error("{0}")]
    Configuration(String),

    /// The response body was not the JSON we expected.
    #[error("{0}")]
    ResponseFormat(String),

    /// The service answered with a top-level `message`.
    #[error("{0}")]
    Remote(String),

    /// The HTTP request itself failed (DNS, refused connection, TLS, ...).
    #[error(transparent)]
    Connection(#[from] ureq::Error),

    /// Command-line arguments could not be parsed.
    #[error("{0}")]
    Usage(String),
}

impl SearchError {
    /// Return the appropriate process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        EXIT_ERROR
    }

    /// Return an optional human-readable hint that may help the user fix
    /// the problem.  Returns `None` when no specific guidance applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SearchError::Configuration(msg) if msg.contains("CHRONOSPHERE_DOMAIN") => {
                Some("set CHRONOSPHERE_DOMAIN or pass --url")
            }
            SearchError::Configuration(msg) if msg.contains("CHRONOSPHERE_API_TOKEN") => {
                Some("set CHRONOSPHERE_API_TOKEN or pass --token")
            }
            SearchError::Connection(_) => Some("check the domain and your network connection"),
            SearchError::ResponseFormat(_) => {
                Some("the domain may not point at a Chronosphere instance")
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_exits_with_one() {
        let errs = [
            SearchError::Configuration("x".into()),
            SearchError::ResponseFormat("x".into()),
            SearchError::Remote("x".into()),
            SearchError::Usage("x".into()),
        ];
        for err in errs {
            assert_eq!(err.exit_code(), EXIT_ERROR);
        }
    }

    #[test]
    fn hint_missing_domain() {
        let err = SearchError::Configuration("CHRONOSPHERE_DOMAIN not specified.".into());
        assert!(err.hint().unwrap().contains("--url"));
    }

    #[test]
    fn hint_missing_token() {
        let err = SearchError::Configuration("CHRONOSPHERE_API_TOKEN not specified.".into());
        assert!(err.hint().unwrap().contains("--token"));
    }

    #[test]
    fn hint_none_for_remote() {
        let err = SearchError::Remote("unauthorized".into());
        assert!(err.hint().is_none());
    }

    #[test]
    fn display_is_bare_message() {
        let err = SearchError::Remote("permission denied".into());
        let msg = format!("{err}");
        assert_eq!(msg, "permission denied");
        assert!(!msg.contains("Remote"));
    }
}
