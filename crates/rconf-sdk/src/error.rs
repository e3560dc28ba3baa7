//! Error taxonomy reported by providers and the configuration reader.

use thiserror::Error;

/// Boxed underlying cause carried by some [`ConfigError`] variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while reading provider configuration or loading remote data.
///
/// Every variant is returned to the immediate caller; nothing here is logged
/// and swallowed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is absent from the configuration fragment.
    #[error("no configuration setting found for key '{path}'")]
    Missing { path: String },

    /// A setting is present but holds a value of another type.
    #[error("'{path}' has type {found} rather than {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A setting cannot be used as given (malformed URL, unreachable host, ...).
    #[error("invalid value at '{path}': {message}")]
    BadValue { path: String, message: String },

    /// The remote document could not be parsed and the parser attributes the
    /// failure to an underlying cause.
    #[error("invalid path '{path}': {message}")]
    BadPath {
        path: String,
        message: String,
        #[source]
        source: BoxError,
    },

    /// The remote document could not be parsed and no cause is attributable.
    #[error("{origin}: validation failed for '{path}': {message}")]
    ValidationFailed {
        path: String,
        origin: String,
        message: String,
    },

    /// Transport-level failure while exchanging the request and response.
    #[error("{origin}: {message}")]
    Io {
        origin: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A file object could not be decoded or written by the host.
    #[error("file object '{key}': {message}")]
    FileObject { key: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_cites_path_and_message() {
        let err = ConfigError::BadValue {
            path: "url".to_string(),
            message: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value at 'url': relative URL without a base"
        );
    }

    #[test]
    fn bad_path_exposes_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad bytes");
        let err = ConfigError::BadPath {
            path: "https://example.com/app.toml".to_string(),
            message: "std::io::error::Error: bad bytes".to_string(),
            source: Box::new(cause),
        };
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("bad bytes"));
    }

    #[test]
    fn io_without_source() {
        let err = ConfigError::Io {
            origin: "GET https://example.com/".to_string(),
            message: "Timeout was reached".to_string(),
            source: None,
        };
        assert!(err.source().is_none());
        assert!(err.to_string().starts_with("GET https://example.com/"));
    }
}
