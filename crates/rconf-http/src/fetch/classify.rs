//! Map libcurl failures onto the provider error taxonomy.

use rconf_sdk::ConfigError;

/// How a transfer failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The target could not be reached at all: malformed URL, unresolvable
    /// host or proxy, refused connection. Reported as a bad `url` value.
    Unreachable,
    /// Anything after the connection exists: timeout, reset, truncated body.
    Transport,
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_url_malformed()
        || e.is_unsupported_protocol()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_couldnt_connect()
    {
        return FailureKind::Unreachable;
    }
    FailureKind::Transport
}

/// Convert a curl error raised while serving the request at `origin`.
pub(super) fn remap(origin: &str, e: curl::Error) -> ConfigError {
    let message = describe(&e);
    match classify_curl_error(&e) {
        FailureKind::Unreachable => ConfigError::BadValue {
            path: "url".to_string(),
            message,
        },
        FailureKind::Transport => ConfigError::Io {
            origin: origin.to_string(),
            message,
            source: Some(Box::new(e)),
        },
    }
}

fn describe(e: &curl::Error) -> String {
    match e.extra_description() {
        Some(extra) => format!("{}: {}", e.description(), extra),
        None => e.description().to_string(),
    }
}
