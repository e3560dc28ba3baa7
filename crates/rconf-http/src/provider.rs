//! The HTTP provider: fetch, parse, classify, dispatch.

use rconf_sdk::{
    classify, parse_document, ConfigError, ConfigFragment, Document, EntryKind, FileCfgObject,
    KeyValueCfgObject, ParseError, Provider,
};
use url::Url;

use crate::config::HttpSettings;
use crate::fetch;
use crate::request::FetchRequest;
use crate::version::provider_version;

/// Name reported to the host.
pub const PROVIDER_NAME: &str = "HTTP";

/// Host configuration section read by this provider.
pub const CONFIG_KEY: &str = "http";

/// Loads configuration from a remote document over HTTP(S).
///
/// Stateless: every [`Provider::load_data`] call reads its settings from the
/// fragment it is given and performs exactly one request.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpProvider;

impl HttpProvider {
    pub fn new() -> Self {
        Self
    }

    /// Fetch and parse the remote document without dispatching it.
    pub fn retrieve(&self, config: &ConfigFragment) -> Result<Document, ConfigError> {
        let request = FetchRequest::from_fragment(config)?;
        let settings = HttpSettings::from_fragment(config)?;

        let response = fetch::get(&request, &settings)?;
        tracing::debug!(
            url = %request.url(),
            status = response.status,
            bytes = response.body.len(),
            "remote configuration fetched"
        );

        let origin = request.url().as_str();
        String::from_utf8(response.body)
            .map_err(|e| ParseError::with_cause(origin, "response body is not valid UTF-8", e))
            .and_then(|text| parse_document(&text, origin))
            .map_err(|e| remap_parse_error(request.url(), e))
    }
}

impl Provider for HttpProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn version(&self) -> String {
        provider_version().to_string()
    }

    fn config_key(&self) -> &str {
        CONFIG_KEY
    }

    fn load_data(
        &self,
        config: &ConfigFragment,
        kv: &mut dyn FnMut(KeyValueCfgObject),
        file: &mut dyn FnMut(FileCfgObject),
    ) -> Result<(), ConfigError> {
        let document = self.retrieve(config)?;

        let (mut key_values, mut files) = (0usize, 0usize);
        for entry in document.into_entries() {
            match classify(&entry.raw_value) {
                EntryKind::File => {
                    files += 1;
                    file(FileCfgObject::new(entry.key, entry.raw_value));
                }
                EntryKind::KeyValue => {
                    key_values += 1;
                    kv(KeyValueCfgObject::new(entry.key, entry.raw_value));
                }
            }
        }
        tracing::debug!(key_values, files, "remote configuration dispatched");
        Ok(())
    }
}

/// A failure with an underlying cause becomes `BadPath`, anything else
/// `ValidationFailed`.
pub(crate) fn remap_parse_error(url: &Url, err: ParseError) -> ConfigError {
    let (origin, message, cause) = err.into_parts();
    match cause {
        Some(cause) => ConfigError::BadPath {
            path: url.to_string(),
            message: format!("{}: {}", cause.type_name, cause.error),
            source: cause.error,
        },
        None => ConfigError::ValidationFailed {
            path: url.to_string(),
            origin,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com/app.toml").unwrap()
    }

    #[test]
    fn identity() {
        let p = HttpProvider::new();
        assert_eq!(p.name(), "HTTP");
        assert_eq!(p.config_key(), "http");
        assert_eq!(p.version(), "0.1.0");
    }

    #[test]
    fn parse_error_without_cause_is_validation_failed() {
        let err = parse_document("Not Found", url().as_str()).unwrap_err();
        match remap_parse_error(&url(), err) {
            ConfigError::ValidationFailed { path, origin, .. } => {
                assert_eq!(path, "https://example.com/app.toml");
                assert!(origin.starts_with("https://example.com/app.toml"));
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }

    #[test]
    fn parse_error_with_cause_is_bad_path() {
        let utf8 = String::from_utf8(vec![0xc3, 0x28]).unwrap_err();
        let err = ParseError::with_cause(url().as_str(), "not UTF-8", utf8);
        match remap_parse_error(&url(), err) {
            ConfigError::BadPath { path, message, .. } => {
                assert_eq!(path, "https://example.com/app.toml");
                assert!(message.contains("FromUtf8Error"), "{message}");
            }
            other => panic!("expected BadPath, got {other:?}"),
        }
    }

    #[test]
    fn malformed_url_fails_before_fetch() {
        let cfg = ConfigFragment::parse("url = \"ht!tp://bad\"\n").unwrap();
        assert!(matches!(
            HttpProvider::new().fetch(&cfg),
            Err(ConfigError::BadValue { path, .. }) if path == "url"
        ));
    }
}
