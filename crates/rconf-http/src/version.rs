//! Provider version, read once from the embedded metadata resource.

use std::sync::OnceLock;

/// Metadata bundled with the provider (`name=value` lines).
const METADATA: &str = include_str!("../resources/rconf-http.properties");

/// Property holding the provider version.
pub const VERSION_PROPERTY: &str = "rconf.http.version";

/// Reported when the version cannot be read.
pub const UNKNOWN_VERSION: &str = "unknown";

static PROVIDER_VERSION: VersionCell = VersionCell::new();

/// A version string computed at most once, even under concurrent first access.
#[derive(Debug, Default)]
pub struct VersionCell(OnceLock<String>);

impl VersionCell {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Return the cached value, running `resolve` only on the first call.
    /// `None` from `resolve` caches [`UNKNOWN_VERSION`].
    pub fn get_or_resolve<F>(&self, resolve: F) -> &str
    where
        F: FnOnce() -> Option<String>,
    {
        self.0
            .get_or_init(|| resolve().unwrap_or_else(|| UNKNOWN_VERSION.to_string()))
    }
}

/// The provider version from the embedded metadata, memoized for the process.
pub fn provider_version() -> &'static str {
    PROVIDER_VERSION.get_or_resolve(|| property(METADATA, VERSION_PROPERTY))
}

/// Look up `name` in a properties-style document. Blank lines and lines
/// starting with `#` or `!` are ignored; `=` or `:` separates name and value.
pub fn property(source: &str, name: &str) -> Option<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| line.split_once(|c: char| c == '=' || c == ':'))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    #[test]
    fn embedded_metadata_has_version() {
        assert_eq!(property(METADATA, VERSION_PROPERTY).as_deref(), Some("0.1.0"));
    }

    #[test]
    fn property_parsing() {
        let src = "# comment\n! also comment\n\na.b = 1\nc: two\nempty=\n";
        assert_eq!(property(src, "a.b").as_deref(), Some("1"));
        assert_eq!(property(src, "c").as_deref(), Some("two"));
        assert_eq!(property(src, "empty"), None);
        assert_eq!(property(src, "missing"), None);
    }

    #[test]
    fn unreadable_version_is_unknown() {
        let cell = VersionCell::new();
        assert_eq!(cell.get_or_resolve(|| None), UNKNOWN_VERSION);
        assert_eq!(cell.get_or_resolve(|| Some("9.9".to_string())), UNKNOWN_VERSION);
    }

    #[test]
    fn concurrent_first_access_resolves_once() {
        let cell = VersionCell::new();
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(8);
        let seen: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        cell.get_or_resolve(|| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Some("1.2.3".to_string())
                        })
                        .to_string()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(seen.iter().all(|v| v == "1.2.3"));
    }

    #[test]
    fn provider_version_matches_metadata() {
        assert_eq!(provider_version(), "0.1.0");
        assert!(std::ptr::eq(provider_version(), provider_version()));
    }
}
