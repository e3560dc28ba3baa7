//! Objects a provider hands back to the host, and the predicate that decides
//! which kind an entry becomes.
//!
//! A file reference is a string value of the form `<FILE>path;base64-content`.
//! The host writes the decoded content to `path` instead of merging the value
//! into its configuration.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::ConfigError;

/// Marker that starts every file reference.
pub const FILE_MARKER: &str = "<FILE>";

/// Output channel an entry is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    KeyValue,
    File,
}

/// True when the rendered value (quoted or not) is a file reference.
pub fn is_file_reference(value: &str) -> bool {
    unquote(value).starts_with(FILE_MARKER)
}

/// Classify a rendered value.
pub fn classify(value: &str) -> EntryKind {
    if is_file_reference(value) {
        EntryKind::File
    } else {
        EntryKind::KeyValue
    }
}

/// Strip one pair of surrounding `"` or `'` quotes.
fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// A plain setting to merge into the host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueCfgObject {
    key: String,
    value: String,
}

impl KeyValueCfgObject {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Append `key = value` as a line the host can reparse as TOML.
    pub fn apply(&self, buf: &mut String) {
        let _ = writeln!(buf, "{} = {}", self.key, self.value);
    }
}

/// An entry whose content must be materialized as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCfgObject {
    key: String,
    value: String,
}

/// Decoded destination and content of a [`FileCfgObject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl FileCfgObject {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Decode `<FILE>path;base64-content`.
    pub fn target(&self) -> Result<FileTarget, ConfigError> {
        let reference = unquote(&self.value)
            .strip_prefix(FILE_MARKER)
            .ok_or_else(|| self.error("value is not a file reference"))?;
        let (path, encoded) = reference
            .split_once(';')
            .ok_or_else(|| self.error("expected <FILE>path;base64-content"))?;
        let path = path.trim();
        if path.is_empty() {
            return Err(self.error("file path is empty"));
        }
        let content = STANDARD
            .decode(encoded.trim())
            .map_err(|e| self.error(format!("invalid base64 content: {}", e)))?;
        Ok(FileTarget {
            path: PathBuf::from(path),
            content,
        })
    }

    /// Write the decoded content to its path, creating parent directories.
    /// Returns the written path.
    pub fn apply(&self) -> Result<PathBuf, ConfigError> {
        let target = self.target()?;
        if let Some(parent) = target.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))?;
        }
        fs::write(&target.path, &target.content).map_err(|e| self.io_error(&target.path, e))?;
        tracing::debug!(key = %self.key, path = %target.path.display(), "file object written");
        Ok(target.path)
    }

    fn error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::FileObject {
            key: self.key.clone(),
            message: message.into(),
        }
    }

    fn io_error(&self, path: &Path, e: std::io::Error) -> ConfigError {
        self.error(format!("{}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_references_quoted_or_bare() {
        assert!(is_file_reference("\"<FILE>./test;SGVsbG8gV29ybGQh\""));
        assert!(is_file_reference("'<FILE>./test;SGVsbG8gV29ybGQh'"));
        assert!(is_file_reference("<FILE>./test;"));
        assert!(!is_file_reference("\"world\""));
        assert!(!is_file_reference("\"x<FILE>\""));
        assert!(!is_file_reference("\""));
    }

    #[test]
    fn classify_routes_to_one_channel() {
        assert_eq!(classify("\"<FILE>a;b\""), EntryKind::File);
        assert_eq!(classify("[1, 2, 3, 4]"), EntryKind::KeyValue);
    }

    #[test]
    fn key_value_apply_appends_line() {
        let mut buf = String::new();
        KeyValueCfgObject::new("application.five", "5").apply(&mut buf);
        KeyValueCfgObject::new("application.hello", "\"world\"").apply(&mut buf);
        assert_eq!(buf, "application.five = 5\napplication.hello = \"world\"\n");
    }

    #[test]
    fn file_target_decodes_path_and_content() {
        let obj = FileCfgObject::new("application.file", "\"<FILE>./conf/test;SGVsbG8gV29ybGQh\"");
        let target = obj.target().unwrap();
        assert_eq!(target.path, PathBuf::from("./conf/test"));
        assert_eq!(target.content, b"Hello World!");
    }

    #[test]
    fn malformed_file_reference_is_rejected() {
        let missing_sep = FileCfgObject::new("k", "\"<FILE>./test\"");
        assert!(matches!(missing_sep.target(), Err(ConfigError::FileObject { .. })));
        let bad_b64 = FileCfgObject::new("k", "\"<FILE>./test;***\"");
        assert!(matches!(bad_b64.target(), Err(ConfigError::FileObject { .. })));
        let no_path = FileCfgObject::new("k", "\"<FILE>;SGk=\"");
        assert!(matches!(no_path.target(), Err(ConfigError::FileObject { .. })));
    }

    #[test]
    fn apply_writes_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("test");
        let obj = FileCfgObject::new(
            "application.file",
            format!("\"<FILE>{};SGVsbG8gV29ybGQh\"", path.display()),
        );
        let written = obj.apply().unwrap();
        assert_eq!(written, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Hello World!");
    }
}
