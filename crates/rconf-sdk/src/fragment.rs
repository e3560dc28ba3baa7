//! Typed lookups over a provider's configuration fragment.
//!
//! The host hands each provider the table found under the provider's config
//! key. Lookups take dot-separated paths and report a missing key differently
//! from a key holding the wrong type.

use toml::{Table, Value};

use crate::error::ConfigError;

/// A configuration subtree backed by a TOML table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFragment {
    table: Table,
}

impl ConfigFragment {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Parse TOML text into a fragment.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let table: Table = toml::from_str(text).map_err(|e| ConfigError::ValidationFailed {
            path: String::new(),
            origin: "string".to_string(),
            message: e.message().to_string(),
        })?;
        Ok(Self::new(table))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Resolve a dot-separated path; `None` when any segment is absent or an
    /// intermediate value is not a table.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.table.get(segments.next()?)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }

    pub fn has_path(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    pub fn get_string(&self, path: &str) -> Result<String, ConfigError> {
        match self.require(path)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(wrong_type(path, "string", other)),
        }
    }

    pub fn get_bool(&self, path: &str) -> Result<bool, ConfigError> {
        match self.require(path)? {
            Value::Boolean(b) => Ok(*b),
            other => Err(wrong_type(path, "boolean", other)),
        }
    }

    /// The table at `path` as a fragment of its own.
    pub fn get_fragment(&self, path: &str) -> Result<ConfigFragment, ConfigError> {
        match self.require(path)? {
            Value::Table(t) => Ok(ConfigFragment::new(t.clone())),
            other => Err(wrong_type(path, "table", other)),
        }
    }

    fn require(&self, path: &str) -> Result<&Value, ConfigError> {
        self.lookup(path).ok_or_else(|| ConfigError::Missing {
            path: path.to_string(),
        })
    }
}

impl From<Table> for ConfigFragment {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}

fn wrong_type(path: &str, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::WrongType {
        path: path.to_string(),
        expected,
        found: found.type_str(),
    }
}
