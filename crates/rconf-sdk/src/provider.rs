//! The capability every configuration provider implements.

use crate::cfg_object::{FileCfgObject, KeyValueCfgObject};
use crate::error::ConfigError;
use crate::fragment::ConfigFragment;

/// A pluggable source of configuration, invoked by the host through this
/// trait without knowing the concrete type.
pub trait Provider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Provider version, or `"unknown"` when it cannot be determined.
    fn version(&self) -> String;

    /// Key of the host configuration section this provider reads.
    fn config_key(&self) -> &str;

    /// Load every entry, calling `kv` or `file` once per entry, synchronously
    /// and in document order. On error, entries already dispatched stay
    /// dispatched.
    fn load_data(
        &self,
        config: &ConfigFragment,
        kv: &mut dyn FnMut(KeyValueCfgObject),
        file: &mut dyn FnMut(FileCfgObject),
    ) -> Result<(), ConfigError>;

    /// Collect [`Provider::load_data`] output into two ordered sequences.
    fn fetch(&self, config: &ConfigFragment) -> Result<LoadedObjects, ConfigError> {
        let mut key_values = Vec::new();
        let mut files = Vec::new();
        self.load_data(
            config,
            &mut |o: KeyValueCfgObject| key_values.push(o),
            &mut |o: FileCfgObject| files.push(o),
        )?;
        Ok(LoadedObjects { key_values, files })
    }
}

/// Objects produced by one load, each sequence in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedObjects {
    pub key_values: Vec<KeyValueCfgObject>,
    pub files: Vec<FileCfgObject>,
}

impl LoadedObjects {
    pub fn len(&self) -> usize {
        self.key_values.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
