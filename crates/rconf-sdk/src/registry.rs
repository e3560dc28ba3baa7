//! Host-side registry that runs providers against the host configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::fragment::ConfigFragment;
use crate::provider::Provider;

/// Outcome of [`ProviderRegistry::load_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Names of the providers that ran.
    pub providers: Vec<String>,
    /// Number of key-value objects appended to the buffer.
    pub key_values: usize,
    /// Files written by file objects.
    pub files: Vec<PathBuf>,
}

/// Named providers, run in registration order.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: impl Provider + 'static) -> &mut Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn providers(&self) -> impl Iterator<Item = &dyn Provider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    /// Look up a provider by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&dyn Provider> {
        self.providers()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Run every provider whose config key is present in `host`. Key-value
    /// objects are appended to `buf` as TOML lines; file objects are written
    /// to disk. Stops at the first failing provider.
    pub fn load_all(&self, host: &ConfigFragment, buf: &mut String) -> Result<LoadSummary> {
        let mut summary = LoadSummary::default();
        for provider in self.providers() {
            let key = provider.config_key();
            if !host.has_path(key) {
                tracing::debug!(provider = provider.name(), key, "no configuration section; skipped");
                continue;
            }
            let config = host.get_fragment(key)?;
            let loaded = provider
                .fetch(&config)
                .with_context(|| format!("provider {} failed", provider.name()))?;

            for obj in &loaded.key_values {
                obj.apply(buf);
            }
            for obj in &loaded.files {
                let path = obj
                    .apply()
                    .with_context(|| format!("provider {} file object", provider.name()))?;
                summary.files.push(path);
            }

            tracing::info!(
                provider = provider.name(),
                version = %provider.version(),
                key_values = loaded.key_values.len(),
                files = loaded.files.len(),
                "configuration loaded"
            );
            summary.key_values += loaded.key_values.len();
            summary.providers.push(provider.name().to_string());
        }
        Ok(summary)
    }
}
