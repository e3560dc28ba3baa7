use rconf_sdk::{ConfigError, ConfigFragment};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transfer settings, read from the same `http` section as the URL.
///
/// ```toml
/// [http]
/// url = "https://config.example.com/app.toml"
/// connect-timeout-secs = 10
/// timeout-secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HttpSettings {
    /// Maximum time for the connect phase.
    pub connect_timeout_secs: u64,
    /// Maximum time for the whole transfer (None = no limit).
    pub timeout_secs: Option<u64>,
    /// Follow `Location` redirects.
    pub follow_redirects: bool,
    /// Redirect limit when following redirects.
    pub max_redirections: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: None,
            follow_redirects: true,
            max_redirections: 10,
        }
    }
}

impl HttpSettings {
    /// Read settings from a provider fragment; unrelated keys are ignored and
    /// absent keys take their defaults.
    pub fn from_fragment(config: &ConfigFragment) -> Result<Self, ConfigError> {
        toml::Value::Table(config.table().clone())
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::BadValue {
                path: crate::provider::CONFIG_KEY.to_string(),
                message: e.message().to_string(),
            })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
