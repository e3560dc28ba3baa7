//! The GET request built from the provider's configuration fragment.

use std::fmt;

use rconf_sdk::{ConfigError, ConfigFragment};
use url::Url;

const URL_KEY: &str = "url";
const USERNAME_KEY: &str = "basic-auth.username";
const PASSWORD_KEY: &str = "basic-auth.password";

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Credentials are used only when both keys are present; a lone username
    /// or password is treated as no credentials at all.
    pub fn from_fragment(config: &ConfigFragment) -> Result<Option<Self>, ConfigError> {
        match (config.has_path(USERNAME_KEY), config.has_path(PASSWORD_KEY)) {
            (true, true) => Ok(Some(Self::new(
                config.get_string(USERNAME_KEY)?,
                config.get_string(PASSWORD_KEY)?,
            ))),
            (false, false) => Ok(None),
            _ => {
                tracing::debug!("incomplete basic-auth section; request sent without credentials");
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to perform the GET. Immutable for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    url: Url,
    basic_auth: Option<BasicAuth>,
}

impl FetchRequest {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            basic_auth: None,
        }
    }

    pub fn with_basic_auth(mut self, auth: BasicAuth) -> Self {
        self.basic_auth = Some(auth);
        self
    }

    /// Build from `url` and the optional `basic-auth` pair. The URL is
    /// validated here, before anything touches the network.
    pub fn from_fragment(config: &ConfigFragment) -> Result<Self, ConfigError> {
        let url = parse_url(&config.get_string(URL_KEY)?)?;
        Ok(Self {
            url,
            basic_auth: BasicAuth::from_fragment(config)?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn basic_auth(&self) -> Option<&BasicAuth> {
        self.basic_auth.as_ref()
    }

    /// Origin descriptor used in transport errors.
    pub fn origin(&self) -> String {
        format!("GET {}", self.url)
    }
}

/// Parse an absolute `http`/`https` URL.
pub fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    let bad_value = |message: String| ConfigError::BadValue {
        path: URL_KEY.to_string(),
        message,
    };
    let url = Url::parse(raw.trim()).map_err(|e| bad_value(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(bad_value(format!("unsupported protocol: {}", other))),
    }
}
