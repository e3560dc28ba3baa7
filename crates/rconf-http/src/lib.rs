//! rconf provider that loads configuration from a remote HTTP(S) document.
//!
//! The provider reads `url` and optional `basic-auth.username` /
//! `basic-auth.password` from its `http` configuration section, performs one
//! blocking GET with libcurl, parses the body with the host document parser
//! and dispatches every entry as a key-value or file object.

pub mod config;
pub mod fetch;
pub mod provider;
pub mod request;
pub mod version;

pub use config::HttpSettings;
pub use provider::{HttpProvider, CONFIG_KEY, PROVIDER_NAME};
pub use request::{BasicAuth, FetchRequest};
pub use version::provider_version;
