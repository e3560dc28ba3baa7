//! Host-side SDK shared by rconf providers.
//!
//! A provider fetches configuration from one kind of external source and hands
//! every entry back to the host as either a [`KeyValueCfgObject`] or a
//! [`FileCfgObject`]. This crate owns those objects, the [`Provider`]
//! capability, the configuration fragment reader, the document parser and the
//! error taxonomy every provider reports through.

pub mod cfg_object;
pub mod document;
pub mod error;
pub mod fragment;
pub mod logging;
pub mod provider;
pub mod registry;

pub use cfg_object::{
    classify, is_file_reference, EntryKind, FileCfgObject, FileTarget, KeyValueCfgObject,
};
pub use document::{parse_document, ConfigEntry, Document, ParseError};
pub use error::{BoxError, ConfigError};
pub use fragment::ConfigFragment;
pub use provider::{LoadedObjects, Provider};
pub use registry::{LoadSummary, ProviderRegistry};
