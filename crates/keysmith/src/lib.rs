//! `keysmith` — Dictionary loading and generator settings for keysmith.
//!
//! Fetches word lists through a pluggable [`DictionarySource`], parses and
//! caches them in a [`DictionaryLoader`], exposes the built-in
//! [`catalog`], and persists [`GeneratorPreferences`]. Generation itself
//! lives in `keysmith-core`, re-exported here.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod catalog;
pub mod error;
pub mod generate;
pub mod loader;
pub mod preferences;
pub mod source;

pub use keysmith_core;

pub use catalog::{DictionaryInfo, Language, CATALOG};
pub use error::{DictionaryError, FetchError};
pub use generate::generate_passphrase_with_dictionary;
pub use loader::DictionaryLoader;
pub use preferences::GeneratorPreferences;
pub use source::{DictionarySource, FileSystemSource, MemorySource};
