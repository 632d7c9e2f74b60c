//! Where dictionary text comes from.
//!
//! The loader only sees the [`DictionarySource`] trait; hosts plug in the
//! filesystem, an embedded table, or anything else that can hand back text
//! for an identifier such as `/dictionaries/en/eff_large_diceware.txt`.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::FetchError;

/// Asynchronous provider of raw dictionary text.
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Fetch the full text stored under `source_id`.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`]; the loader wraps it with the identifier.
    async fn fetch(&self, source_id: &str) -> Result<String, FetchError>;
}

// ── Filesystem ─────────────────────────────────────────────────────

/// Reads dictionaries from files below a root directory.
///
/// A single leading `/` on the identifier is treated as the root, so
/// `/dictionaries/en/beale_diceware.txt` maps to
/// `{root}/dictionaries/en/beale_diceware.txt`.
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    root: PathBuf,
}

impl FileSystemSource {
    /// Serve identifiers relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory identifiers resolve against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an identifier to a path inside the root.
    ///
    /// # Errors
    ///
    /// [`FetchError::InvalidIdentifier`] for empty identifiers and any that
    /// contain `..`, a second root, or a drive prefix.
    pub fn resolve(&self, source_id: &str) -> Result<PathBuf, FetchError> {
        let relative = source_id.strip_prefix('/').unwrap_or(source_id);
        let relative = Path::new(relative);

        let mut has_name = false;
        for component in relative.components() {
            match component {
                Component::Normal(_) => has_name = true,
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(FetchError::InvalidIdentifier(source_id.to_owned()));
                }
            }
        }
        if !has_name {
            return Err(FetchError::InvalidIdentifier(source_id.to_owned()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl DictionarySource for FileSystemSource {
    async fn fetch(&self, source_id: &str) -> Result<String, FetchError> {
        let path = self.resolve(source_id)?;
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                FetchError::NotFound(source_id.to_owned())
            } else {
                FetchError::Io(e)
            }
        })
    }
}

// ── In-memory ──────────────────────────────────────────────────────

/// Identifier → text table, for embedded lists and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    texts: HashMap<String, String>,
}

impl MemorySource {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, source_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(source_id, text);
        self
    }

    /// Store `text` under `source_id`, replacing any previous text.
    pub fn insert(&mut self, source_id: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(source_id.into(), text.into());
    }

    /// Number of stored identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[async_trait]
impl DictionarySource for MemorySource {
    async fn fetch(&self, source_id: &str) -> Result<String, FetchError> {
        self.texts
            .get(source_id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(source_id.to_owned()))
    }
}

#[async_trait]
impl<S: DictionarySource + ?Sized> DictionarySource for std::sync::Arc<S> {
    async fn fetch(&self, source_id: &str) -> Result<String, FetchError> {
        (**self).fetch(source_id).await
    }
}
