//! Persisted generator preferences, stored as plain JSON.
//!
//! Nothing here is secret: only the last-used options, never a generated
//! value.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use keysmith_core::{AttackScenario, CostTier, GenerationMethod, PassphraseOptions, PasswordConfig};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::catalog::Language;

/// Last-used generator settings.
///
/// Persisted to `{dir}/generator.json`. Every field defaults, so partial
/// or older files still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorPreferences {
    /// Which generator the user last picked.
    #[serde(default)]
    pub method: GenerationMethod,

    /// Password options.
    #[serde(default)]
    pub password: PasswordConfig,

    /// Passphrase options.
    #[serde(default)]
    pub passphrase: PassphraseOptions,

    /// Dictionary language.
    #[serde(default)]
    pub language: Language,

    /// Catalog key of the selected dictionary.
    #[serde(default = "default_dictionary")]
    pub dictionary: String,

    /// Attacker model for time-to-crack.
    #[serde(default)]
    pub attack: AttackScenario,

    /// Price model for cost-to-crack.
    #[serde(default)]
    pub cost_tier: CostTier,
}

impl Default for GeneratorPreferences {
    fn default() -> Self {
        Self {
            method: GenerationMethod::default(),
            password: PasswordConfig::default(),
            passphrase: PassphraseOptions::default(),
            language: Language::default(),
            dictionary: default_dictionary(),
            attack: AttackScenario::default(),
            cost_tier: CostTier::default(),
        }
    }
}

fn default_dictionary() -> String {
    Language::default().default_dictionary().into()
}

// ── File I/O ───────────────────────────────────────────────────────

const PREFERENCES_FILE: &str = "generator.json";

impl GeneratorPreferences {
    /// Load preferences from `{dir}/generator.json`.
    ///
    /// Returns [`Default::default()`] when the file is missing or holds
    /// invalid JSON.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(PREFERENCES_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "unreadable generator preferences, using defaults"
                );
                return Self::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "corrupt generator preferences, using defaults"
            );
            Self::default()
        })
    }

    /// Persist preferences to `{dir}/generator.json`.
    ///
    /// The JSON is streamed into an anonymous owner-only temp file in
    /// `dir`, flushed to disk, then persisted over the target, so readers
    /// only ever see a complete file. Concurrent saves never share a temp
    /// name.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if `dir` does not exist, serialization fails,
    /// or the file system rejects the write or the final rename.
    pub fn save(&self, dir: &Path) -> io::Result<()> {
        let mut staged = NamedTempFile::new_in(dir)?;

        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, self).map_err(io::Error::from)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        staged.as_file().sync_all()?;

        let path = dir.join(PREFERENCES_FILE);
        staged.persist(&path).map_err(|e| e.error)?;
        tracing::debug!(path = %path.display(), "generator preferences saved");

        Ok(())
    }
}
