//! One-call passphrase generation from a catalog list.

use keysmith_core::{generate_passphrase, GenerationResult, PassphraseOptions};

use crate::catalog::{self, Language};
use crate::error::DictionaryError;
use crate::loader::DictionaryLoader;
use crate::source::DictionarySource;

/// Load the catalog list `key` for `language` through `loader` and
/// generate a passphrase from it.
///
/// # Errors
///
/// - [`DictionaryError::UnknownDictionary`] if the catalog has no such list
/// - any error from [`DictionaryLoader::load`]
/// - [`DictionaryError::Generator`] if `options` are invalid or randomness
///   fails
pub async fn generate_passphrase_with_dictionary<S: DictionarySource>(
    loader: &DictionaryLoader<S>,
    language: Language,
    key: &str,
    options: &PassphraseOptions,
) -> Result<GenerationResult, DictionaryError> {
    let info = catalog::find(language, key).ok_or_else(|| DictionaryError::UnknownDictionary {
        language: language.code().to_owned(),
        key: key.to_owned(),
    })?;

    let dictionary = loader.load(info.source_id).await?;
    let config = options.clone().bind(dictionary);
    Ok(generate_passphrase(&config)?)
}
