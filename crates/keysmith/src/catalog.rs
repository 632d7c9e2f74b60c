//! Built-in dictionary catalog.
//!
//! Each entry names a source identifier (resolved by the host's
//! [`DictionarySource`](crate::DictionarySource)) together with what the
//! file is expected to contain. Sizes are the published list sizes; the
//! loader warns when a file disagrees.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dictionary language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Ukrainian, with Latin transliterations.
    Uk,
}

impl Language {
    /// Every supported language.
    pub const ALL: [Self; 2] = [Self::En, Self::Uk];

    /// ISO 639-1 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Uk => "uk",
        }
    }

    /// Catalog key of the list selected when switching to this language.
    #[must_use]
    pub const fn default_dictionary(self) -> &'static str {
        match self {
            Self::En => "eff-large",
            Self::Uk => "wordlist",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "uk" => Ok(Self::Uk),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// One built-in list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryInfo {
    /// Language of the words.
    pub language: Language,
    /// Catalog key, unique within the language.
    pub key: &'static str,
    /// Identifier handed to the dictionary source.
    pub source_id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Published number of words.
    pub size: usize,
    /// Dice per word for Diceware lists.
    pub dice: Option<u8>,
    /// Entries carry a Latin transliteration.
    pub has_transliteration: bool,
}

impl DictionaryInfo {
    /// Whether entries are indexed by dice rolls.
    #[must_use]
    pub const fn is_diceware(&self) -> bool {
        self.dice.is_some()
    }
}

const fn en(
    key: &'static str,
    source_id: &'static str,
    name: &'static str,
    description: &'static str,
    size: usize,
    dice: u8,
) -> DictionaryInfo {
    DictionaryInfo {
        language: Language::En,
        key,
        source_id,
        name,
        description,
        size,
        dice: Some(dice),
        has_transliteration: false,
    }
}

const fn uk(
    key: &'static str,
    source_id: &'static str,
    name: &'static str,
    description: &'static str,
    size: usize,
    dice: Option<u8>,
) -> DictionaryInfo {
    DictionaryInfo {
        language: Language::Uk,
        key,
        source_id,
        name,
        description,
        size,
        dice,
        has_transliteration: true,
    }
}

/// All built-in lists, grouped by language in display order.
pub static CATALOG: &[DictionaryInfo] = &[
    en(
        "eff-large",
        "/dictionaries/en/eff_large_diceware.txt",
        "EFF Large",
        "EFF Long List (7,776 words)",
        7776,
        5,
    ),
    en(
        "eff-short",
        "/dictionaries/en/eff_short_diceware.txt",
        "EFF Short",
        "EFF Short List (1,296 words)",
        1296,
        4,
    ),
    en(
        "eff-short-2",
        "/dictionaries/en/eff_short_diceware_2.txt",
        "EFF Short 2",
        "EFF Short List 2 (1,296 words)",
        1296,
        4,
    ),
    en(
        "original",
        "/dictionaries/en/original_diceware.txt",
        "Original Diceware",
        "Original Diceware (7,776 words)",
        7776,
        5,
    ),
    en(
        "beale",
        "/dictionaries/en/beale_diceware.txt",
        "Beale",
        "Beale List (7,776 words)",
        7776,
        5,
    ),
    uk(
        "wordlist",
        "/dictionaries/uk/wordlist.txt",
        "Wordlist",
        "Wordlist (10,000 words)",
        10_000,
        None,
    ),
    uk(
        "small",
        "/dictionaries/uk/small_diceware.txt",
        "Small",
        "Small (1,296 words)",
        1296,
        Some(4),
    ),
    uk(
        "normal",
        "/dictionaries/uk/normal_diceware.txt",
        "Normal",
        "Normal (7,776 words)",
        7776,
        Some(5),
    ),
    uk(
        "large",
        "/dictionaries/uk/large_diceware.txt",
        "Large",
        "Large (46,656 words)",
        46_656,
        Some(6),
    ),
];

/// Look up a list by language and key.
#[must_use]
pub fn find(language: Language, key: &str) -> Option<&'static DictionaryInfo> {
    CATALOG
        .iter()
        .find(|info| info.language == language && info.key == key)
}

/// Lists available for `language`, in display order.
pub fn for_language(language: Language) -> impl Iterator<Item = &'static DictionaryInfo> {
    CATALOG.iter().filter(move |info| info.language == language)
}
