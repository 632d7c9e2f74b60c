//! Word list model and the dictionary text format parser.
//!
//! A dictionary file is UTF-8 text. It opens with a header of `#` lines,
//! where lines shaped like `# key: value` set metadata:
//!
//! ```text
//! # name: EFF Large
//! # language: en
//! # dice: 5
//! # size: 7776
//! 11111 abacus
//! 11112 abdomen
//! ```
//!
//! Entry lines are either `INDEX WORD [TRANSLITERATION]`, where `INDEX` is
//! a dice roll made of the digits 1-6, or `WORD [TRANSLITERATION]`, in which
//! case the index is the zero-based position among accepted entries.

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// Header metadata of a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryMetadata {
    /// Display name.
    pub name: String,
    /// Line layout, e.g. `INDEX WORD TRANSLITERATION`.
    pub format: String,
    /// Language code of the words (`en`, `uk`, ...).
    pub language: String,
    /// Language of the transliteration column, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    /// Number of dice per index (4, 5 or 6).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dice: Option<u8>,
    /// Declared size. Advisory only; sampling uses the entry count.
    pub size: usize,
    /// Where the list comes from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// License of the list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl Default for DictionaryMetadata {
    fn default() -> Self {
        Self {
            name: "Unknown".into(),
            format: "INDEX WORD".into(),
            language: "en".into(),
            transliteration: None,
            dice: None,
            size: 0,
            source: None,
            license: None,
        }
    }
}

/// A single word of a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    /// Dice code (`"11111"`) or synthesized position (`"0"`).
    pub index: String,
    /// The word in the dictionary's language.
    pub word: String,
    /// Latin-alphabet rendering of `word`, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
}

impl DictionaryEntry {
    /// The transliteration when requested and present, otherwise the word.
    #[must_use]
    pub fn display_word(&self, use_transliteration: bool) -> &str {
        match (&self.transliteration, use_transliteration) {
            (Some(t), true) => t,
            _ => &self.word,
        }
    }
}

/// A parsed, immutable, non-empty word list.
///
/// Entry order is exactly the order of the source text; sampling indexes
/// into it positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionary {
    metadata: DictionaryMetadata,
    entries: Vec<DictionaryEntry>,
}

impl Dictionary {
    /// Assemble a dictionary from parts.
    ///
    /// A zero `metadata.size` is replaced by the entry count.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::EmptyDictionary`] if `entries` is empty.
    pub fn new(
        mut metadata: DictionaryMetadata,
        entries: Vec<DictionaryEntry>,
    ) -> Result<Self, GeneratorError> {
        if entries.is_empty() {
            return Err(GeneratorError::EmptyDictionary);
        }
        if metadata.size == 0 {
            metadata.size = entries.len();
        }
        Ok(Self { metadata, entries })
    }

    /// Header metadata.
    #[must_use]
    pub const fn metadata(&self) -> &DictionaryMetadata {
        &self.metadata
    }

    /// Entries in source order.
    #[must_use]
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// Number of entries; the bound used for sampling.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a constructed dictionary.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a sampled position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DictionaryEntry> {
        self.entries.get(index)
    }

    /// Whether any entry carries a transliteration.
    #[must_use]
    pub fn has_transliteration(&self) -> bool {
        self.entries.iter().any(|e| e.transliteration.is_some())
    }
}

/// Parse dictionary source text.
///
/// # Errors
///
/// Returns [`GeneratorError::EmptyDictionary`] if no entry line is found.
pub fn parse_dictionary(text: &str) -> Result<Dictionary, GeneratorError> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let metadata = parse_metadata(&lines);

    let mut entries = Vec::new();
    for line in &lines {
        if let Some(entry) = parse_entry(line, entries.len()) {
            entries.push(entry);
        }
    }

    Dictionary::new(metadata, entries)
}

fn parse_metadata(lines: &[&str]) -> DictionaryMetadata {
    let mut metadata = DictionaryMetadata::default();

    for line in lines {
        if !line.starts_with('#') {
            break;
        }
        let Some((key, value)) = header_field(line) else {
            continue;
        };
        match key.to_ascii_lowercase().as_str() {
            "name" => metadata.name = value.to_owned(),
            "format" => metadata.format = value.to_owned(),
            "language" => metadata.language = value.to_owned(),
            "transliteration" => metadata.transliteration = Some(value.to_owned()),
            "dice" => metadata.dice = value.parse().ok(),
            "size" => metadata.size = value.parse().unwrap_or(0),
            "source" => metadata.source = Some(value.to_owned()),
            "license" => metadata.license = Some(value.to_owned()),
            _ => {}
        }
    }

    metadata
}

/// Split `#  key:  value` into `(key, value)`.
///
/// The key is one or more word characters directly followed by `:`; the
/// value is the trimmed remainder and must not be blank.
fn header_field(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('#')?.trim_start();
    let key_len = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if key_len == 0 {
        return None;
    }
    let (key, rest) = rest.split_at(key_len);
    let value = rest.strip_prefix(':')?.trim();
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_entry(line: &str, position: usize) -> Option<DictionaryEntry> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let mut tokens = trimmed.split_whitespace();
    let first = tokens.next()?;
    let second = tokens.next();

    match second {
        Some(word) if is_dice_code(first) => Some(DictionaryEntry {
            index: first.to_owned(),
            word: word.to_owned(),
            transliteration: tokens.next().map(str::to_owned),
        }),
        _ => Some(DictionaryEntry {
            index: position.to_string(),
            word: first.to_owned(),
            transliteration: second.map(str::to_owned),
        }),
    }
}

fn is_dice_code(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| (b'1'..=b'6').contains(&b))
}
