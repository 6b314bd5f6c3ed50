//! Per-component string tables: language → key → [`StringValue`].
//!
//! # Invariants
//!
//! 1. **Language order is preserved**: [`LanguageTables`] keeps languages in
//!    insertion (or document) order. The first language is the one the
//!    string-key scan indexes.
//! 2. **Merges never drop keys**: [`LanguageTables::merge`] adds or replaces
//!    entries; it never removes a language or key.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unknown plural category | `{"several": ..}` in a plural map | Deserialization error |
//! | Duplicate language in config | Same code twice | Later table merged into earlier |
//! | Missing key in one language | Incomplete translation | Reported by [`LanguageTables::coverage_report`] |

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::plural::PluralForms;

/// A single table entry: a plain template or plural forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringValue {
    /// A plain template with `{variable}` placeholders.
    Text(String),
    /// Templates keyed by plural category.
    Plural(PluralForms),
}

impl StringValue {
    #[must_use]
    pub fn is_plural(&self) -> bool {
        matches!(self, Self::Plural(_))
    }
}

impl From<&str> for StringValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for StringValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<PluralForms> for StringValue {
    fn from(forms: PluralForms) -> Self {
        Self::Plural(forms)
    }
}

/// Strings for a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleStrings {
    strings: HashMap<String, StringValue>,
}

impl LocaleStrings {
    /// Create an empty language table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a plain template.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StringValue>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    /// Insert a plain template.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings
            .insert(key.into(), StringValue::Text(value.into()));
    }

    /// Insert plural forms.
    pub fn insert_plural(&mut self, key: impl Into<String>, forms: PluralForms) {
        self.strings.insert(key.into(), StringValue::Plural(forms));
    }

    /// Look up an entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StringValue> {
        self.strings.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the language has no strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over all keys in this language.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }

    /// Add or replace every entry from `other`.
    pub fn merge(&mut self, other: LocaleStrings) {
        self.strings.extend(other.strings);
    }
}

impl<K: Into<String>, V: Into<StringValue>> FromIterator<(K, V)> for LocaleStrings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            strings: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Ordered language → table mapping for one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTables {
    tables: Vec<(String, LocaleStrings)>,
}

impl LanguageTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a language table, merging into an existing one with the same code.
    pub fn insert(&mut self, language: impl Into<String>, strings: LocaleStrings) {
        let language = language.into();
        match self.tables.iter_mut().find(|(code, _)| *code == language) {
            Some((_, existing)) => existing.merge(strings),
            None => self.tables.push((language, strings)),
        }
    }

    /// Builder-style [`LanguageTables::insert`].
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>, strings: LocaleStrings) -> Self {
        self.insert(language, strings);
        self
    }

    /// Merge every table from `other` into `self`.
    pub fn merge(&mut self, other: LanguageTables) {
        for (language, strings) in other.tables {
            self.insert(language, strings);
        }
    }

    #[must_use]
    pub fn get(&self, language: &str) -> Option<&LocaleStrings> {
        self.tables
            .iter()
            .find(|(code, _)| code == language)
            .map(|(_, strings)| strings)
    }

    /// The first language in insertion order.
    #[must_use]
    pub fn first(&self) -> Option<(&str, &LocaleStrings)> {
        self.tables
            .first()
            .map(|(code, strings)| (code.as_str(), strings))
    }

    /// Language codes in insertion order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(code, _)| code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocaleStrings)> {
        self.tables
            .iter()
            .map(|(code, strings)| (code.as_str(), strings))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    // -----------------------------------------------------------------
    // Extraction & Coverage
    // -----------------------------------------------------------------

    /// Collect all unique keys across every language.
    ///
    /// The result is sorted for deterministic output.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .tables
            .iter()
            .flat_map(|(_, ls)| ls.keys().map(String::from))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Keys from `reference_keys` absent in `language`, sorted.
    ///
    /// There is no fallback between languages: a key is missing unless the
    /// language's own table has it.
    #[must_use]
    pub fn missing_keys(&self, language: &str, reference_keys: &[&str]) -> Vec<String> {
        let table = self.get(language);
        let mut missing: Vec<String> = reference_keys
            .iter()
            .filter(|key| !table.is_some_and(|t| t.contains_key(key)))
            .map(|key| (*key).to_string())
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Generate a coverage report across all languages.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let all = self.all_keys();
        let ref_keys: Vec<&str> = all.iter().map(String::as_str).collect();
        let total = ref_keys.len();

        let locales = self
            .tables
            .iter()
            .map(|(tag, _)| {
                let missing = self.missing_keys(tag, &ref_keys);
                let present = total.saturating_sub(missing.len());
                let coverage_percent = if total == 0 {
                    100.0
                } else {
                    (present as f32 / total as f32) * 100.0
                };
                LocaleCoverage {
                    locale: tag.clone(),
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys: total,
            locales,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, LocaleStrings)> for LanguageTables {
    fn from_iter<I: IntoIterator<Item = (K, LocaleStrings)>>(iter: I) -> Self {
        let mut tables = Self::new();
        for (language, strings) in iter {
            tables.insert(language, strings);
        }
        tables
    }
}

impl Serialize for LanguageTables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (language, strings) in &self.tables {
            map.serialize_entry(language, strings)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LanguageTables {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TablesVisitor;

        impl<'de> Visitor<'de> for TablesVisitor {
            type Value = LanguageTables;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of language code to string table")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut tables = LanguageTables::new();
                while let Some((language, strings)) =
                    access.next_entry::<String, LocaleStrings>()?
                {
                    tables.insert(language, strings);
                }
                Ok(tables)
            }
        }

        deserializer.deserialize_map(TablesVisitor)
    }
}

/// Coverage report for one component's tables.
///
/// Shows how many keys each language covers relative to the full key set
/// and lists the specific missing keys.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Total number of unique keys across all languages.
    pub total_keys: usize,
    /// Per-language coverage data, in table order.
    pub locales: Vec<LocaleCoverage>,
}

/// Per-language coverage statistics.
#[derive(Debug, Clone)]
pub struct LocaleCoverage {
    /// Language code (e.g., `"en"`, `"ru"`).
    pub locale: String,
    /// Number of reference keys present.
    pub present: usize,
    /// Keys from the reference set that are missing.
    pub missing: Vec<String>,
    /// Coverage as a percentage (0.0-100.0).
    pub coverage_percent: f32,
}

/// Registration input for one component.
///
/// # Example
///
/// ```
/// use glossa::catalog::{ComponentConfig, LocaleStrings};
///
/// let config = ComponentConfig::new("app")
///     .alias("application")
///     .language("en-US", LocaleStrings::new().with("greet", "Hello, {name}!"));
/// assert_eq!(config.strings.first().map(|(code, _)| code), Some("en-US"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub strings: LanguageTables,
}

impl ComponentConfig {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            aliases: Vec::new(),
            strings: LanguageTables::new(),
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>, strings: LocaleStrings) -> Self {
        self.strings.insert(language, strings);
        self
    }

    /// Parse a component definition from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Parse a component definition from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
