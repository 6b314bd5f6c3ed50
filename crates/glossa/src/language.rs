//! Language definitions known to one engine.
//!
//! The registry is owned by the engine rather than stored globally, so two
//! engines can carry different language sets and tests need no reset step.

use serde::{Deserialize, Serialize};

use crate::error::{I18nError, Result};

/// A supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDefinition {
    /// Stable identifier (often equal to `code`).
    pub id: String,
    /// Code used in string tables, e.g. `"en-US"`.
    pub code: String,
    /// Display name, e.g. `"English (US)"`.
    pub name: String,
    /// Whether this is the engine's default language.
    #[serde(default)]
    pub is_default: bool,
}

impl LanguageDefinition {
    /// A definition whose id equals its code.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            id: code.clone(),
            code,
            name: name.into(),
            is_default: false,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn default_language(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Ordered set of language definitions, unique by id and by code.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: Vec<LanguageDefinition>,
}

impl LanguageRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a language.
    ///
    /// Fails with [`I18nError::DuplicateLanguage`] when the id or code is
    /// taken, and with [`I18nError::InvalidConfig`] for an empty code or a
    /// second default.
    pub fn register(&mut self, language: LanguageDefinition) -> Result<()> {
        if language.code.trim().is_empty() || language.id.trim().is_empty() {
            return Err(I18nError::invalid_config(
                "language id and code must not be empty",
            ));
        }
        if self
            .languages
            .iter()
            .any(|l| l.code == language.code || l.id == language.id)
        {
            return Err(I18nError::DuplicateLanguage {
                code: language.code,
            });
        }
        if language.is_default {
            if let Some(existing) = self.languages.iter().find(|l| l.is_default) {
                return Err(I18nError::invalid_config(format!(
                    "'{}' cannot be default: '{}' already is",
                    language.code, existing.code
                )));
            }
        }
        tracing::debug!(
            target: "glossa.languages",
            code = %language.code,
            default = language.is_default,
            "language registered"
        );
        self.languages.push(language);
        Ok(())
    }

    #[must_use]
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageDefinition> {
        self.languages.iter().find(|l| l.code == code)
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&LanguageDefinition> {
        self.languages.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// The language flagged default, else the first registered.
    #[must_use]
    pub fn default_language(&self) -> Option<&LanguageDefinition> {
        self.languages
            .iter()
            .find(|l| l.is_default)
            .or_else(|| self.languages.first())
    }

    /// Language codes in registration order.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        self.languages.iter().map(|l| l.code.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageDefinition> {
        self.languages.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
