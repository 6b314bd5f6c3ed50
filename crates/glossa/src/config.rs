//! Engine configuration as data.
//!
//! Captures the languages an engine supports and its initial context as a
//! single [`EngineConfig`] that can be loaded from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! default_language = "en"
//! admin_language = "en"
//! currency = "EUR"
//!
//! [[languages]]
//! id = "en"
//! code = "en"
//! name = "English"
//! is_default = true
//!
//! [[languages]]
//! id = "fr"
//! code = "fr"
//! name = "Français"
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::from_toml_str(text)?;
//! let engine = TranslationEngine::new(config)?;
//! ```
//!
//! # Defaults
//!
//! An empty document yields no languages, no default language, user context
//! and strict dangerous-key rejection. Such an engine accepts any language
//! code but every translation needs an explicit language.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::ContextKind;
use crate::language::LanguageDefinition;

/// Initial state for a [`crate::TranslationEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Supported languages, registered in order.
    pub languages: Vec<LanguageDefinition>,
    /// Initial user language. Falls back to the language flagged
    /// `is_default`, then the first listed.
    pub default_language: Option<String>,
    /// Initial admin language.
    pub admin_language: Option<String>,
    /// Initially active context.
    pub context: ContextKind,
    /// ISO 4217 code exposed to templates as `{currency}`.
    pub currency: Option<String>,
    /// IANA zone name exposed to templates as `{timezone}`.
    pub timezone: Option<String>,
    /// Reject caller variables containing reserved keys. When `false` such
    /// keys are dropped (and logged) instead.
    pub strict_dangerous_keys: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            default_language: None,
            admin_language: None,
            context: ContextKind::User,
            currency: None,
            timezone: None,
            strict_dangerous_keys: true,
        }
    }
}

impl EngineConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Builder: append a language.
    #[must_use]
    pub fn language(mut self, language: LanguageDefinition) -> Self {
        self.languages.push(language);
        self
    }

    #[must_use]
    pub fn default_language(mut self, code: impl Into<String>) -> Self {
        self.default_language = Some(code.into());
        self
    }

    #[must_use]
    pub fn admin_language(mut self, code: impl Into<String>) -> Self {
        self.admin_language = Some(code.into());
        self
    }

    /// Validate the configuration.
    ///
    /// Returns every problem found. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut codes = HashSet::new();
        let mut ids = HashSet::new();
        for language in &self.languages {
            if language.code.trim().is_empty() || language.id.trim().is_empty() {
                errors.push(format!(
                    "languages: id and code must not be empty (name '{}')",
                    language.name
                ));
            }
            if !codes.insert(language.code.as_str()) {
                errors.push(format!("languages: duplicate code '{}'", language.code));
            }
            if !ids.insert(language.id.as_str()) {
                errors.push(format!("languages: duplicate id '{}'", language.id));
            }
        }

        let flagged: Vec<&str> = self
            .languages
            .iter()
            .filter(|l| l.is_default)
            .map(|l| l.code.as_str())
            .collect();
        if flagged.len() > 1 {
            errors.push(format!(
                "languages: more than one default ({})",
                flagged.join(", ")
            ));
        }

        if !self.languages.is_empty() {
            for (field, value) in [
                ("default_language", &self.default_language),
                ("admin_language", &self.admin_language),
            ] {
                if let Some(code) = value {
                    if !codes.contains(code.as_str()) {
                        errors.push(format!("{field}: '{code}' is not a configured language"));
                    }
                }
            }
        }

        if let (Some(explicit), [flag]) = (&self.default_language, flagged.as_slice()) {
            if explicit.as_str() != *flag {
                errors.push(format!(
                    "default_language '{explicit}' disagrees with '{flag}' flagged is_default"
                ));
            }
        }

        if let Some(currency) = &self.currency {
            let iso = currency.len() == 3 && currency.bytes().all(|b| b.is_ascii_uppercase());
            if !iso {
                errors.push(format!(
                    "currency must be a three-letter ISO 4217 code, got '{currency}'"
                ));
            }
        }

        if self.timezone.as_deref().is_some_and(|tz| tz.trim().is_empty()) {
            errors.push("timezone must not be blank".into());
        }

        errors
    }

    /// The initial user language: explicit, else flagged, else first listed.
    #[must_use]
    pub fn effective_default_language(&self) -> Option<&str> {
        self.default_language.as_deref().or_else(|| {
            self.languages
                .iter()
                .find(|l| l.is_default)
                .or_else(|| self.languages.first())
                .map(|l| l.code.as_str())
        })
    }
}

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
