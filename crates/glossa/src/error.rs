//! Error taxonomy for the translation engine.
//!
//! Every variant carries a machine-readable [`ErrorCode`] (via
//! [`I18nError::code`]) plus a human-readable message (via `Display`).
//! Hard entry points return these unchanged; the safe entry points match on
//! them and substitute a placeholder string instead.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, I18nError>;

/// A single field-level failure from constants schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending constant.
    pub field: String,
    /// What was wrong with it.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Stable, machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DuplicateComponent,
    DuplicateLanguage,
    ComponentNotFound,
    LanguageNotFound,
    TranslationMissing,
    InvalidConfig,
    ConstantConflict,
    ConstantsSchemaValidationFailed,
    StringKeyNotRegistered,
    InvalidStringKeyEnum,
    UnsafeInput,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateComponent => "DUPLICATE_COMPONENT",
            Self::DuplicateLanguage => "DUPLICATE_LANGUAGE",
            Self::ComponentNotFound => "COMPONENT_NOT_FOUND",
            Self::LanguageNotFound => "LANGUAGE_NOT_FOUND",
            Self::TranslationMissing => "TRANSLATION_MISSING",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::ConstantConflict => "CONSTANT_CONFLICT",
            Self::ConstantsSchemaValidationFailed => "CONSTANTS_SCHEMA_VALIDATION_FAILED",
            Self::StringKeyNotRegistered => "STRING_KEY_NOT_REGISTERED",
            Self::InvalidStringKeyEnum => "INVALID_STRING_KEY_ENUM",
            Self::UnsafeInput => "UNSAFE_INPUT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum I18nError {
    #[error("component already registered: {component_id}")]
    DuplicateComponent { component_id: String },

    #[error("language already registered: {code}")]
    DuplicateLanguage { code: String },

    #[error("component not found: {component_id}")]
    ComponentNotFound { component_id: String },

    #[error("language '{language}' not found for component '{component_id}'")]
    LanguageNotFound {
        component_id: String,
        language: String,
    },

    #[error("language not registered: {language}")]
    UnknownLanguage { language: String },

    #[error("translation missing: {component_id}.{key} ({language})")]
    TranslationMissing {
        component_id: String,
        key: String,
        language: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error(
        "constant '{key}' registered by '{new_owner}' conflicts with value owned by '{existing_owner}'"
    )]
    ConstantConflict {
        key: String,
        new_owner: String,
        existing_owner: String,
    },

    #[error(
        "constants for '{component_id}' failed schema '{interface_id}': {}",
        join_field_errors(.field_errors)
    )]
    ConstantsSchemaValidationFailed {
        component_id: String,
        interface_id: String,
        field_errors: Vec<FieldError>,
    },

    #[error("string key not registered: {value}")]
    StringKeyNotRegistered { value: String },

    #[error("invalid string key enum: {message}")]
    InvalidStringKeyEnum { message: String },

    #[error("rejected unsafe key '{key}' in {source_name}")]
    UnsafeKey { key: String, source_name: String },
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl I18nError {
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateComponent { .. } => ErrorCode::DuplicateComponent,
            Self::DuplicateLanguage { .. } => ErrorCode::DuplicateLanguage,
            Self::ComponentNotFound { .. } => ErrorCode::ComponentNotFound,
            Self::LanguageNotFound { .. } | Self::UnknownLanguage { .. } => {
                ErrorCode::LanguageNotFound
            }
            Self::TranslationMissing { .. } => ErrorCode::TranslationMissing,
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            Self::ConstantConflict { .. } => ErrorCode::ConstantConflict,
            Self::ConstantsSchemaValidationFailed { .. } => {
                ErrorCode::ConstantsSchemaValidationFailed
            }
            Self::StringKeyNotRegistered { .. } => ErrorCode::StringKeyNotRegistered,
            Self::InvalidStringKeyEnum { .. } => ErrorCode::InvalidStringKeyEnum,
            Self::UnsafeKey { .. } => ErrorCode::UnsafeInput,
        }
    }

    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn component_not_found(component_id: impl Into<String>) -> Self {
        Self::ComponentNotFound {
            component_id: component_id.into(),
        }
    }
}
