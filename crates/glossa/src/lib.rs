#![forbid(unsafe_code)]

//! Runtime translation engine.
//!
//! Renders localized strings for named *components* (bundles of per-language
//! string tables), with shared constants, CLDR-style plural selection,
//! `{name}` substitution and free-form template processing.
//!
//! # Pieces
//! - [`component::ComponentStore`]: registration, aliases, key lookup.
//! - [`constants::ConstantsRegistry`]: shared constants with single-owner
//!   conflict rules and a cached merged view.
//! - [`string_key::StringKeyResolver`]: maps a bare key value to its
//!   component, with a scan fallback.
//! - [`plural`]: language → plural category rules.
//! - [`context::ContextManager`]: active languages and context fields.
//! - [`TranslationEngine`]: composes all of the above, one isolated instance
//!   per engine.
//!
//! # Example
//!
//! ```
//! use glossa::{ComponentConfig, EngineConfig, LocaleStrings, TranslationEngine, Variables};
//!
//! let mut engine = TranslationEngine::new(EngineConfig::default().default_language("en"))?;
//! engine.register_component(
//!     ComponentConfig::new("app")
//!         .language("en", LocaleStrings::new().with("greet", "Hello, {name}!")),
//! )?;
//!
//! let vars = Variables::from([("name", "Ada")]);
//! assert_eq!(engine.translate("app", "greet", &vars, None)?, "Hello, Ada!");
//! assert_eq!(engine.safe_translate("app", "missing", &vars, None), "[app.missing]");
//! # Ok::<(), glossa::I18nError>(())
//! ```

pub mod catalog;
pub mod component;
pub mod config;
pub mod constants;
pub mod context;
pub mod engine;
pub mod error;
pub mod interpolate;
pub mod language;
pub mod plural;
pub mod safety;
pub mod string_key;
pub mod template;
pub mod value;

pub use catalog::{
    ComponentConfig, CoverageReport, LanguageTables, LocaleCoverage, LocaleStrings, StringValue,
};
pub use component::{Component, ComponentStore, ValidationResult};
pub use config::{ConfigError, EngineConfig};
pub use constants::{ConstantsRegistry, ConstantsSchema, ValueKind};
pub use context::{ActiveContext, ContextChange, ContextKind, ContextManager, ListenerId};
pub use engine::TranslationEngine;
pub use error::{ErrorCode, FieldError, I18nError, Result};
pub use language::{LanguageDefinition, LanguageRegistry};
pub use plural::{PluralCategory, PluralForms, PluralRule, category_for};
pub use string_key::{StringKeyEnum, StringKeyResolver};
pub use value::{Value, Variables};
