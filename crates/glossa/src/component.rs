//! Component store: registration, aliasing, and key → rendered string.
//!
//! # Invariants
//!
//! 1. **Ids are immutable**: a registered id is never overwritten.
//!    [`ComponentStore::register`] rejects duplicates;
//!    [`ComponentStore::register_if_absent`] leaves the existing entry alone.
//! 2. **Aliases are unambiguous**: an alias never shadows a component id or
//!    another component's alias.
//! 3. **Generation tracks table shape**: [`ComponentStore::generation`]
//!    increments on every registration or strings update, so dependent caches
//!    can detect staleness.
//! 4. **Completeness is advisory**: missing keys across languages become
//!    warnings in [`ValidationResult`], never errors.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Duplicate id | `register` twice | `DuplicateComponent` |
//! | Alias collision | Alias equals existing id/alias | `InvalidConfig` |
//! | No table for language | Component lacks that language | `LanguageNotFound` |
//! | Missing key | Key absent in the language table | `TranslationMissing` |
//! | Plural with no forms | Empty plural map | Renders `""` |

use std::collections::HashMap;

use crate::catalog::{ComponentConfig, CoverageReport, LanguageTables, StringValue};
use crate::error::{I18nError, Result};
use crate::interpolate::interpolate;
use crate::plural::{PluralCategory, PluralRule};
use crate::value::{Count, Variables};

/// Outcome of a component registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// A registered component.
#[derive(Debug, Clone)]
pub struct Component {
    id: String,
    aliases: Vec<String>,
    strings: LanguageTables,
}

impl Component {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    #[must_use]
    pub fn strings(&self) -> &LanguageTables {
        &self.strings
    }

    /// Keys of the first language table, or nothing for an empty component.
    pub fn primary_keys(&self) -> impl Iterator<Item = &str> {
        self.strings
            .first()
            .into_iter()
            .flat_map(|(_, table)| table.keys())
    }

    /// Per-language key coverage for this component.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        self.strings.coverage_report()
    }
}

/// Holds every registered component for one engine.
#[derive(Debug, Clone, Default)]
pub struct ComponentStore {
    components: HashMap<String, Component>,
    /// Registration order, for deterministic scans.
    order: Vec<String>,
    aliases: HashMap<String, String>,
    generation: u64,
}

impl ComponentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component.
    ///
    /// Fails with [`I18nError::DuplicateComponent`] when the id exists, and
    /// with [`I18nError::InvalidConfig`] for an empty id or an alias that
    /// collides with an existing id or alias. Nothing is stored on failure.
    pub fn register(&mut self, config: ComponentConfig) -> Result<ValidationResult> {
        if config.id.is_empty() {
            return Err(I18nError::invalid_config("component id must not be empty"));
        }
        if self.components.contains_key(&config.id) {
            return Err(I18nError::DuplicateComponent {
                component_id: config.id,
            });
        }
        if let Some(owner) = self.aliases.get(&config.id) {
            return Err(I18nError::invalid_config(format!(
                "component id '{}' is already an alias of '{owner}'",
                config.id
            )));
        }
        for alias in &config.aliases {
            if alias == &config.id {
                continue;
            }
            if self.components.contains_key(alias) {
                return Err(I18nError::invalid_config(format!(
                    "alias '{alias}' of '{}' collides with a component id",
                    config.id
                )));
            }
            if let Some(owner) = self.aliases.get(alias) {
                return Err(I18nError::invalid_config(format!(
                    "alias '{alias}' of '{}' is already an alias of '{owner}'",
                    config.id
                )));
            }
        }

        let validation = validate_completeness(&config.id, &config.strings);
        for warning in &validation.warnings {
            tracing::warn!(
                target: "glossa.components",
                component = %config.id,
                warning = %warning,
                "incomplete component"
            );
        }

        for alias in config.aliases.iter().filter(|a| **a != config.id) {
            self.aliases.insert(alias.clone(), config.id.clone());
        }
        tracing::debug!(
            target: "glossa.components",
            component = %config.id,
            languages = config.strings.len(),
            aliases = config.aliases.len(),
            "component registered"
        );
        self.order.push(config.id.clone());
        self.components.insert(
            config.id.clone(),
            Component {
                id: config.id,
                aliases: config.aliases,
                strings: config.strings,
            },
        );
        self.generation += 1;
        Ok(validation)
    }

    /// Register unless the id already exists.
    ///
    /// Returns `Ok(None)` without touching the store when the id is taken.
    pub fn register_if_absent(
        &mut self,
        config: ComponentConfig,
    ) -> Result<Option<ValidationResult>> {
        if self.components.contains_key(&config.id) {
            tracing::trace!(
                target: "glossa.components",
                component = %config.id,
                "component already registered; skipping"
            );
            return Ok(None);
        }
        self.register(config).map(Some)
    }

    /// Merge new languages/keys into an existing component.
    pub fn update_strings(
        &mut self,
        component_id: &str,
        strings: LanguageTables,
    ) -> Result<ValidationResult> {
        let component = self
            .components
            .get_mut(component_id)
            .ok_or_else(|| I18nError::component_not_found(component_id))?;
        component.strings.merge(strings);
        let validation = validate_completeness(component_id, &component.strings);
        self.generation += 1;
        tracing::debug!(
            target: "glossa.components",
            component = %component_id,
            languages = component.strings.len(),
            "component strings updated"
        );
        Ok(validation)
    }

    /// Resolve an id or alias to the canonical component id.
    #[must_use]
    pub fn resolve_id<'a>(&'a self, id_or_alias: &'a str) -> Option<&'a str> {
        if self.components.contains_key(id_or_alias) {
            return Some(id_or_alias);
        }
        self.aliases.get(id_or_alias).map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, component_id: &str) -> Option<&Component> {
        self.components.get(component_id)
    }

    #[must_use]
    pub fn contains(&self, component_id: &str) -> bool {
        self.components.contains_key(component_id)
    }

    /// Components in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.order.iter().filter_map(|id| self.components.get(id))
    }

    /// Component ids in registration order.
    #[must_use]
    pub fn component_ids(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Monotonic counter bumped by every structural change.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Render `key` of `component_id` in `language`.
    ///
    /// `component_id` must be canonical (aliases are resolved by the caller).
    /// Substitution uses `constants` overlaid by `variables`; the plural
    /// category comes from the resulting `count`.
    pub fn translate(
        &self,
        component_id: &str,
        key: &str,
        constants: &Variables,
        variables: &Variables,
        language: &str,
    ) -> Result<String> {
        let component = self
            .components
            .get(component_id)
            .ok_or_else(|| I18nError::component_not_found(component_id))?;
        let table = component
            .strings
            .get(language)
            .ok_or_else(|| I18nError::LanguageNotFound {
                component_id: component_id.to_owned(),
                language: language.to_owned(),
            })?;
        let value = table.get(key).ok_or_else(|| I18nError::TranslationMissing {
            component_id: component_id.to_owned(),
            key: key.to_owned(),
            language: language.to_owned(),
        })?;

        let mut merged = constants.clone();
        merged.overlay(variables);

        let template = match value {
            StringValue::Text(text) => text.as_str(),
            StringValue::Plural(forms) => {
                let category = plural_category(language, &merged);
                tracing::trace!(
                    target: "glossa.components",
                    component = %component_id,
                    key = %key,
                    category = %category,
                    "plural form selected"
                );
                forms.select(category)
            }
        };

        Ok(interpolate(template, &merged))
    }

    /// [`ComponentStore::translate`] that renders `[componentId.key]` on any
    /// failure.
    #[must_use]
    pub fn safe_translate(
        &self,
        component_id: &str,
        key: &str,
        constants: &Variables,
        variables: &Variables,
        language: &str,
    ) -> String {
        match self.translate(component_id, key, constants, variables, language) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    target: "glossa.components",
                    code = %err.code(),
                    error = %err,
                    "safe translation fell back to placeholder"
                );
                placeholder(component_id, key)
            }
        }
    }
}

/// The canonical placeholder rendered by safe translations.
#[must_use]
pub fn placeholder(component_id: &str, key: &str) -> String {
    format!("[{component_id}.{key}]")
}

/// Category for the `count` variable; `other` when absent or non-numeric.
fn plural_category(language: &str, vars: &Variables) -> PluralCategory {
    let rule = PluralRule::for_locale(language);
    match vars.count() {
        Some(Count::Integer(n)) => rule.categorize(n),
        Some(Count::Float(f)) => rule.categorize_f64(f),
        None => PluralCategory::Other,
    }
}

fn validate_completeness(component_id: &str, strings: &LanguageTables) -> ValidationResult {
    let warnings = strings
        .coverage_report()
        .locales
        .into_iter()
        .flat_map(|coverage| {
            coverage.missing.into_iter().map(move |key| {
                format!(
                    "{component_id}: key '{key}' is missing for language '{}'",
                    coverage.locale
                )
            })
        })
        .collect();
    ValidationResult {
        is_valid: true,
        errors: Vec::new(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LocaleStrings;
    use crate::error::ErrorCode;
    use crate::plural::PluralForms;

    fn app_config() -> ComponentConfig {
        let mut en = LocaleStrings::new();
        en.insert("greet", "Hello, {name}!");
        en.insert("footer", "© {Year} {Site}");
        en.insert_plural(
            "files",
            PluralForms {
                one: Some("{count} file".into()),
                other: Some("{count} files".into()),
                ..Default::default()
            },
        );

        let mut ru = LocaleStrings::new();
        ru.insert("greet", "Привет, {name}!");
        ru.insert_plural(
            "files",
            PluralForms {
                one: Some("{count} файл".into()),
                few: Some("{count} файла".into()),
                many: Some("{count} файлов".into()),
                ..Default::default()
            },
        );

        ComponentConfig::new("app")
            .alias("application")
            .language("en-US", en)
            .language("ru", ru)
    }

    fn store() -> ComponentStore {
        let mut store = ComponentStore::new();
        store.register(app_config()).expect("first registration");
        store
    }

    fn render(store: &ComponentStore, key: &str, vars: &Variables, lang: &str) -> Result<String> {
        store.translate("app", key, &Variables::new(), vars, lang)
    }

    #[test]
    fn register_reports_missing_keys_as_warnings() {
        let mut store = ComponentStore::new();
        let result = store.register(app_config()).unwrap();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(
            result.warnings,
            vec!["app: key 'footer' is missing for language 'ru'".to_string()]
        );
    }

    #[test]
    fn duplicate_register_is_rejected_without_overwrite() {
        let mut store = store();
        let replacement = ComponentConfig::new("app")
            .language("en-US", LocaleStrings::new().with("greet", "Yo"));
        let err = store.register(replacement.clone()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DuplicateComponent);
        assert_eq!(store.register_if_absent(replacement).unwrap(), None);
        let text = render(&store, "greet", &Variables::from([("name", "Ada")]), "en-US");
        assert_eq!(text.unwrap(), "Hello, Ada!");
    }

    #[test]
    fn alias_collisions_are_rejected() {
        let mut store = store();
        let err = store
            .register(ComponentConfig::new("other").alias("app"))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
        let err = store
            .register(ComponentConfig::new("other").alias("application"))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
        let err = store.register(ComponentConfig::new("application")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
        assert!(!store.contains("other"));
    }

    #[test]
    fn resolve_id_follows_aliases() {
        let store = store();
        assert_eq!(store.resolve_id("app"), Some("app"));
        assert_eq!(store.resolve_id("application"), Some("app"));
        assert_eq!(store.resolve_id("nope"), None);
    }

    #[test]
    fn missing_language_and_key_are_distinct_errors() {
        let store = store();
        let err = render(&store, "greet", &Variables::new(), "de").unwrap_err();
        assert_eq!(err.code(), ErrorCode::LanguageNotFound);
        let err = render(&store, "missing", &Variables::new(), "en-US").unwrap_err();
        assert_eq!(err.code(), ErrorCode::TranslationMissing);
    }

    #[test]
    fn caller_variables_override_constants() {
        let store = store();
        let constants = Variables::from([("Site", "Acme"), ("Year", "2020")]);
        let vars = Variables::new().with("Year", 2025);
        let text = store
            .translate("app", "footer", &constants, &vars, "en-US")
            .unwrap();
        assert_eq!(text, "© 2025 Acme");
    }

    #[test]
    fn plural_selection_by_language() {
        let store = store();
        let cases = [
            ("en-US", 1, "1 file"),
            ("en-US", 0, "0 files"),
            ("en-US", 7, "7 files"),
            ("ru", 21, "21 файл"),
            ("ru", 3, "3 файла"),
            ("ru", 11, "11 файлов"),
        ];
        for (lang, count, expected) in cases {
            let vars = Variables::new().with("count", count);
            assert_eq!(render(&store, "files", &vars, lang).unwrap(), expected);
        }
    }

    #[test]
    fn plural_uses_absolute_value_but_renders_sign() {
        let store = store();
        let vars = Variables::new().with("count", -1);
        assert_eq!(render(&store, "files", &vars, "en-US").unwrap(), "-1 file");
    }

    #[test]
    fn plural_without_matching_form_falls_back() {
        let store = store();
        // ru has no `other` form, so a missing count picks the first form.
        assert_eq!(
            render(&store, "files", &Variables::new(), "ru").unwrap(),
            "{count} файл"
        );
    }

    #[test]
    fn empty_plural_renders_empty_string() {
        let mut store = ComponentStore::new();
        let mut en = LocaleStrings::new();
        en.insert_plural("nothing", PluralForms::new());
        store
            .register(ComponentConfig::new("c").language("en", en))
            .unwrap();
        let text = store
            .translate("c", "nothing", &Variables::new(), &Variables::new(), "en")
            .unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn safe_translate_uses_placeholder() {
        let store = store();
        let text = store.safe_translate(
            "app",
            "missing",
            &Variables::new(),
            &Variables::new(),
            "en-US",
        );
        assert_eq!(text, "[app.missing]");
        let text =
            store.safe_translate("ghost", "k", &Variables::new(), &Variables::new(), "en-US");
        assert_eq!(text, "[ghost.k]");
    }

    #[test]
    fn update_strings_merges_and_bumps_generation() {
        let mut store = store();
        let before = store.generation();
        let mut tables = LanguageTables::new();
        tables.insert("ru", LocaleStrings::new().with("footer", "© {Year}"));
        tables.insert("de", LocaleStrings::new().with("greet", "Hallo, {name}!"));
        let result = store.update_strings("app", tables).unwrap();
        assert!(store.generation() > before);
        assert!(result.warnings.iter().any(|w| w.contains("'de'")));

        let vars = Variables::from([("name", "Ada")]);
        assert_eq!(render(&store, "greet", &vars, "de").unwrap(), "Hallo, Ada!");
        assert_eq!(render(&store, "greet", &vars, "en-US").unwrap(), "Hello, Ada!");

        let err = store
            .update_strings("ghost", LanguageTables::new())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ComponentNotFound);
    }

    #[test]
    fn primary_keys_come_from_first_language() {
        let store = store();
        let mut keys: Vec<&str> = store.get("app").unwrap().primary_keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["files", "footer", "greet"]);
        assert_eq!(store.component_ids(), vec!["app"]);
    }
}
