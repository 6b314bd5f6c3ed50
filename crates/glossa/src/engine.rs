//! The translation engine: one isolated instance of every registry.
//!
//! # Design
//!
//! [`TranslationEngine`] owns a [`LanguageRegistry`], a [`ComponentStore`],
//! a [`ConstantsRegistry`], a [`StringKeyResolver`] and a
//! [`ContextManager`]. Nothing is process-wide: two engines never observe
//! each other's registrations.
//!
//! Every translation resolves, in order:
//!
//! 1. **Component**: explicit id, then alias, then the [`StringKeyResolver`]
//!    with the key treated as a string-key value. Only when all three miss
//!    is the call [`I18nError::ComponentNotFound`].
//! 2. **Language**: explicit argument, then the context's language for the
//!    active [`ContextKind`], then the registry default. None of these is
//!    [`I18nError::InvalidConfig`].
//! 3. **Variables**: merged constants, overlaid by context fields
//!    (`currency`, `timezone`), overlaid by caller variables.
//!
//! # Failure Modes
//!
//! | Entry point | On failure |
//! |-------------|------------|
//! | `translate`, `translate_string_key`, `register_*` | typed [`I18nError`] |
//! | `safe_translate` | `[componentId.key]` |
//! | `safe_translate_string_key` | `[componentId.value]`, or `[unknown.value]` when unresolvable |
//! | `t` | never fails; unresolved markers stay in the output |
//!
//! Caller variables containing reserved keys are rejected before use
//! ([`I18nError::UnsafeKey`]) unless `strict_dangerous_keys` is off, in
//! which case those keys are dropped. `t` cannot fail and always drops them.

use std::borrow::Cow;

use crate::catalog::{ComponentConfig, LanguageTables};
use crate::component::{ComponentStore, ValidationResult, placeholder};
use crate::config::EngineConfig;
use crate::constants::{ConstantsRegistry, ConstantsSchema};
use crate::context::{ActiveContext, ContextChange, ContextKind, ContextManager, ListenerId};
use crate::error::{I18nError, Result};
use crate::language::{LanguageDefinition, LanguageRegistry};
use crate::safety::{DANGEROUS_KEYS, check_variables, is_dangerous_key};
use crate::string_key::{StringKeyEnum, StringKeyResolver};
use crate::template;
use crate::value::Variables;

/// Component id used in placeholders when a string key cannot be resolved.
pub const UNKNOWN_COMPONENT: &str = "unknown";

/// A self-contained translation engine.
#[derive(Debug)]
pub struct TranslationEngine {
    config: EngineConfig,
    languages: LanguageRegistry,
    components: ComponentStore,
    constants: ConstantsRegistry,
    string_keys: StringKeyResolver,
    context: ContextManager,
}

impl Default for TranslationEngine {
    /// An engine with no languages, in user context, rejecting reserved keys.
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            languages: LanguageRegistry::new(),
            components: ComponentStore::new(),
            constants: ConstantsRegistry::new(),
            string_keys: StringKeyResolver::new(),
            context: ContextManager::new(),
        }
    }
}

impl TranslationEngine {
    /// Build an engine from a configuration.
    ///
    /// Fails with [`I18nError::InvalidConfig`] listing every problem
    /// reported by [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self> {
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(I18nError::invalid_config(problems.join("; ")));
        }

        let mut languages = LanguageRegistry::new();
        for language in &config.languages {
            languages.register(language.clone())?;
        }

        let context = ContextManager::with_state(ActiveContext {
            language: config.effective_default_language().map(str::to_owned),
            admin_language: config.admin_language.clone(),
            context: config.context,
            currency: config.currency.clone(),
            timezone: config.timezone.clone(),
            version: 0,
        });

        tracing::debug!(
            target: "glossa.engine",
            languages = languages.len(),
            default_language = ?context.language(),
            context = %context.context(),
            "engine created"
        );

        Ok(Self {
            config,
            languages,
            components: ComponentStore::new(),
            constants: ConstantsRegistry::new(),
            string_keys: StringKeyResolver::new(),
            context,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -- languages ----------------------------------------------------------

    pub fn register_language(&mut self, language: LanguageDefinition) -> Result<()> {
        self.languages.register(language)
    }

    #[must_use]
    pub fn languages(&self) -> &LanguageRegistry {
        &self.languages
    }

    // -- components ---------------------------------------------------------

    /// Register a component; [`I18nError::DuplicateComponent`] if the id
    /// exists. The returned warnings are advisory.
    pub fn register_component(&mut self, config: ComponentConfig) -> Result<ValidationResult> {
        let result = self.components.register(config)?;
        self.string_keys.invalidate_scan_cache();
        Ok(result)
    }

    /// Register unless the id exists; `Ok(None)` means nothing changed.
    pub fn register_component_if_absent(
        &mut self,
        config: ComponentConfig,
    ) -> Result<Option<ValidationResult>> {
        let result = self.components.register_if_absent(config)?;
        if result.is_some() {
            self.string_keys.invalidate_scan_cache();
        }
        Ok(result)
    }

    /// Merge languages and keys into an existing component (id or alias).
    pub fn update_component_strings(
        &mut self,
        component: &str,
        strings: LanguageTables,
    ) -> Result<ValidationResult> {
        let component_id = self.resolve_component(component)?.to_owned();
        let result = self.components.update_strings(&component_id, strings)?;
        self.string_keys.invalidate_scan_cache();
        Ok(result)
    }

    /// Whether `component` names a registered component or alias.
    #[must_use]
    pub fn has_component(&self, component: &str) -> bool {
        self.components.resolve_id(component).is_some()
    }

    #[must_use]
    pub fn components(&self) -> &ComponentStore {
        &self.components
    }

    // -- translation --------------------------------------------------------

    /// Render `key` of `component`.
    ///
    /// `component` is an id or alias. When it names neither, `key` is looked
    /// up as a string-key value and the owning component is used.
    pub fn translate(
        &self,
        component: &str,
        key: &str,
        variables: &Variables,
        language: Option<&str>,
    ) -> Result<String> {
        let _span = tracing::debug_span!("i18n.translate", component = %component, key = %key)
            .entered();
        let component_id = self.resolve_translation_component(component, key)?;
        self.render(&component_id, key, variables, language)
    }

    /// [`TranslationEngine::translate`] that never fails.
    ///
    /// The placeholder names the resolved component when there is one.
    #[must_use]
    pub fn safe_translate(
        &self,
        component: &str,
        key: &str,
        variables: &Variables,
        language: Option<&str>,
    ) -> String {
        let _span = tracing::debug_span!("i18n.translate", component = %component, key = %key)
            .entered();
        let component_id = match self.resolve_translation_component(component, key) {
            Ok(id) => id,
            Err(err) => return fallback(&err, component, key),
        };
        self.render(&component_id, key, variables, language)
            .unwrap_or_else(|err| fallback(&err, &component_id, key))
    }

    /// Render a free-form template containing `{{component.key}}` and
    /// `{name}` markers.
    #[must_use]
    pub fn t(&self, template: &str, variables: &Variables, language: Option<&str>) -> String {
        let caller = strip_dangerous(variables);
        let mut vars = self.base_variables().into_owned();
        vars.overlay(&caller);

        template::render(template, &vars, |component, key| {
            let component_id = self.components.resolve_id(component)?;
            let _span = tracing::debug_span!(
                "i18n.translate",
                component = %component_id,
                key = %key
            )
            .entered();
            Some(
                self.render(component_id, key, &caller, language)
                    .unwrap_or_else(|err| fallback(&err, component_id, key)),
            )
        })
    }

    // -- string keys --------------------------------------------------------

    /// Register a string-key enum, returning its component id.
    pub fn register_string_key_enum(
        &mut self,
        string_enum: &StringKeyEnum,
        component_id_override: Option<&str>,
    ) -> Result<String> {
        self.string_keys.register(string_enum, component_id_override)
    }

    /// Translate a bare string-key value, resolving its component first.
    pub fn translate_string_key(
        &self,
        value: &str,
        variables: &Variables,
        language: Option<&str>,
    ) -> Result<String> {
        let component_id = self
            .string_keys
            .resolve_component_id(value, &self.components)?;
        let _span = tracing::debug_span!(
            "i18n.translate",
            component = %component_id,
            key = %value
        )
        .entered();
        self.render(&component_id, value, variables, language)
    }

    /// [`TranslationEngine::translate_string_key`] that never fails.
    #[must_use]
    pub fn safe_translate_string_key(
        &self,
        value: &str,
        variables: &Variables,
        language: Option<&str>,
    ) -> String {
        let component_id = match self
            .string_keys
            .resolve_component_id(value, &self.components)
        {
            Ok(id) => id,
            Err(err) => return fallback(&err, UNKNOWN_COMPONENT, value),
        };
        self.render(&component_id, value, variables, language)
            .unwrap_or_else(|err| fallback(&err, &component_id, value))
    }

    #[must_use]
    pub fn string_keys(&self) -> &StringKeyResolver {
        &self.string_keys
    }

    // -- constants ----------------------------------------------------------

    pub fn register_constants(
        &mut self,
        component_id: &str,
        constants: Variables,
        schema: Option<ConstantsSchema>,
    ) -> Result<()> {
        self.constants.register(component_id, constants, schema)
    }

    pub fn update_constants(&mut self, component_id: &str, constants: Variables) -> Result<()> {
        self.constants.update(component_id, constants)
    }

    pub fn replace_constants(&mut self, component_id: &str, constants: Variables) -> Result<()> {
        self.constants.replace(component_id, constants)
    }

    pub fn defer_constants_schema(
        &mut self,
        component_id: &str,
        schema: ConstantsSchema,
    ) -> Result<()> {
        self.constants.defer_schema(component_id, schema)
    }

    /// The owner-resolved constants every translation starts from.
    #[must_use]
    pub fn merged_constants(&self) -> &Variables {
        self.constants.merged()
    }

    #[must_use]
    pub fn constants(&self) -> &ConstantsRegistry {
        &self.constants
    }

    // -- context ------------------------------------------------------------

    pub fn set_language(&mut self, code: &str) -> Result<()> {
        self.context.set_language(code, &self.languages)
    }

    pub fn set_admin_language(&mut self, code: &str) -> Result<()> {
        self.context.set_admin_language(code, &self.languages)
    }

    pub fn set_context(&mut self, context: ContextKind) {
        self.context.set_context(context);
    }

    pub fn set_currency(&mut self, currency: Option<&str>) {
        self.context.set_currency(currency);
    }

    pub fn set_timezone(&mut self, timezone: Option<&str>) {
        self.context.set_timezone(timezone);
    }

    pub fn on_context_change(
        &mut self,
        listener: impl Fn(&ContextChange) + 'static,
    ) -> ListenerId {
        self.context.on_change(listener)
    }

    pub fn remove_context_listener(&mut self, id: ListenerId) -> bool {
        self.context.remove_listener(id)
    }

    #[must_use]
    pub fn context(&self) -> &ContextManager {
        &self.context
    }

    /// The language used when a call omits one, if any.
    #[must_use]
    pub fn current_language(&self) -> Option<&str> {
        self.context
            .current_language()
            .or_else(|| self.languages.default_language().map(|l| l.code.as_str()))
    }

    // -- lifecycle ----------------------------------------------------------

    /// Drop every component, constant and string-key registration.
    ///
    /// Configuration, languages, context state and listeners survive.
    pub fn reset(&mut self) {
        self.components = ComponentStore::new();
        self.constants = ConstantsRegistry::new();
        self.string_keys = StringKeyResolver::new();
        tracing::debug!(target: "glossa.engine", "engine reset");
    }

    // -- internals ----------------------------------------------------------

    fn resolve_component<'a>(&'a self, component: &'a str) -> Result<&'a str> {
        self.components
            .resolve_id(component)
            .ok_or_else(|| I18nError::component_not_found(component))
    }

    /// Id, then alias, then the component owning `key` as a string-key value.
    fn resolve_translation_component<'a>(
        &'a self,
        component: &'a str,
        key: &str,
    ) -> Result<Cow<'a, str>> {
        if let Some(id) = self.components.resolve_id(component) {
            return Ok(Cow::Borrowed(id));
        }
        let id = self
            .string_keys
            .resolve_component_id(key, &self.components)
            .map_err(|_| I18nError::component_not_found(component))?;
        tracing::trace!(
            target: "glossa.engine",
            requested = %component,
            resolved = %id,
            "component resolved through string key"
        );
        Ok(Cow::Owned(id))
    }

    fn effective_language<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        let language = explicit.or_else(|| self.current_language()).ok_or_else(|| {
            I18nError::invalid_config("no language given and no default language configured")
        })?;
        tracing::trace!(
            target: "glossa.engine",
            language = %language,
            explicit = explicit.is_some(),
            "language resolved"
        );
        Ok(language)
    }

    /// Constants overlaid by context fields.
    fn base_variables(&self) -> Cow<'_, Variables> {
        let merged = self.constants.merged();
        let context = self.context.variables();
        if context.is_empty() {
            Cow::Borrowed(merged)
        } else {
            let mut vars = merged.clone();
            vars.overlay(&context);
            Cow::Owned(vars)
        }
    }

    fn caller_variables<'v>(&self, variables: &'v Variables) -> Result<Cow<'v, Variables>> {
        if self.config.strict_dangerous_keys {
            check_variables(variables, "variables")?;
            return Ok(Cow::Borrowed(variables));
        }
        Ok(strip_dangerous(variables))
    }

    /// Translate with a canonical component id.
    fn render(
        &self,
        component_id: &str,
        key: &str,
        variables: &Variables,
        language: Option<&str>,
    ) -> Result<String> {
        let language = self.effective_language(language)?;
        let caller = self.caller_variables(variables)?;
        let base = self.base_variables();
        self.components
            .translate(component_id, key, &base, &caller, language)
    }
}

fn strip_dangerous(variables: &Variables) -> Cow<'_, Variables> {
    if !variables.keys().any(is_dangerous_key) {
        return Cow::Borrowed(variables);
    }
    let mut cleaned = variables.clone();
    for key in DANGEROUS_KEYS {
        if cleaned.remove(key).is_some() {
            tracing::warn!(
                target: "glossa.safety",
                key = %key,
                "dropped reserved variable"
            );
        }
    }
    Cow::Owned(cleaned)
}

/// Log a failure swallowed by a safe entry point and build its placeholder.
fn fallback(err: &I18nError, component_id: &str, key: &str) -> String {
    tracing::warn!(
        target: "glossa.engine",
        code = %err.code(),
        error = %err,
        component = %component_id,
        key = %key,
        "safe translation fell back to placeholder"
    );
    placeholder(component_id, key)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::catalog::LocaleStrings;
    use crate::error::ErrorCode;
    use crate::plural::PluralForms;

    fn engine() -> TranslationEngine {
        let config = EngineConfig::default()
            .language(LanguageDefinition::new("en", "English").default_language())
            .language(LanguageDefinition::new("fr", "Français"));
        let mut engine = TranslationEngine::new(config).unwrap();
        engine
            .register_component(
                ComponentConfig::new("app")
                    .alias("application")
                    .language(
                        "en",
                        LocaleStrings::new()
                            .with("greet", "Hello, {name}!")
                            .with("price", "{amount} {currency}")
                            .with(
                                "items",
                                PluralForms::new()
                                    .with(crate::plural::PluralCategory::One, "{count} item")
                                    .with(crate::plural::PluralCategory::Other, "{count} items"),
                            ),
                    )
                    .language("fr", LocaleStrings::new().with("greet", "Bonjour, {name} !")),
            )
            .unwrap();
        engine
    }

    fn name(value: &str) -> Variables {
        Variables::from([("name", value)])
    }

    #[test]
    fn translate_uses_context_language_by_default() {
        let mut engine = engine();
        assert_eq!(
            engine.translate("app", "greet", &name("Ada"), None).unwrap(),
            "Hello, Ada!"
        );
        engine.set_language("fr").unwrap();
        assert_eq!(
            engine.translate("app", "greet", &name("Ada"), None).unwrap(),
            "Bonjour, Ada !"
        );
        assert_eq!(
            engine.translate("app", "greet", &name("Ada"), Some("en")).unwrap(),
            "Hello, Ada!"
        );
    }

    #[test]
    fn admin_context_switches_language_without_mutating_it() {
        let mut engine = engine();
        engine.set_admin_language("fr").unwrap();
        engine.set_context(ContextKind::Admin);
        assert_eq!(engine.current_language(), Some("fr"));
        engine.set_context(ContextKind::User);
        assert_eq!(engine.current_language(), Some("en"));
        assert_eq!(engine.context().admin_language(), Some("fr"));
    }

    #[test]
    fn aliases_resolve_to_the_canonical_id() {
        let engine = engine();
        assert!(engine.has_component("application"));
        assert_eq!(
            engine.translate("application", "greet", &name("Bo"), None).unwrap(),
            "Hello, Bo!"
        );
        assert_eq!(
            engine.safe_translate("application", "nope", &Variables::new(), None),
            "[app.nope]"
        );
    }

    #[test]
    fn missing_component_is_typed_and_safe() {
        let engine = engine();
        let err = engine
            .translate("ghost", "nowhere", &Variables::new(), None)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ComponentNotFound);
        assert_eq!(
            err,
            I18nError::ComponentNotFound {
                component_id: "ghost".into()
            }
        );
        assert_eq!(
            engine.safe_translate("ghost", "nowhere", &Variables::new(), None),
            "[ghost.nowhere]"
        );
    }

    #[test]
    fn unknown_component_falls_back_to_string_key_owner() {
        let mut engine = engine();
        assert_eq!(
            engine.translate("greet", "greet", &name("Ada"), None).unwrap(),
            engine.translate_string_key("greet", &name("Ada"), None).unwrap()
        );
        assert_eq!(
            engine.safe_translate("ghost", "greet", &name("Ada"), Some("fr")),
            "Bonjour, Ada !"
        );

        engine
            .register_component(
                ComponentConfig::new("status")
                    .language("en", LocaleStrings::new().with("active", "Active")),
            )
            .unwrap();
        engine
            .register_string_key_enum(&StringKeyEnum::new("status", ["active"]), None)
            .unwrap();
        assert_eq!(
            engine.translate("Status", "active", &Variables::new(), None).unwrap(),
            "Active"
        );
        // Resolved through the key, so the placeholder names the owner.
        assert_eq!(
            engine.safe_translate("Status", "active", &Variables::new(), Some("fr")),
            "[status.active]"
        );
    }

    #[test]
    fn no_language_anywhere_is_invalid_config() {
        let mut engine = TranslationEngine::default();
        engine
            .register_component(
                ComponentConfig::new("app").language("en", LocaleStrings::new().with("k", "v")),
            )
            .unwrap();
        let err = engine
            .translate("app", "k", &Variables::new(), None)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
        assert_eq!(
            engine.translate("app", "k", &Variables::new(), Some("en")).unwrap(),
            "v"
        );
    }

    #[test]
    fn context_fields_sit_between_constants_and_caller() {
        let mut engine = engine();
        engine
            .register_constants("shop", Variables::from([("currency", "XXX")]), None)
            .unwrap();
        let amount = Variables::from([("amount", "5")]);
        assert_eq!(
            engine.translate("app", "price", &amount, None).unwrap(),
            "5 XXX"
        );
        engine.set_currency(Some("EUR"));
        assert_eq!(
            engine.translate("app", "price", &amount, None).unwrap(),
            "5 EUR"
        );
        let explicit = amount.clone().with("currency", "USD");
        assert_eq!(
            engine.translate("app", "price", &explicit, None).unwrap(),
            "5 USD"
        );
    }

    #[test]
    fn plural_count_selects_form() {
        let engine = engine();
        let one = Variables::from([("count", 1)]);
        let many = Variables::from([("count", 3)]);
        let none = Variables::new();
        assert_eq!(engine.translate("app", "items", &one, None).unwrap(), "1 item");
        assert_eq!(engine.translate("app", "items", &many, None).unwrap(), "3 items");
        assert_eq!(
            engine.translate("app", "items", &none, None).unwrap(),
            "{count} items"
        );
    }

    #[test]
    fn reserved_caller_keys_are_rejected_or_dropped() {
        let engine = engine();
        let hostile = name("Ada").with("__proto__", "x");
        let err = engine
            .translate("app", "greet", &hostile, None)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsafeInput);
        assert_eq!(
            engine.safe_translate("app", "greet", &hostile, None),
            "[app.greet]"
        );

        let mut config = EngineConfig::default();
        config.strict_dangerous_keys = false;
        let mut lenient = TranslationEngine::new(config).unwrap();
        lenient
            .register_component(
                ComponentConfig::new("app")
                    .language("en", LocaleStrings::new().with("greet", "Hi {name}")),
            )
            .unwrap();
        assert_eq!(
            lenient
                .translate("app", "greet", &hostile, Some("en"))
                .unwrap(),
            "Hi Ada"
        );
    }

    #[test]
    fn template_renders_markers_and_keeps_unknowns() {
        let engine = engine();
        let vars = name("Ada").with("__proto__", "x");
        assert_eq!(
            engine.t("{{app.greet}} / {{application.greet}} / {name}", &vars, None),
            "Hello, Ada! / Hello, Ada! / Ada"
        );
        assert_eq!(
            engine.t("{{ghost.key}} {{app.nope}} {missing}", &vars, None),
            "{{ghost.key}} [app.nope] {missing}"
        );
        assert_eq!(
            engine.t("{{app.greet}}", &name("Zoé"), Some("fr")),
            "Bonjour, Zoé !"
        );
    }

    #[test]
    fn string_keys_resolve_by_enum_then_scan() {
        let mut engine = engine();
        engine
            .register_component(
                ComponentConfig::new("status")
                    .language("en", LocaleStrings::new().with("active", "Active")),
            )
            .unwrap();
        assert_eq!(
            engine
                .translate_string_key("active", &Variables::new(), None)
                .unwrap(),
            "Active"
        );

        let id = engine
            .register_string_key_enum(&StringKeyEnum::untagged(["greet"]), Some("app"))
            .unwrap();
        assert_eq!(id, "app");
        assert_eq!(
            engine.safe_translate_string_key("greet", &name("Ada"), None),
            "Hello, Ada!"
        );
        assert_eq!(
            engine.safe_translate_string_key("nowhere", &Variables::new(), None),
            "[unknown.nowhere]"
        );
        assert_eq!(
            engine.safe_translate_string_key("greet", &Variables::new(), Some("de")),
            "[app.greet]"
        );
        let err = engine
            .translate_string_key("nowhere", &Variables::new(), None)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::StringKeyNotRegistered);
    }

    #[test]
    fn component_changes_invalidate_scan_cache() {
        let mut engine = engine();
        assert_eq!(
            engine.safe_translate_string_key("greet", &name("A"), None),
            "Hello, A!"
        );
        assert!(engine.string_keys().is_scan_cache_warm());

        engine
            .update_component_strings(
                "application",
                LanguageTables::new().with_language("en", LocaleStrings::new().with("late", "Late")),
            )
            .unwrap();
        assert!(!engine.string_keys().is_scan_cache_warm());
        assert_eq!(
            engine.safe_translate_string_key("late", &Variables::new(), None),
            "Late"
        );
    }

    #[test]
    fn duplicate_registration_is_rejected_but_if_absent_is_silent() {
        let mut engine = engine();
        let again = ComponentConfig::new("app").language("en", LocaleStrings::new());
        let err = engine.register_component(again.clone()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DuplicateComponent);
        assert!(engine.register_component_if_absent(again).unwrap().is_none());
        assert_eq!(
            engine.translate("app", "greet", &name("Ada"), None).unwrap(),
            "Hello, Ada!"
        );
    }

    #[test]
    fn reset_keeps_languages_and_listeners() {
        let mut engine = engine();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        engine.on_context_change(move |_| counter.set(counter.get() + 1));
        engine
            .register_constants("site", Variables::from([("Site", "Acme")]), None)
            .unwrap();

        engine.reset();
        assert!(!engine.has_component("app"));
        assert!(engine.merged_constants().is_empty());
        assert_eq!(engine.languages().len(), 2);

        engine.set_language("fr").unwrap();
        assert_eq!(hits.get(), 1);
        let err = engine.set_language("xx").unwrap_err();
        assert_eq!(err.code(), ErrorCode::LanguageNotFound);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = EngineConfig::default()
            .language(LanguageDefinition::new("en", "English"))
            .default_language("de");
        let err = TranslationEngine::new(config).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
        assert!(err.to_string().contains("default_language"));
    }
}
