//! Active translation context with change notification.
//!
//! # Design
//!
//! [`ContextManager`] owns one [`ActiveContext`]: the user language, the admin
//! language, which of the two is in effect ([`ContextKind`]), and optional
//! `currency` / `timezone` fields that templates may reference. Every setter
//! compares against the current value; a real change bumps the version and
//! notifies listeners in registration order.
//!
//! # Invariants
//!
//! 1. Switching [`ContextKind`] never mutates either language.
//! 2. Setting a field to its current value is a no-op (no version bump, no
//!    notification).
//! 3. When the language registry is non-empty, both language fields name
//!    registered languages.
//!
//! # Failure Modes
//!
//! - **Unregistered language**: `set_language` / `set_admin_language` fail
//!   with [`I18nError::UnknownLanguage`] and leave the context untouched.
//! - **Re-entrant mutation**: listeners receive `&ContextChange` only and
//!   cannot reach the manager, so a listener cannot mutate the context.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{I18nError, Result};
use crate::language::LanguageRegistry;
use crate::value::Variables;

/// Which language of the context is in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    #[default]
    User,
    Admin,
}

impl ContextKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the context state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActiveContext {
    pub language: Option<String>,
    pub admin_language: Option<String>,
    pub context: ContextKind,
    pub currency: Option<String>,
    pub timezone: Option<String>,
    /// Incremented by exactly 1 on each effective change.
    pub version: u64,
}

impl ActiveContext {
    /// The language for the active [`ContextKind`].
    ///
    /// In admin context the admin language wins, falling back to the user
    /// language when unset.
    #[must_use]
    pub fn current_language(&self) -> Option<&str> {
        match self.context {
            ContextKind::User => self.language.as_deref(),
            ContextKind::Admin => self
                .admin_language
                .as_deref()
                .or(self.language.as_deref()),
        }
    }

    /// `currency` and `timezone` as template variables, when set.
    #[must_use]
    pub fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        if let Some(currency) = &self.currency {
            vars.insert("currency", currency.as_str());
        }
        if let Some(timezone) = &self.timezone {
            vars.insert("timezone", timezone.as_str());
        }
        vars
    }
}

/// A single effective change, delivered to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextChange {
    Language {
        old: Option<String>,
        new: String,
    },
    AdminLanguage {
        old: Option<String>,
        new: String,
    },
    Context {
        old: ContextKind,
        new: ContextKind,
    },
    Currency {
        old: Option<String>,
        new: Option<String>,
    },
    Timezone {
        old: Option<String>,
        new: Option<String>,
    },
}

/// Handle returned by [`ContextManager::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&ContextChange)>;

/// Per-engine context state plus its listeners.
#[derive(Default)]
pub struct ContextManager {
    state: ActiveContext,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl fmt::Debug for ContextManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextManager")
            .field("state", &self.state)
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl ContextManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a prepared state without notifying anyone.
    #[must_use]
    pub fn with_state(state: ActiveContext) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ActiveContext {
        self.state.clone()
    }

    #[must_use]
    pub fn current_language(&self) -> Option<&str> {
        self.state.current_language()
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.state.language.as_deref()
    }

    #[must_use]
    pub fn admin_language(&self) -> Option<&str> {
        self.state.admin_language.as_deref()
    }

    #[must_use]
    pub fn context(&self) -> ContextKind {
        self.state.context
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.version
    }

    /// Variables contributed by the context to every translation.
    #[must_use]
    pub fn variables(&self) -> Variables {
        self.state.variables()
    }

    pub fn set_language(&mut self, code: &str, languages: &LanguageRegistry) -> Result<()> {
        ensure_registered(code, languages)?;
        if self.state.language.as_deref() == Some(code) {
            return Ok(());
        }
        let old = self.state.language.replace(code.to_owned());
        self.commit(ContextChange::Language {
            old,
            new: code.to_owned(),
        });
        Ok(())
    }

    pub fn set_admin_language(&mut self, code: &str, languages: &LanguageRegistry) -> Result<()> {
        ensure_registered(code, languages)?;
        if self.state.admin_language.as_deref() == Some(code) {
            return Ok(());
        }
        let old = self.state.admin_language.replace(code.to_owned());
        self.commit(ContextChange::AdminLanguage {
            old,
            new: code.to_owned(),
        });
        Ok(())
    }

    pub fn set_context(&mut self, context: ContextKind) {
        if self.state.context == context {
            return;
        }
        let old = std::mem::replace(&mut self.state.context, context);
        self.commit(ContextChange::Context { old, new: context });
    }

    /// Set or clear (`None`) the currency.
    pub fn set_currency(&mut self, currency: Option<&str>) {
        if self.state.currency.as_deref() == currency {
            return;
        }
        let new = currency.map(str::to_owned);
        let old = std::mem::replace(&mut self.state.currency, new.clone());
        self.commit(ContextChange::Currency { old, new });
    }

    /// Set or clear (`None`) the timezone.
    pub fn set_timezone(&mut self, timezone: Option<&str>) {
        if self.state.timezone.as_deref() == timezone {
            return;
        }
        let new = timezone.map(str::to_owned);
        let old = std::mem::replace(&mut self.state.timezone, new.clone());
        self.commit(ContextChange::Timezone { old, new });
    }

    /// Register a listener called after every effective change.
    pub fn on_change(&mut self, listener: impl Fn(&ContextChange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether a listener was removed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn commit(&mut self, change: ContextChange) {
        self.state.version += 1;
        tracing::debug!(
            target: "glossa.context",
            version = self.state.version,
            change = ?change,
            "context changed"
        );
        for (_, listener) in &self.listeners {
            listener(&change);
        }
    }
}

/// An empty registry accepts any code.
fn ensure_registered(code: &str, languages: &LanguageRegistry) -> Result<()> {
    if languages.is_empty() || languages.contains(code) {
        Ok(())
    } else {
        Err(I18nError::UnknownLanguage {
            language: code.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::ErrorCode;
    use crate::language::LanguageDefinition;

    fn languages() -> LanguageRegistry {
        let mut reg = LanguageRegistry::new();
        reg.register(LanguageDefinition::new("en", "English")).unwrap();
        reg.register(LanguageDefinition::new("de", "Deutsch")).unwrap();
        reg
    }

    #[test]
    fn switching_context_keeps_both_languages() {
        let langs = languages();
        let mut ctx = ContextManager::new();
        ctx.set_language("en", &langs).unwrap();
        ctx.set_admin_language("de", &langs).unwrap();
        assert_eq!(ctx.current_language(), Some("en"));

        ctx.set_context(ContextKind::Admin);
        assert_eq!(ctx.current_language(), Some("de"));
        assert_eq!(ctx.language(), Some("en"));
        assert_eq!(ctx.admin_language(), Some("de"));

        ctx.set_context(ContextKind::User);
        assert_eq!(ctx.current_language(), Some("en"));
    }

    #[test]
    fn admin_context_falls_back_to_user_language() {
        let langs = languages();
        let mut ctx = ContextManager::new();
        ctx.set_language("de", &langs).unwrap();
        ctx.set_context(ContextKind::Admin);
        assert_eq!(ctx.current_language(), Some("de"));
    }

    #[test]
    fn unregistered_language_is_rejected_untouched() {
        let langs = languages();
        let mut ctx = ContextManager::new();
        ctx.set_language("en", &langs).unwrap();
        let err = ctx.set_language("xx", &langs).unwrap_err();
        assert_eq!(err.code(), ErrorCode::LanguageNotFound);
        assert_eq!(ctx.language(), Some("en"));
        assert_eq!(ctx.version(), 1);
    }

    #[test]
    fn empty_registry_accepts_any_code() {
        let mut ctx = ContextManager::new();
        ctx.set_language("tlh", &LanguageRegistry::new()).unwrap();
        assert_eq!(ctx.current_language(), Some("tlh"));
    }

    #[test]
    fn listeners_see_effective_changes_only() {
        let langs = languages();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = ContextManager::new();
        let sink = Rc::clone(&seen);
        let id = ctx.on_change(move |change| sink.borrow_mut().push(change.clone()));

        ctx.set_language("en", &langs).unwrap();
        ctx.set_language("en", &langs).unwrap();
        ctx.set_currency(Some("EUR"));
        ctx.set_currency(Some("EUR"));
        ctx.set_context(ContextKind::User);

        assert_eq!(
            *seen.borrow(),
            vec![
                ContextChange::Language {
                    old: None,
                    new: "en".into()
                },
                ContextChange::Currency {
                    old: None,
                    new: Some("EUR".into())
                },
            ]
        );
        assert_eq!(ctx.version(), 2);

        assert!(ctx.remove_listener(id));
        assert!(!ctx.remove_listener(id));
        ctx.set_timezone(Some("UTC"));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn context_fields_become_variables() {
        let mut ctx = ContextManager::new();
        assert!(ctx.variables().is_empty());
        ctx.set_currency(Some("USD"));
        ctx.set_timezone(Some("Europe/Paris"));
        let vars = ctx.variables();
        assert_eq!(vars.get("currency").map(ToString::to_string).as_deref(), Some("USD"));
        assert_eq!(
            vars.get("timezone").map(ToString::to_string).as_deref(),
            Some("Europe/Paris")
        );
        ctx.set_currency(None);
        assert!(!ctx.variables().contains_key("currency"));
    }

    #[test]
    fn context_kind_serde_is_lowercase() {
        let kind: ContextKind = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(kind, ContextKind::Admin);
        assert_eq!(serde_json::to_string(&ContextKind::User).unwrap(), "\"user\"");
    }
}
