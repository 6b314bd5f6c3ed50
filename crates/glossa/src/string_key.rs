//! String-key enums: resolving an opaque key value to its owning component.
//!
//! A [`StringKeyEnum`] is a set of string values that all belong to one
//! component. Registering it lets callers translate a bare value without
//! naming the component.
//!
//! # Resolution
//!
//! 1. **Primary**: the value index built from registered enums.
//! 2. **Scan fallback**: on a primary miss, an index over the first-language
//!    keys of every registered component (registration order, first
//!    component wins). The index is built lazily on the first miss and
//!    discarded whenever the component set changes.
//!
//! # Invariants
//!
//! 1. **Idempotent registration**: registering an equal enum again returns
//!    the id resolved the first time and adds nothing.
//! 2. **No stale misses**: the scan index records the component-store
//!    generation it was built from and is rebuilt when that changes, even if
//!    an explicit invalidation was skipped.
//! 3. **First registration wins** for a value claimed by two enums of
//!    different components; the collision is logged.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::collections::HashMap;

use rustc_hash::FxHashMap;

use crate::component::ComponentStore;
use crate::error::{I18nError, Result};

/// A set of string values bound to one component.
///
/// Equality is structural (component id and values), so two independently
/// constructed but identical enums are the same enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringKeyEnum {
    component_id: Option<String>,
    values: BTreeSet<String>,
}

impl StringKeyEnum {
    /// An enum tagged with its owning component.
    #[must_use]
    pub fn new<I, S>(component_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            component_id: Some(component_id.into()),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// An enum without a component tag; registration needs an override id.
    #[must_use]
    pub fn untagged<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            component_id: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn component_id(&self) -> Option<&str> {
        self.component_id.as_deref()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }
}

#[derive(Debug, Clone)]
struct ScanIndex {
    generation: u64,
    owners: FxHashMap<String, String>,
}

/// Per-engine string-key resolver.
#[derive(Debug, Clone, Default)]
pub struct StringKeyResolver {
    registered: Vec<(StringKeyEnum, String)>,
    by_value: HashMap<String, String>,
    scan: RefCell<Option<ScanIndex>>,
}

impl StringKeyResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enum, returning its resolved component id.
    ///
    /// `component_id_override` takes precedence over the enum's own tag.
    /// Fails with [`I18nError::InvalidStringKeyEnum`] when neither is present
    /// (or the resolved id is empty).
    pub fn register(
        &mut self,
        string_enum: &StringKeyEnum,
        component_id_override: Option<&str>,
    ) -> Result<String> {
        if let Some((_, id)) = self.registered.iter().find(|(e, _)| e == string_enum) {
            tracing::trace!(
                target: "glossa.string_key",
                component = %id,
                "string key enum already registered"
            );
            return Ok(id.clone());
        }

        let component_id = component_id_override
            .or(string_enum.component_id())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| I18nError::InvalidStringKeyEnum {
                message: "enum has no component id and no override was given".into(),
            })?
            .to_owned();

        for value in string_enum.values() {
            match self.by_value.get(value) {
                Some(existing) if *existing != component_id => {
                    tracing::warn!(
                        target: "glossa.string_key",
                        value = %value,
                        existing = %existing,
                        ignored = %component_id,
                        "string key value already bound to another component"
                    );
                }
                Some(_) => {}
                None => {
                    self.by_value.insert(value.to_owned(), component_id.clone());
                }
            }
        }

        tracing::debug!(
            target: "glossa.string_key",
            component = %component_id,
            values = string_enum.values.len(),
            "string key enum registered"
        );
        self.registered
            .push((string_enum.clone(), component_id.clone()));
        Ok(component_id)
    }

    /// Resolve the component owning `value`.
    ///
    /// Tries the registered-enum index, then the scan index over `components`.
    pub fn resolve_component_id(&self, value: &str, components: &ComponentStore) -> Result<String> {
        if let Some(id) = self.by_value.get(value) {
            return Ok(id.clone());
        }

        let mut scan = self.scan.borrow_mut();
        let stale = scan
            .as_ref()
            .is_none_or(|index| index.generation != components.generation());
        if stale {
            *scan = Some(build_scan_index(components));
        }

        let owner = scan
            .as_ref()
            .and_then(|index| index.owners.get(value))
            .cloned();
        owner.ok_or_else(|| I18nError::StringKeyNotRegistered {
            value: value.to_owned(),
        })
    }

    /// Drop the scan index; the next primary miss rebuilds it.
    pub fn invalidate_scan_cache(&mut self) {
        if self.scan.get_mut().take().is_some() {
            tracing::trace!(target: "glossa.string_key", "scan cache invalidated");
        }
    }

    #[must_use]
    pub fn is_scan_cache_warm(&self) -> bool {
        self.scan.borrow().is_some()
    }

    /// Number of values in the scan index (0 when cold).
    #[must_use]
    pub fn scan_cache_len(&self) -> usize {
        self.scan
            .borrow()
            .as_ref()
            .map_or(0, |index| index.owners.len())
    }

    /// Registered enums with their resolved component ids.
    pub fn registered_enums(&self) -> impl Iterator<Item = (&StringKeyEnum, &str)> {
        self.registered.iter().map(|(e, id)| (e, id.as_str()))
    }
}

fn build_scan_index(components: &ComponentStore) -> ScanIndex {
    let mut owners = FxHashMap::default();
    for component in components.iter() {
        for key in component.primary_keys() {
            owners
                .entry(key.to_owned())
                .or_insert_with(|| component.id().to_owned());
        }
    }
    tracing::debug!(
        target: "glossa.string_key",
        components = components.len(),
        keys = owners.len(),
        "scan cache rebuilt"
    );
    ScanIndex {
        generation: components.generation(),
        owners,
    }
}
