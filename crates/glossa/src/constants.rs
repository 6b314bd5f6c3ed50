//! Shared template constants with per-key ownership.
//!
//! Several components may contribute constants (site name, product name,
//! support address, ...) to one flat pool that every template can reference.
//! Each key has exactly one owner whose value wins; other holders of the same
//! key only fill gaps. This keeps the merged view independent of the order in
//! which library components happen to initialize.
//!
//! # Invariants
//!
//! 1. **One owner per key**: the first registrant of a key owns it until a
//!    component explicitly `update`s or `replace`s that key.
//! 2. **Atomic register**: schema validation and conflict detection complete
//!    before any state changes; a failing `register` leaves the registry
//!    untouched.
//! 3. **Idempotent register**: a second `register` for the same component id
//!    is a silent no-op, even with different constants.
//! 4. **Cache coherence**: the merged view is rebuilt lazily after every
//!    mutation; reads between mutations return the same snapshot.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Conflict | Key owned elsewhere with a different value | `ConstantConflict`, no mutation |
//! | Schema mismatch | Missing/mistyped/unknown field | `ConstantsSchemaValidationFailed`, no mutation |
//! | Reserved key | `__proto__` etc. | `UnsafeKey`, no mutation |

use std::cell::OnceCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, I18nError, Result};
use crate::safety::check_variables;
use crate::value::{Value, Variables};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Expected kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Integer,
    /// Any number; integers are accepted.
    Float,
    Bool,
    Any,
}

impl ValueKind {
    fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Any, _)
                | (Self::String, Value::String(_))
                | (Self::Integer, Value::Integer(_))
                | (Self::Float, Value::Float(_) | Value::Integer(_))
                | (Self::Bool, Value::Bool(_))
        )
    }

    const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Any => "any",
        }
    }
}

/// One field of a [`ConstantsSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub kind: ValueKind,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

/// Shape that a component's constants must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantsSchema {
    /// Identifier reported in validation failures.
    pub interface_id: String,
    #[serde(default)]
    pub fields: Vec<SchemaField>,
    /// Whether keys not named in `fields` are accepted.
    #[serde(default)]
    pub allow_unknown: bool,
}

impl ConstantsSchema {
    #[must_use]
    pub fn new(interface_id: impl Into<String>) -> Self {
        Self {
            interface_id: interface_id.into(),
            fields: Vec::new(),
            allow_unknown: false,
        }
    }

    #[must_use]
    pub fn required(mut self, name: impl Into<String>, kind: ValueKind) -> Self {
        self.fields.push(SchemaField {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, kind: ValueKind) -> Self {
        self.fields.push(SchemaField {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    #[must_use]
    pub fn allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }

    /// Collect every field-level problem; empty means valid.
    #[must_use]
    pub fn validate(&self, constants: &Variables) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for field in &self.fields {
            match constants.get(&field.name) {
                Some(value) if !field.kind.accepts(value) => errors.push(FieldError::new(
                    &field.name,
                    format!("expected {}, got {}", field.kind.name(), value.kind_name()),
                )),
                Some(_) => {}
                None if field.required => {
                    errors.push(FieldError::new(&field.name, "missing required field"));
                }
                None => {}
            }
        }
        if !self.allow_unknown {
            for key in constants.keys() {
                if !self.fields.iter().any(|f| f.name == key) {
                    errors.push(FieldError::new(key, "unknown field"));
                }
            }
        }
        errors
    }

    fn check(&self, component_id: &str, constants: &Variables) -> Result<()> {
        let field_errors = self.validate(constants);
        if field_errors.is_empty() {
            return Ok(());
        }
        tracing::warn!(
            target: "glossa.constants",
            component = %component_id,
            interface = %self.interface_id,
            errors = field_errors.len(),
            "constants failed schema validation"
        );
        Err(I18nError::ConstantsSchemaValidationFailed {
            component_id: component_id.to_owned(),
            interface_id: self.interface_id.clone(),
            field_errors,
        })
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// One component's contribution to the constants pool.
#[derive(Debug, Clone)]
pub struct ConstantsEntry {
    pub component_id: String,
    pub constants: Variables,
    pub schema: Option<ConstantsSchema>,
}

/// Per-engine constants registry.
#[derive(Debug, Clone, Default)]
pub struct ConstantsRegistry {
    entries: HashMap<String, ConstantsEntry>,
    /// Registration order; gap-filling walks entries in this order.
    order: Vec<String>,
    /// Constant key → owning component id.
    owners: HashMap<String, String>,
    deferred_schemas: HashMap<String, ConstantsSchema>,
    merged: OnceCell<Variables>,
}

impl ConstantsRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component's constants.
    ///
    /// A no-op when `component_id` already has an entry. Otherwise validates
    /// against `schema` (or a schema deferred via
    /// [`ConstantsRegistry::defer_schema`]), then rejects any key owned by
    /// another component with a different value. Only then is the entry
    /// stored and every previously unowned key claimed.
    pub fn register(
        &mut self,
        component_id: &str,
        constants: Variables,
        schema: Option<ConstantsSchema>,
    ) -> Result<()> {
        check_variables(&constants, "constants")?;

        if self.entries.contains_key(component_id) {
            tracing::trace!(
                target: "glossa.constants",
                component = %component_id,
                "constants already registered; skipping"
            );
            return Ok(());
        }

        let schema = schema.or_else(|| self.deferred_schemas.get(component_id).cloned());
        if let Some(schema) = &schema {
            schema.check(component_id, &constants)?;
        }

        for (key, value) in constants.iter() {
            let Some(owner) = self.owners.get(key) else {
                continue;
            };
            if owner == component_id {
                continue;
            }
            let owned_value = self
                .entries
                .get(owner)
                .and_then(|entry| entry.constants.get(key));
            if !owned_value.is_some_and(|owned| owned.same_as(value)) {
                tracing::warn!(
                    target: "glossa.constants",
                    key = %key,
                    new_owner = %component_id,
                    existing_owner = %owner,
                    "constant conflict"
                );
                return Err(I18nError::ConstantConflict {
                    key: key.to_owned(),
                    new_owner: component_id.to_owned(),
                    existing_owner: owner.clone(),
                });
            }
        }

        for key in constants.keys() {
            self.owners
                .entry(key.to_owned())
                .or_insert_with(|| component_id.to_owned());
        }
        self.deferred_schemas.remove(component_id);
        tracing::debug!(
            target: "glossa.constants",
            component = %component_id,
            keys = constants.len(),
            "constants registered"
        );
        self.order.push(component_id.to_owned());
        self.entries.insert(
            component_id.to_owned(),
            ConstantsEntry {
                component_id: component_id.to_owned(),
                constants,
                schema,
            },
        );
        self.invalidate();
        Ok(())
    }

    /// Merge `constants` into the component's entry, taking ownership of
    /// every supplied key.
    ///
    /// Never idempotent and never a conflict: keys owned by other components
    /// transfer to `component_id`. Creates the entry when absent. The merged
    /// result must satisfy the entry's schema, or the deferred schema when
    /// the entry is created here.
    pub fn update(&mut self, component_id: &str, constants: Variables) -> Result<()> {
        check_variables(&constants, "constants")?;

        if let Some(schema) = self.active_schema(component_id) {
            let mut candidate = self
                .constants_for(component_id)
                .cloned()
                .unwrap_or_default();
            candidate.overlay(&constants);
            schema.check(component_id, &candidate)?;
        }

        self.claim_keys(component_id, constants.keys());
        match self.entries.get_mut(component_id) {
            Some(entry) => entry.constants.overlay(&constants),
            None => self.insert_entry(component_id, constants),
        }
        tracing::debug!(
            target: "glossa.constants",
            component = %component_id,
            "constants updated"
        );
        self.invalidate();
        Ok(())
    }

    /// Swap the component's constants wholesale.
    ///
    /// Keys dropped from the old set lose their owner (other holders may then
    /// fill the gap); every key in the new set is claimed by `component_id`.
    /// The new set is validated like [`ConstantsRegistry::update`] validates.
    pub fn replace(&mut self, component_id: &str, constants: Variables) -> Result<()> {
        check_variables(&constants, "constants")?;

        if let Some(schema) = self.active_schema(component_id) {
            schema.check(component_id, &constants)?;
        }

        if let Some(entry) = self.entries.get(component_id) {
            for key in entry.constants.keys() {
                if !constants.contains_key(key)
                    && self.owners.get(key).is_some_and(|o| o == component_id)
                {
                    self.owners.remove(key);
                }
            }
        }

        self.claim_keys(component_id, constants.keys());
        match self.entries.get_mut(component_id) {
            Some(entry) => entry.constants = constants,
            None => self.insert_entry(component_id, constants),
        }
        tracing::debug!(
            target: "glossa.constants",
            component = %component_id,
            "constants replaced"
        );
        self.invalidate();
        Ok(())
    }

    /// Attach a schema to a component.
    ///
    /// For a component that has not registered constants yet, the schema is
    /// held and applied by the next [`ConstantsRegistry::register`]. For a
    /// registered component the current constants are validated immediately.
    pub fn defer_schema(&mut self, component_id: &str, schema: ConstantsSchema) -> Result<()> {
        match self.entries.get_mut(component_id) {
            Some(entry) => {
                schema.check(component_id, &entry.constants)?;
                entry.schema = Some(schema);
            }
            None => {
                self.deferred_schemas.insert(component_id.to_owned(), schema);
            }
        }
        Ok(())
    }

    /// The owner-resolved flat view of every constant.
    ///
    /// Owners' values win; keys without an owner are filled from entries in
    /// registration order.
    pub fn merged(&self) -> &Variables {
        self.merged.get_or_init(|| {
            let mut merged = Variables::new();
            for entry in self.order.iter().filter_map(|id| self.entries.get(id)) {
                for (key, value) in entry.constants.iter() {
                    if !merged.contains_key(key) {
                        merged.insert(key, value.clone());
                    }
                }
            }
            for (key, owner) in &self.owners {
                if let Some(value) = self.entries.get(owner).and_then(|e| e.constants.get(key)) {
                    merged.insert(key.clone(), value.clone());
                }
            }
            tracing::trace!(
                target: "glossa.constants",
                keys = merged.len(),
                "merged constants rebuilt"
            );
            merged
        })
    }

    #[must_use]
    pub fn owner_of(&self, key: &str) -> Option<&str> {
        self.owners.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, component_id: &str) -> Option<&ConstantsEntry> {
        self.entries.get(component_id)
    }

    /// The constants a component registered (not owner-resolved).
    #[must_use]
    pub fn constants_for(&self, component_id: &str) -> Option<&Variables> {
        self.entries.get(component_id).map(|entry| &entry.constants)
    }

    #[must_use]
    pub fn contains(&self, component_id: &str) -> bool {
        self.entries.contains_key(component_id)
    }

    /// Component ids in registration order.
    #[must_use]
    pub fn component_ids(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.merged.get().is_some()
    }

    fn claim_keys<'a>(&mut self, component_id: &str, keys: impl Iterator<Item = &'a str>) {
        for key in keys {
            let previous = self
                .owners
                .insert(key.to_owned(), component_id.to_owned());
            if let Some(previous) = previous.filter(|p| p != component_id) {
                tracing::debug!(
                    target: "glossa.constants",
                    key = %key,
                    from = %previous,
                    to = %component_id,
                    "constant ownership transferred"
                );
            }
        }
    }

    /// The schema governing writes: the entry's own, else a deferred one.
    fn active_schema(&self, component_id: &str) -> Option<&ConstantsSchema> {
        match self.entries.get(component_id) {
            Some(entry) => entry.schema.as_ref(),
            None => self.deferred_schemas.get(component_id),
        }
    }

    /// Create an entry outside `register`, adopting any deferred schema.
    fn insert_entry(&mut self, component_id: &str, constants: Variables) {
        let schema = self.deferred_schemas.remove(component_id);
        self.order.push(component_id.to_owned());
        self.entries.insert(
            component_id.to_owned(),
            ConstantsEntry {
                component_id: component_id.to_owned(),
                constants,
                schema,
            },
        );
    }

    fn invalidate(&mut self) {
        self.merged = OnceCell::new();
    }
}
