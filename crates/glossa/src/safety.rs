//! Rejection of reserved keys in externally supplied maps.
//!
//! Variable and constant maps often originate from deserialized user data
//! and are forwarded to template layers that treat some names specially.
//! Any map containing one of [`DANGEROUS_KEYS`] is rejected as a whole,
//! before the engine reads or stores any of it.

use crate::error::{I18nError, Result};
use crate::value::Variables;

/// Keys that are never accepted as variable or constant names.
pub const DANGEROUS_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

#[must_use]
pub fn is_dangerous_key(key: &str) -> bool {
    DANGEROUS_KEYS.contains(&key)
}

/// Fail with [`I18nError::UnsafeKey`] on the first reserved key in `keys`.
pub fn check_keys<'a>(keys: impl IntoIterator<Item = &'a str>, source_name: &str) -> Result<()> {
    match keys.into_iter().find(|k| is_dangerous_key(k)) {
        Some(key) => {
            tracing::warn!(
                target: "glossa.safety",
                key = %key,
                source = %source_name,
                "rejected reserved key"
            );
            Err(I18nError::UnsafeKey {
                key: key.to_owned(),
                source_name: source_name.to_owned(),
            })
        }
        None => Ok(()),
    }
}

/// [`check_keys`] over a variable map.
pub fn check_variables(vars: &Variables, source_name: &str) -> Result<()> {
    check_keys(vars.keys(), source_name)
}
