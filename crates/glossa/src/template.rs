//! Template processing for free-form text.
//!
//! Two marker forms are recognised in one left-to-right pass:
//!
//! | Marker | Limit | Replacement |
//! |--------|-------|-------------|
//! | `{{componentOrAlias.key}}` | 1..=100 chars inside the braces | a safe translation |
//! | `{name}` | identifier, 1..=50 chars | the bound variable |
//!
//! Anything else is copied through unchanged: an unbound variable, a
//! component marker without a `.` such as `{{name}}`, a component that cannot
//! be resolved, an oversized marker. Replacement text is never re-scanned.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

use crate::value::Variables;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^{}]{1,100})\}\}|\{([A-Za-z_][A-Za-z0-9_]{0,49})\}")
        .expect("template marker regex")
});

/// Render `template`.
///
/// `translate(component, key)` is called for each component marker and
/// returns `None` when the component is unknown, leaving the marker as-is.
pub fn render<F>(template: &str, variables: &Variables, mut translate: F) -> String
where
    F: FnMut(&str, &str) -> Option<String>,
{
    if !template.contains('{') {
        return template.to_owned();
    }
    MARKER
        .replace_all(template, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            if let Some(inner) = caps.get(1) {
                let rendered = inner
                    .as_str()
                    .split_once('.')
                    .map(|(component, key)| (component.trim(), key.trim()))
                    .filter(|(component, key)| !component.is_empty() && !key.is_empty())
                    .and_then(|(component, key)| translate(component, key));
                return rendered.unwrap_or_else(|| whole.to_owned());
            }
            caps.get(2)
                .and_then(|name| variables.get(name.as_str()))
                .map_or_else(|| whole.to_owned(), ToString::to_string)
        })
        .into_owned()
}
