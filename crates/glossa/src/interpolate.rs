//! Single-pass `{name}` interpolation.
//!
//! # Invariants
//!
//! 1. **Single pass**: substituted values are emitted verbatim and never
//!    re-scanned, so a value containing `{other}` stays literal.
//! 2. **Lossless on miss**: a token with no binding, an empty `{}`, and an
//!    unclosed brace are all copied through unchanged.

use crate::value::Variables;

/// Replace `{name}` tokens in `template` using `lookup`.
pub fn interpolate_with<F>(template: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            result.push(ch);
            continue;
        }

        let mut token = String::new();
        let mut found_close = false;
        for c in chars.by_ref() {
            if c == '}' {
                found_close = true;
                break;
            }
            token.push(c);
        }

        if !found_close {
            result.push('{');
            result.push_str(&token);
            continue;
        }

        match lookup(&token) {
            Some(value) if !token.is_empty() => result.push_str(&value),
            _ => {
                result.push('{');
                result.push_str(&token);
                result.push('}');
            }
        }
    }

    result
}

/// Replace `{name}` tokens with values from `vars`.
#[must_use]
pub fn interpolate(template: &str, vars: &Variables) -> String {
    interpolate_with(template, |name| vars.get(name).map(ToString::to_string))
}
