//! CLDR-style cardinal plural categories and per-language rule tables.
//!
//! # Invariants
//!
//! 1. **Pure**: [`PluralRule::categorize`] depends only on the rule and the
//!    count; there is no hidden state.
//! 2. **Sign-insensitive**: every rule categorizes `|count|`. Callers keep the
//!    signed value for rendering `{count}`.
//! 3. **Total**: every rule returns one of the six categories for every input,
//!    including `i64::MIN`, NaN, and infinities.
//! 4. **Selection terminates**: [`PluralForms::select`] falls back to `other`,
//!    then the first available form, then the empty string.
//!
//! Integer rules follow the CLDR cardinal tables for the integer operand.
//! Fractional counts only distinguish the categories CLDR assigns to
//! non-integers (e.g. `other` for Russian, `many` for Czech).

use serde::{Deserialize, Serialize};

/// A CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// All categories in canonical CLDR order.
    pub const ALL: [Self; 6] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Few,
        Self::Many,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }

    /// Parse a lowercase category name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in cardinal plural rules, grouped by the language families that
/// share them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
    /// `one` for 1, `other` otherwise (en, de, nl, sv, it, es, ...).
    English,
    /// `one` for 0 and 1 (fr, pt, hi, ...).
    French,
    /// No plural distinction (ja, zh, ko, th, vi, ...).
    CJK,
    /// East Slavic: `one`/`few`/`many` by last digits (ru, uk, be).
    Russian,
    /// `one` only for 1, then `few`/`many` by last digits (pl).
    Polish,
    /// `one`, `few` for 2-4, `other` (cs, sk).
    Czech,
    /// South Slavic: `one`/`few` by last digits, `other` (hr, sr, bs).
    Croatian,
    /// All six categories (ar).
    Arabic,
    /// `one`, `two`, `other` (he).
    Hebrew,
    /// `zero`, `one`, `two`, `few` (3), `many` (6), `other` (cy).
    Welsh,
    /// `one`, `two`, `few` (3-6), `many` (7-10), `other` (ga).
    Irish,
    /// `one`/`two`/`few` by the last two digits (sl).
    Slovenian,
    /// `zero`, `one`, `other` by last digits (lv).
    Latvian,
    /// `one`, `few`, `other` by last digits (lt).
    Lithuanian,
    /// `one`, `few` for 0 and 2-19 (mod 100), `other` (ro).
    Romanian,
}

impl PluralRule {
    /// Select the rule for a BCP-47-ish locale tag.
    ///
    /// Only the primary language subtag is considered (`"ru-RU"` → Russian).
    /// Unknown or malformed tags fall back to [`PluralRule::English`].
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        let primary = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "fr" | "pt" | "hi" | "bn" | "fa" | "gu" | "kn" | "zu" | "am" => Self::French,
            "ja" | "zh" | "ko" | "th" | "vi" | "id" | "ms" | "lo" | "my" | "km" => Self::CJK,
            "ru" | "uk" | "be" => Self::Russian,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::Czech,
            "hr" | "sr" | "bs" | "sh" => Self::Croatian,
            "ar" => Self::Arabic,
            "he" | "iw" => Self::Hebrew,
            "cy" => Self::Welsh,
            "ga" => Self::Irish,
            "sl" => Self::Slovenian,
            "lv" => Self::Latvian,
            "lt" => Self::Lithuanian,
            "ro" | "mo" => Self::Romanian,
            _ => Self::English,
        }
    }

    /// Categorize an integer count.
    #[must_use]
    pub fn categorize(self, count: i64) -> PluralCategory {
        self.categorize_abs(count.unsigned_abs())
    }

    /// Categorize a possibly fractional count.
    ///
    /// Integral values delegate to [`PluralRule::categorize`]; non-finite
    /// values are `other`.
    #[must_use]
    pub fn categorize_f64(self, count: f64) -> PluralCategory {
        if !count.is_finite() {
            return PluralCategory::Other;
        }
        let abs = count.abs();
        if abs.fract() == 0.0 && abs <= u64::MAX as f64 {
            return self.categorize_abs(abs as u64);
        }
        let integer = abs.trunc();
        match self {
            Self::French if integer <= 1.0 => PluralCategory::One,
            Self::Czech | Self::Lithuanian => PluralCategory::Many,
            Self::Romanian => PluralCategory::Few,
            _ => PluralCategory::Other,
        }
    }

    fn categorize_abs(self, n: u64) -> PluralCategory {
        use PluralCategory::{Few, Many, One, Other, Two, Zero};

        let mod10 = n % 10;
        let mod100 = n % 100;

        match self {
            Self::English => {
                if n == 1 {
                    One
                } else {
                    Other
                }
            }
            Self::French => {
                if n <= 1 {
                    One
                } else {
                    Other
                }
            }
            Self::CJK => Other,
            Self::Russian => {
                if mod10 == 1 && mod100 != 11 {
                    One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    Few
                } else {
                    Many
                }
            }
            Self::Polish => {
                if n == 1 {
                    One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    Few
                } else {
                    Many
                }
            }
            Self::Czech => match n {
                1 => One,
                2..=4 => Few,
                _ => Other,
            },
            Self::Croatian => {
                if mod10 == 1 && mod100 != 11 {
                    One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    Few
                } else {
                    Other
                }
            }
            Self::Arabic => match (n, mod100) {
                (0, _) => Zero,
                (1, _) => One,
                (2, _) => Two,
                (_, 3..=10) => Few,
                (_, 11..=99) => Many,
                _ => Other,
            },
            Self::Hebrew => match n {
                1 => One,
                2 => Two,
                _ => Other,
            },
            Self::Welsh => match n {
                0 => Zero,
                1 => One,
                2 => Two,
                3 => Few,
                6 => Many,
                _ => Other,
            },
            Self::Irish => match n {
                1 => One,
                2 => Two,
                3..=6 => Few,
                7..=10 => Many,
                _ => Other,
            },
            Self::Slovenian => match mod100 {
                1 => One,
                2 => Two,
                3 | 4 => Few,
                _ => Other,
            },
            Self::Latvian => {
                if mod10 == 0 || (11..=19).contains(&mod100) {
                    Zero
                } else if mod10 == 1 && mod100 != 11 {
                    One
                } else {
                    Other
                }
            }
            Self::Lithuanian => {
                if (11..=19).contains(&mod100) {
                    Other
                } else if mod10 == 1 {
                    One
                } else if mod10 >= 2 {
                    Few
                } else {
                    Other
                }
            }
            Self::Romanian => {
                if n == 1 {
                    One
                } else if n == 0 || (2..=19).contains(&mod100) {
                    Few
                } else {
                    Other
                }
            }
        }
    }
}

/// Resolve the plural category for `count` in `language`.
#[must_use]
pub fn category_for(language: &str, count: i64) -> PluralCategory {
    PluralRule::for_locale(language).categorize(count)
}

/// Plural templates keyed by category. Any subset may be present.
///
/// # Example
///
/// ```
/// use glossa::plural::{PluralCategory, PluralForms};
///
/// let forms = PluralForms {
///     one: Some("{count} file".into()),
///     other: Some("{count} files".into()),
///     ..Default::default()
/// };
/// assert_eq!(forms.select(PluralCategory::One), "{count} file");
/// assert_eq!(forms.select(PluralCategory::Few), "{count} files");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluralForms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub few: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub many: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl PluralForms {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for one category.
    #[must_use]
    pub fn with(mut self, category: PluralCategory, template: impl Into<String>) -> Self {
        *self.slot_mut(category) = Some(template.into());
        self
    }

    /// The form stored for exactly `category`, without fallback.
    #[must_use]
    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        match category {
            PluralCategory::Zero => self.zero.as_deref(),
            PluralCategory::One => self.one.as_deref(),
            PluralCategory::Two => self.two.as_deref(),
            PluralCategory::Few => self.few.as_deref(),
            PluralCategory::Many => self.many.as_deref(),
            PluralCategory::Other => self.other.as_deref(),
        }
    }

    fn slot_mut(&mut self, category: PluralCategory) -> &mut Option<String> {
        match category {
            PluralCategory::Zero => &mut self.zero,
            PluralCategory::One => &mut self.one,
            PluralCategory::Two => &mut self.two,
            PluralCategory::Few => &mut self.few,
            PluralCategory::Many => &mut self.many,
            PluralCategory::Other => &mut self.other,
        }
    }

    /// Select the template for `category`.
    ///
    /// Falls back to `other`, then to the first present form in canonical
    /// order, then to `""` when no form is present.
    #[must_use]
    pub fn select(&self, category: PluralCategory) -> &str {
        self.get(category)
            .or_else(|| self.get(PluralCategory::Other))
            .or_else(|| PluralCategory::ALL.into_iter().find_map(|c| self.get(c)))
            .unwrap_or("")
    }

    /// Categories that have a form, in canonical order.
    pub fn categories(&self) -> impl Iterator<Item = PluralCategory> + '_ {
        PluralCategory::ALL
            .into_iter()
            .filter(|c| self.get(*c).is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories().next().is_none()
    }
}

impl<S: Into<String>> FromIterator<(PluralCategory, S)> for PluralForms {
    fn from_iter<I: IntoIterator<Item = (PluralCategory, S)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |forms, (category, template)| {
                forms.with(category, template)
            })
    }
}
