//! Country name / code resolution for the `country` field of an analysis request.
//!
//! Accepts whatever the user typed ("Germany", " united kingdom ", "IE", "") and always
//! returns a lowercase two-letter code. Unknown input falls back to [`DEFAULT_COUNTRY`].
//!
//! ### Matching order
//! 1. empty input -> default
//! 2. exact (case-insensitive, trimmed) name match in [`COUNTRY_TABLE`]
//! 3. input that already looks like a two-letter code is returned as-is
//!    (no check against a real ISO list)
//! 4. substring match in either direction; the **first** table entry wins, so table
//!    order is the priority when several names overlap
//! 5. default

use log::{debug, warn};
use regex::Regex;
use std::sync::LazyLock;

/// Code used when nothing else matches.
pub const DEFAULT_COUNTRY: &str = "us";

/// Known country names and their codes, in match priority order.
pub static COUNTRY_TABLE: &[(&str, &str)] = &[
    ("united states", "us"),
    ("ireland", "ie"),
    ("united kingdom", "gb"),
    ("canada", "ca"),
    ("australia", "au"),
    ("new zealand", "nz"),
    ("germany", "de"),
    ("france", "fr"),
    ("spain", "es"),
    ("italy", "it"),
    ("japan", "jp"),
    ("korea", "kr"),
    ("china", "cn"),
    ("india", "in"),
    ("brazil", "br"),
    ("mexico", "mx"),
    ("russia", "ru"),
    ("south africa", "za"),
];

static TWO_LETTER_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}$").expect("static regex"));

/// Resolve free-form country input to a two-letter code. Never fails.
pub fn resolve(input: Option<&str>) -> String {
    let normalized = match input {
        Some(s) => s.trim().to_lowercase(),
        None => return DEFAULT_COUNTRY.to_string(),
    };
    if normalized.is_empty() {
        return DEFAULT_COUNTRY.to_string();
    }

    if let Some((_, code)) = COUNTRY_TABLE.iter().find(|(name, _)| *name == normalized) {
        return (*code).to_string();
    }

    if TWO_LETTER_CODE.is_match(&normalized) {
        return normalized;
    }

    // Overlapping names resolve to the earliest table entry.
    if let Some((name, code)) = COUNTRY_TABLE
        .iter()
        .find(|(name, _)| name.contains(normalized.as_str()) || normalized.contains(name))
    {
        debug!("country {:?} matched {:?} by substring", normalized, name);
        return (*code).to_string();
    }

    warn!(
        "country code not found for {:?}, defaulting to {:?}",
        normalized, DEFAULT_COUNTRY
    );
    DEFAULT_COUNTRY.to_string()
}
