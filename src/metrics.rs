//! Metric status classification and display formatting.
//!
//! Every number shown to the user goes through [`format`] (or
//! [`format_with_locale`]), and every metric with a reference value gets a
//! [`MetricStatus`] from [`classify`].

use num_format::Locale;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Deviation from the benchmark (in percent) at which a metric stops being neutral.
pub const THRESHOLD_PCT: f64 = 10.0;

/// Three-valued comparison of an observed value against its benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Neutral,
    Bad,
}

impl MetricStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricStatus::Good => "good",
            MetricStatus::Neutral => "neutral",
            MetricStatus::Bad => "bad",
        }
    }
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the benchmark is desirable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Higher,
    Lower,
}

/// Display flavour for [`format`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatKind {
    Percentage,
    Time,
    Count,
    #[default]
    Number,
}

/// Classify `value` against `benchmark`.
///
/// Missing values and a zero (or non-finite) benchmark yield [`MetricStatus::Neutral`].
pub fn classify(value: Option<f64>, benchmark: Option<f64>, direction: Direction) -> MetricStatus {
    let (Some(v), Some(b)) = (value, benchmark) else {
        return MetricStatus::Neutral;
    };
    let pct = (v - b) / b * 100.0;
    if !pct.is_finite() {
        return MetricStatus::Neutral;
    }
    match direction {
        Direction::Higher if pct >= THRESHOLD_PCT => MetricStatus::Good,
        Direction::Higher if pct <= -THRESHOLD_PCT => MetricStatus::Bad,
        Direction::Lower if pct <= -THRESHOLD_PCT => MetricStatus::Good,
        Direction::Lower if pct >= THRESHOLD_PCT => MetricStatus::Bad,
        _ => MetricStatus::Neutral,
    }
}

/// [`classify`] over raw JSON values; anything that is not a JSON number counts as missing.
pub fn classify_json(value: &Value, benchmark: &Value, direction: Direction) -> MetricStatus {
    classify(value.as_f64(), benchmark.as_f64(), direction)
}

/// Status for yes/no checks (schema validity, SSL, ...): set is good, anything else bad.
pub fn status_from_flag(flag: Option<bool>) -> MetricStatus {
    if flag.unwrap_or(false) {
        MetricStatus::Good
    } else {
        MetricStatus::Bad
    }
}

/// Format a metric for display using English digit grouping.
pub fn format(value: Option<f64>, kind: FormatKind) -> String {
    format_with_locale(value, kind, &Locale::en)
}

/// [`format`] over raw JSON values; anything that is not a JSON number renders as `N/A`.
pub fn format_json(value: &Value, kind: FormatKind) -> String {
    format(value.as_f64(), kind)
}

/// Format a metric for display; `locale` only affects [`FormatKind::Count`].
pub fn format_with_locale(value: Option<f64>, kind: FormatKind, locale: &Locale) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return "N/A".to_string();
    };
    match kind {
        FormatKind::Percentage => format!("{:.2}%", v),
        FormatKind::Time => format!("{:.2}s", v),
        FormatKind::Count => format_count(v, locale),
        FormatKind::Number => format!("{:.2}", v),
    }
}

/// Grouped integer part plus up to three fraction digits, trailing zeros dropped.
fn format_count(v: f64, locale: &Locale) -> String {
    // From 1e15 up an f64 holds no fraction digits, and scaling could overflow.
    let rounded = if v.abs() < 1e15 {
        (v * 1000.0).round() / 1000.0
    } else {
        v.trunc()
    };
    let int_part = rounded.trunc();
    let frac = format!("{:.3}", (rounded - int_part).abs());
    let frac = frac
        .trim_start_matches('0')
        .trim_start_matches('.')
        .trim_end_matches('0');

    let grouped = group_digits(&format!("{:.0}", int_part.abs()), locale.separator());
    let sign = if rounded < 0.0 { locale.minus_sign() } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}{}{}", sign, grouped, locale.decimal(), frac)
    }
}

/// Insert `separator` between groups of three digits. Every locale
/// [`map_locale`] returns groups by thousands.
fn group_digits(digits: &str, separator: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}
