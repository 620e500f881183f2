use seo_advisor::metrics::{
    Direction, FormatKind, MetricStatus, classify, classify_json, format, format_json,
    format_with_locale, map_locale, status_from_flag,
};
use serde_json::json;

#[test]
fn higher_is_better() {
    assert_eq!(classify(Some(66.0), Some(60.0), Direction::Higher), MetricStatus::Good);
    assert_eq!(classify(Some(57.0), Some(60.0), Direction::Higher), MetricStatus::Neutral);
    assert_eq!(classify(Some(60.0), Some(60.0), Direction::Higher), MetricStatus::Neutral);
    // exactly -10% sits on the threshold
    assert_eq!(classify(Some(54.0), Some(60.0), Direction::Higher), MetricStatus::Bad);
    assert_eq!(classify(Some(10.0), Some(60.0), Direction::Higher), MetricStatus::Bad);
}

#[test]
fn lower_is_better() {
    assert_eq!(classify(Some(3.5), Some(3.0), Direction::Lower), MetricStatus::Bad);
    assert_eq!(classify(Some(1.2), Some(1.8), Direction::Lower), MetricStatus::Good);
    assert_eq!(classify(Some(3.9), Some(3.8), Direction::Lower), MetricStatus::Neutral);
}

#[test]
fn default_direction_is_higher() {
    assert_eq!(Direction::default(), Direction::Higher);
    assert_eq!(FormatKind::default(), FormatKind::Number);
}

#[test]
fn missing_values_or_zero_benchmark_are_neutral() {
    assert_eq!(classify(None, Some(60.0), Direction::Higher), MetricStatus::Neutral);
    assert_eq!(classify(Some(60.0), None, Direction::Higher), MetricStatus::Neutral);
    assert_eq!(classify(Some(1.0), Some(0.0), Direction::Lower), MetricStatus::Neutral);
    assert_eq!(classify(Some(0.0), Some(0.0), Direction::Higher), MetricStatus::Neutral);
    assert_eq!(
        classify_json(&json!("66"), &json!(60), Direction::Higher),
        MetricStatus::Neutral
    );
    assert_eq!(
        classify_json(&json!(66), &json!(60), Direction::Higher),
        MetricStatus::Good
    );
}

#[test]
fn flags_map_to_good_or_bad() {
    assert_eq!(status_from_flag(Some(true)), MetricStatus::Good);
    assert_eq!(status_from_flag(Some(false)), MetricStatus::Bad);
    assert_eq!(status_from_flag(None), MetricStatus::Bad);
}

#[test]
fn formats_by_kind() {
    assert_eq!(format(Some(12.345), FormatKind::Percentage), "12.35%");
    assert_eq!(format(Some(2.5), FormatKind::Time), "2.50s");
    assert_eq!(format(Some(55.0), FormatKind::Number), "55.00");
    assert_eq!(format(Some(1234567.0), FormatKind::Count), "1,234,567");
    assert_eq!(format(Some(999.0), FormatKind::Count), "999");
}

#[test]
fn non_numeric_values_render_not_available() {
    assert_eq!(format_json(&json!("x"), FormatKind::Count), "N/A");
    assert_eq!(format_json(&json!(null), FormatKind::Percentage), "N/A");
    assert_eq!(format_json(&json!(true), FormatKind::Number), "N/A");
    assert_eq!(format(None, FormatKind::Time), "N/A");
    assert_eq!(format_json(&json!(1500), FormatKind::Count), "1,500");
}

#[test]
fn locale_only_changes_counts() {
    let de_locale = map_locale("de_DE");
    assert_eq!(format_with_locale(Some(25000.0), FormatKind::Count, de_locale), "25.000");
    assert_eq!(format_with_locale(Some(1.5), FormatKind::Percentage, de_locale), "1.50%");
    // unknown tags fall back to English grouping
    assert_eq!(
        format_with_locale(Some(25000.0), FormatKind::Count, map_locale("xx")),
        "25,000"
    );
}

#[test]
fn counts_beyond_machine_integers_keep_every_digit() {
    assert_eq!(
        format(Some(1e20), FormatKind::Count),
        "100,000,000,000,000,000,000"
    );
    assert_eq!(
        format(Some(-2.5e16), FormatKind::Count),
        "-25,000,000,000,000,000"
    );

    let huge = format(Some(1e308), FormatKind::Count);
    assert!(!huge.contains("NaN"));
    assert!(!huge.contains('.'));
    assert!(huge.starts_with("100,000,000,000,000,001"));
    let digits: String = huge.chars().filter(|c| c.is_ascii_digit()).collect();
    assert_eq!(digits.len(), 309);
    assert!(huge.split(',').skip(1).all(|group| group.len() == 3));
}

#[test]
fn counts_near_the_scaling_cutoff_stay_exact() {
    assert_eq!(format(Some(999_999_999_999_999.0), FormatKind::Count), "999,999,999,999,999");
    assert_eq!(format(Some(123_456_789.125), FormatKind::Count), "123,456,789.125");
}
