use seo_advisor::country::{COUNTRY_TABLE, DEFAULT_COUNTRY, resolve};

#[test]
fn empty_or_missing_input_defaults_to_us() {
    assert_eq!(resolve(None), "us");
    assert_eq!(resolve(Some("")), "us");
    assert_eq!(resolve(Some(" \t ")), DEFAULT_COUNTRY);
}

#[test]
fn exact_names_are_case_insensitive_and_trimmed() {
    assert_eq!(resolve(Some("United States")), "us");
    assert_eq!(resolve(Some(" germany ")), "de");
    assert_eq!(resolve(Some("SOUTH AFRICA")), "za");
    assert_eq!(resolve(Some("United Kingdom")), "gb");
}

#[test]
fn every_table_entry_resolves_to_its_code() {
    for (name, code) in COUNTRY_TABLE {
        assert_eq!(resolve(Some(name)), *code, "{}", name);
    }
}

#[test]
fn two_letter_input_is_taken_as_a_code() {
    assert_eq!(resolve(Some("IE")), "ie");
    assert_eq!(resolve(Some("fr")), "fr");
    // Not validated against a real code list
    assert_eq!(resolve(Some("UK")), "uk");
    assert_eq!(resolve(Some("zz")), "zz");
}

#[test]
fn substring_matches_in_both_directions() {
    // input contains a table name
    assert_eq!(resolve(Some("Republic of Korea")), "kr");
    assert_eq!(resolve(Some("united states of america")), "us");
    // table name contains the input
    assert_eq!(resolve(Some("zealand")), "nz");
    assert_eq!(resolve(Some("Austral")), "au");
}

#[test]
fn overlapping_names_follow_table_order() {
    // both "united states" and "united kingdom" contain "united"
    assert_eq!(resolve(Some("united")), "us");
    // "ireland" is declared before "new zealand"
    assert_eq!(resolve(Some("land")), "ie");
}

#[test]
fn unknown_input_falls_back_to_default() {
    assert_eq!(resolve(Some("atlantis")), "us");
    // no table name appears inside the unspaced spelling
    assert_eq!(resolve(Some("unitedstatesofamerica")), "us");
    assert_eq!(resolve(Some("123")), "us");
}
