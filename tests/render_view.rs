use seo_advisor::MetricStatus;
use seo_advisor::models::AnalysisResponse;
use seo_advisor::render::{PanelId, project, render_text};
use seo_advisor::metrics::map_locale;
use serde_json::json;

fn sample() -> AnalysisResponse {
    serde_json::from_value(json!({
        "status": "success",
        "warning": "Only 2 of 5 competitors could be fetched",
        "target_analysis": {
            "url": "https://example.com/shoes",
            "keyword": "running shoes",
            "title": {"text": "Running Shoes | Example", "length": 24, "keyword_position": 1},
            "meta_description": {"text": "Buy running shoes", "length": 170},
            "headings": {"h1_count": 2, "h2_count": 4, "h3_count": 0, "keyword_in_h1": false},
            "content": {"word_count": 2400, "keyword_density": 1.05, "readability_score": 58.456},
            "links": {"internal_count": 1200, "external_count": 3, "broken_count": 2},
            "images": {"total_count": 10, "with_alt_count": 5, "without_alt_count": 5},
            "schema": {"types": [], "is_valid": false},
            "technical": {"mobile_responsive": true, "ssl_enabled": false},
            "performance": {"page_load_time": 2.0, "first_contentful_paint": 1.8, "time_to_interactive": "slow"},
            "benchmarks": {"word_count": 2000, "keyword_density": 1.0, "readability": 60},
            "recommendations": [
                {"severity": "High", "title": "Fix broken links", "description": "2 links return 404", "resource_link": "https://example.com/help"},
                {}
            ]
        },
        "competitor_analysis_summary": [
            {"url": "https://a.example", "title_length": 52, "word_count": 3100, "keyword_density": 0.8},
            {"title_length": "n/a"}
        ]
    }))
    .unwrap()
}

#[test]
fn statuses_follow_benchmarks() {
    let view = project(&sample(), map_locale("en"));

    let title = view.panel(PanelId::Title).unwrap();
    assert_eq!(title.item("Title Length").unwrap().status, Some(MetricStatus::Bad));
    let meta = view.panel(PanelId::MetaDescription).unwrap();
    assert_eq!(
        meta.item("Description Length").unwrap().status,
        Some(MetricStatus::Neutral)
    );
    let headings = view.panel(PanelId::Headings).unwrap();
    assert_eq!(headings.item("H1 Count").unwrap().status, Some(MetricStatus::Good));
    assert_eq!(headings.item("Keyword in H1").unwrap().value, "No");

    let content = view.panel(PanelId::Content).unwrap();
    assert_eq!(content.item("Word Count").unwrap().status, Some(MetricStatus::Good));
    assert_eq!(
        content.item("Word Count").unwrap().tooltip.as_deref(),
        Some("Benchmark: 2,000")
    );
    assert_eq!(content.item("Readability Score").unwrap().value, "58.46");

    // zero benchmark is neutral even with broken links present
    let links = view.panel(PanelId::Links).unwrap();
    assert_eq!(links.item("Broken Links").unwrap().status, Some(MetricStatus::Neutral));
    assert_eq!(links.item("Internal Links").unwrap().value, "1,200");

    let images = view.panel(PanelId::Images).unwrap();
    assert_eq!(images.item("Images with Alt").unwrap().status, Some(MetricStatus::Bad));
}

#[test]
fn flags_and_placeholders() {
    let view = project(&sample(), map_locale("en"));

    let schema = view.panel(PanelId::Schema).unwrap();
    assert_eq!(schema.item("Schema Types").unwrap().value, "None found");
    assert_eq!(schema.item("Schema Types").unwrap().status, Some(MetricStatus::Bad));
    assert_eq!(schema.item("Valid Schema").unwrap().value, "No");

    let tech = view.panel(PanelId::Technical).unwrap();
    assert_eq!(tech.item("Mobile Responsive").unwrap().status, Some(MetricStatus::Good));
    assert_eq!(tech.item("SSL Enabled").unwrap().status, Some(MetricStatus::Bad));
    assert_eq!(tech.item("Canonical URL").unwrap().value, "Not set");

    let perf = view.panel(PanelId::Performance).unwrap();
    assert_eq!(perf.item("Page Load Time").unwrap().status, Some(MetricStatus::Good));
    assert_eq!(perf.item("Time to Interactive").unwrap().value, "N/A");
    assert_eq!(
        perf.item("Time to Interactive").unwrap().status,
        Some(MetricStatus::Neutral)
    );
}

#[test]
fn recommendations_and_competitors() {
    let view = project(&sample(), map_locale("en"));

    assert_eq!(view.recommendations.len(), 2);
    assert_eq!(view.recommendations[0].severity_class, "high");
    assert_eq!(view.recommendations[0].link.as_deref(), Some("https://example.com/help"));
    assert_eq!(view.recommendations[1].severity, "Medium");
    assert_eq!(view.recommendations[1].title, "Untitled Recommendation");
    assert_eq!(view.recommendations[1].description, "No description available");
    assert!(view.recommendations_note.is_none());

    assert_eq!(view.competitors.len(), 2);
    assert_eq!(view.competitors[0].items[1].value, "3,100");
    assert_eq!(view.competitors[0].items[2].value, "0.80%");
    assert_eq!(view.competitors[1].url, "N/A");
    assert_eq!(view.competitors[1].items[0].value, "N/A");
    assert!(view.competitors_note.is_none());
}

#[test]
fn counts_use_configured_locale() {
    let view = project(&sample(), map_locale("de"));
    let links = view.panel(PanelId::Links).unwrap();
    assert_eq!(links.item("Internal Links").unwrap().value, "1.200");
    // non-count formats are locale independent
    let content = view.panel(PanelId::Content).unwrap();
    assert_eq!(content.item("Keyword Density").unwrap().value, "1.05%");
}

#[test]
fn json_and_text_output() {
    let view = project(&sample(), map_locale("en"));
    let v = serde_json::to_value(&view).unwrap();
    assert_eq!(v["panels"][0]["id"], "target");
    assert_eq!(v["panels"][1]["items"][0]["status"], "bad");
    assert_eq!(v["warning"], "Only 2 of 5 competitors could be fetched");

    let text = render_text(&view);
    assert!(text.contains("Fix broken links"));
    assert!(text.contains("Learn more: https://example.com/help"));
    assert!(text.contains("[bad]"));
}
