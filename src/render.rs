//! Projection of an [`AnalysisResponse`] into display-ready panels.
//!
//! A [`RenderSurface`] only ever receives formatted strings and [`MetricStatus`] tags;
//! raw numbers stay on this side of the boundary. The projection is built completely
//! before the surface is touched, so a surface either shows a whole result or none.

use crate::metrics::{
    Direction, FormatKind, MetricStatus, classify, format_with_locale, status_from_flag,
};
use crate::models::{AnalysisResponse, TargetAnalysis, is_truthy};
use num_format::Locale;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as FmtWrite;

/// Recommended title length in characters.
pub const TITLE_LENGTH_BENCHMARK: f64 = 60.0;
/// Recommended meta description length in characters.
pub const META_LENGTH_BENCHMARK: f64 = 160.0;
/// One H1 per page.
pub const H1_BENCHMARK: f64 = 1.0;
/// Seconds.
pub const LOAD_TIME_BENCHMARK: f64 = 3.0;
/// Seconds.
pub const FCP_BENCHMARK: f64 = 1.8;
/// Seconds.
pub const TTI_BENCHMARK: f64 = 3.8;

/// Where results and errors are shown. Implemented by the CLI and by test recorders.
pub trait RenderSurface {
    /// Disable (or re-enable) the control that triggers a submission.
    fn set_busy(&mut self, busy: bool);
    /// Replace any previous result with `view`.
    fn show_results(&mut self, view: &AnalysisView);
    /// Hide previous results.
    fn hide_results(&mut self);
    fn show_error(&mut self, message: &str);
}

/// One labelled value in a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricItem {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MetricStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl MetricItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            status: None,
            tooltip: None,
        }
    }

    pub fn with_status(mut self, status: MetricStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Stable identifiers of the result panels, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    Target,
    Title,
    MetaDescription,
    Headings,
    Content,
    Links,
    Images,
    Schema,
    Technical,
    Performance,
    Benchmarks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: PanelId,
    pub heading: String,
    pub items: Vec<MetricItem>,
}

impl Panel {
    fn new(id: PanelId, heading: &str, items: Vec<MetricItem>) -> Self {
        Self {
            id,
            heading: heading.to_string(),
            items,
        }
    }

    pub fn item(&self, label: &str) -> Option<&MetricItem> {
        self.items.iter().find(|i| i.label == label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationView {
    pub severity: String,
    /// Lowercased severity, for styling.
    pub severity_class: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorView {
    pub url: String,
    pub items: Vec<MetricItem>,
}

/// Everything a surface needs to show one successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub panels: Vec<Panel>,
    pub recommendations: Vec<RecommendationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations_note: Option<String>,
    pub competitors: Vec<CompetitorView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitors_note: Option<String>,
}

impl AnalysisView {
    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }
}

fn text_or(s: Option<&str>, fallback: &str) -> String {
    match s {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

fn yes_no(flag: Option<bool>) -> &'static str {
    if flag.unwrap_or(false) { "Yes" } else { "No" }
}

fn position_text(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) if is_truthy(v) => s.clone(),
        Some(other) if is_truthy(v) => other.to_string(),
        _ => "Not found".to_string(),
    }
}

/// Build the full view for a successful response.
pub fn project(resp: &AnalysisResponse, locale: &Locale) -> AnalysisView {
    let default_target = TargetAnalysis::default();
    let t = resp.target_analysis.as_ref().unwrap_or(&default_target);
    let fmt = |v: Option<f64>, kind: FormatKind| format_with_locale(v, kind, locale);

    let mut panels = Vec::with_capacity(11);

    panels.push(Panel::new(
        PanelId::Target,
        "Target",
        vec![
            MetricItem::new("URL", text_or(t.url.as_deref(), "N/A")),
            MetricItem::new("Keyword", text_or(t.keyword.as_deref(), "N/A")),
        ],
    ));

    let title = t.title.clone().unwrap_or_default();
    panels.push(Panel::new(
        PanelId::Title,
        "Title",
        vec![
            MetricItem::new(
                "Title Length",
                format!("{} characters", fmt(title.length, FormatKind::Number)),
            )
            .with_status(classify(
                title.length,
                Some(TITLE_LENGTH_BENCHMARK),
                Direction::Higher,
            ))
            .with_tooltip("Recommended: 50-60 characters"),
            MetricItem::new("Title Text", text_or(title.text.as_deref(), "Not found")),
            MetricItem::new(
                "Keyword Position",
                position_text(title.keyword_position.as_ref()),
            ),
        ],
    ));

    let meta = t.meta_description.clone().unwrap_or_default();
    panels.push(Panel::new(
        PanelId::MetaDescription,
        "Meta Description",
        vec![
            MetricItem::new(
                "Description Length",
                format!("{} characters", fmt(meta.length, FormatKind::Number)),
            )
            .with_status(classify(
                meta.length,
                Some(META_LENGTH_BENCHMARK),
                Direction::Higher,
            ))
            .with_tooltip("Recommended: 150-160 characters"),
            MetricItem::new(
                "Description Text",
                text_or(meta.text.as_deref(), "Not found"),
            ),
            MetricItem::new(
                "Keyword Position",
                position_text(meta.keyword_position.as_ref()),
            ),
        ],
    ));

    let h = t.headings.clone().unwrap_or_default();
    panels.push(Panel::new(
        PanelId::Headings,
        "Headings",
        vec![
            MetricItem::new("H1 Count", fmt(h.h1_count, FormatKind::Count))
                .with_status(classify(h.h1_count, Some(H1_BENCHMARK), Direction::Higher))
                .with_tooltip("Recommended: 1 H1 tag per page"),
            MetricItem::new("H2 Count", fmt(h.h2_count, FormatKind::Count)),
            MetricItem::new("H3 Count", fmt(h.h3_count, FormatKind::Count)),
            MetricItem::new("Keyword in H1", yes_no(h.keyword_in_h1)),
        ],
    ));

    let c = t.content.clone().unwrap_or_default();
    let b = t.benchmarks.clone().unwrap_or_default();
    panels.push(Panel::new(
        PanelId::Content,
        "Content",
        vec![
            MetricItem::new("Word Count", fmt(c.word_count, FormatKind::Count))
                .with_status(classify(c.word_count, b.word_count, Direction::Higher))
                .with_tooltip(format!(
                    "Benchmark: {}",
                    fmt(b.word_count, FormatKind::Count)
                )),
            MetricItem::new(
                "Keyword Density",
                fmt(c.keyword_density, FormatKind::Percentage),
            )
            .with_status(classify(
                c.keyword_density,
                b.keyword_density,
                Direction::Higher,
            ))
            .with_tooltip(format!(
                "Benchmark: {}",
                fmt(b.keyword_density, FormatKind::Percentage)
            )),
            MetricItem::new(
                "Readability Score",
                fmt(c.readability_score, FormatKind::Number),
            ),
        ],
    ));

    let l = t.links.clone().unwrap_or_default();
    panels.push(Panel::new(
        PanelId::Links,
        "Links",
        vec![
            MetricItem::new("Internal Links", fmt(l.internal_count, FormatKind::Count)),
            MetricItem::new("External Links", fmt(l.external_count, FormatKind::Count)),
            // Benchmark 0 makes the ratio non-finite, so this is always neutral.
            MetricItem::new("Broken Links", fmt(l.broken_count, FormatKind::Count))
                .with_status(classify(l.broken_count, Some(0.0), Direction::Lower))
                .with_tooltip("Should be 0"),
        ],
    ));

    let img = t.images.clone().unwrap_or_default();
    panels.push(Panel::new(
        PanelId::Images,
        "Images",
        vec![
            MetricItem::new("Total Images", fmt(img.total_count, FormatKind::Count)),
            MetricItem::new("Images with Alt", fmt(img.with_alt_count, FormatKind::Count))
                .with_status(classify(
                    img.with_alt_count,
                    img.total_count,
                    Direction::Higher,
                ))
                .with_tooltip("All images should have alt text"),
            MetricItem::new(
                "Images without Alt",
                fmt(img.without_alt_count, FormatKind::Count),
            ),
        ],
    ));

    let schema = t.schema.clone().unwrap_or_default();
    let schema_status = status_from_flag(schema.is_valid);
    let types = schema
        .types
        .as_ref()
        .map(|ts| {
            ts.iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "None found".to_string());
    panels.push(Panel::new(
        PanelId::Schema,
        "Schema",
        vec![
            MetricItem::new("Schema Types", types)
                .with_status(schema_status)
                .with_tooltip(if schema_status == MetricStatus::Good {
                    "Valid schema markup found"
                } else {
                    "No valid schema markup found"
                }),
            MetricItem::new("Valid Schema", yes_no(schema.is_valid)),
        ],
    ));

    let tech = t.technical.clone().unwrap_or_default();
    let mobile = tech.mobile_responsive.unwrap_or(false);
    let ssl = tech.ssl_enabled.unwrap_or(false);
    panels.push(Panel::new(
        PanelId::Technical,
        "Technical",
        vec![
            MetricItem::new("Mobile Responsive", yes_no(tech.mobile_responsive))
                .with_status(status_from_flag(tech.mobile_responsive))
                .with_tooltip(if mobile {
                    "Page is mobile-friendly"
                } else {
                    "Page needs mobile optimization"
                }),
            MetricItem::new("SSL Enabled", yes_no(tech.ssl_enabled))
                .with_status(status_from_flag(tech.ssl_enabled))
                .with_tooltip(if ssl {
                    "Secure connection enabled"
                } else {
                    "SSL certificate not found"
                }),
            MetricItem::new(
                "Canonical URL",
                text_or(tech.canonical_url.as_deref(), "Not set"),
            ),
        ],
    ));

    let perf = t.performance.clone().unwrap_or_default();
    panels.push(Panel::new(
        PanelId::Performance,
        "Performance",
        vec![
            MetricItem::new("Page Load Time", fmt(perf.page_load_time, FormatKind::Time))
                .with_status(classify(
                    perf.page_load_time,
                    Some(LOAD_TIME_BENCHMARK),
                    Direction::Lower,
                ))
                .with_tooltip("Recommended: < 3 seconds"),
            MetricItem::new(
                "First Contentful Paint",
                fmt(perf.first_contentful_paint, FormatKind::Time),
            )
            .with_status(classify(
                perf.first_contentful_paint,
                Some(FCP_BENCHMARK),
                Direction::Lower,
            ))
            .with_tooltip("Recommended: < 1.8 seconds"),
            MetricItem::new(
                "Time to Interactive",
                fmt(perf.time_to_interactive, FormatKind::Time),
            )
            .with_status(classify(
                perf.time_to_interactive,
                Some(TTI_BENCHMARK),
                Direction::Lower,
            ))
            .with_tooltip("Recommended: < 3.8 seconds"),
        ],
    ));

    panels.push(Panel::new(
        PanelId::Benchmarks,
        "Benchmarks",
        vec![
            MetricItem::new("Word Count Benchmark", fmt(b.word_count, FormatKind::Count)),
            MetricItem::new(
                "Keyword Density Benchmark",
                fmt(b.keyword_density, FormatKind::Percentage),
            ),
            MetricItem::new(
                "Readability Benchmark",
                fmt(b.readability, FormatKind::Number),
            ),
        ],
    ));

    let (recommendations, recommendations_note) = match &t.recommendations {
        Some(recs) => (
            recs.iter()
                .map(|r| {
                    let severity = text_or(r.severity.as_deref(), "Medium");
                    RecommendationView {
                        severity_class: severity.to_lowercase(),
                        severity,
                        title: text_or(r.title.as_deref(), "Untitled Recommendation"),
                        description: text_or(
                            r.description.as_deref(),
                            "No description available",
                        ),
                        link: r.resource_link.clone().filter(|s| !s.is_empty()),
                    }
                })
                .collect(),
            None,
        ),
        None => (
            Vec::new(),
            Some("No recommendations available".to_string()),
        ),
    };

    let competitors: Vec<CompetitorView> = resp
        .competitor_analysis_summary
        .iter()
        .flatten()
        .map(|comp| CompetitorView {
            url: text_or(comp.url.as_deref(), "N/A"),
            items: vec![
                MetricItem::new("Title Length", fmt(comp.title_length, FormatKind::Number)),
                MetricItem::new("Word Count", fmt(comp.word_count, FormatKind::Count)),
                MetricItem::new(
                    "Keyword Density",
                    fmt(comp.keyword_density, FormatKind::Percentage),
                ),
            ],
        })
        .collect();
    let competitors_note = competitors
        .is_empty()
        .then(|| "No competitor data available".to_string());

    AnalysisView {
        warning: resp.warning.clone().filter(|w| !w.is_empty()),
        panels,
        recommendations,
        recommendations_note,
        competitors,
        competitors_note,
    }
}

/// Plain-text rendering of a view, one panel per block.
pub fn render_text(view: &AnalysisView) -> String {
    let mut out = String::new();
    if let Some(w) = &view.warning {
        let _ = writeln!(out, "WARNING: {}\n", w);
    }
    for panel in &view.panels {
        let _ = writeln!(out, "== {}", panel.heading);
        for item in &panel.items {
            let _ = write!(out, "  {:<26} {}", item.label, item.value);
            if let Some(s) = item.status {
                let _ = write!(out, "  [{}]", s);
            }
            if let Some(tip) = &item.tooltip {
                let _ = write!(out, "  ({})", tip);
            }
            out.push('\n');
        }
        out.push('\n');
    }

    let _ = writeln!(out, "== Recommendations");
    if let Some(note) = &view.recommendations_note {
        let _ = writeln!(out, "  {}", note);
    }
    for r in &view.recommendations {
        let _ = writeln!(out, "  [{}] {}", r.severity, r.title);
        let _ = writeln!(out, "      {}", r.description);
        if let Some(link) = &r.link {
            let _ = writeln!(out, "      Learn more: {}", link);
        }
    }
    out.push('\n');

    let _ = writeln!(out, "== Competitors");
    if let Some(note) = &view.competitors_note {
        let _ = writeln!(out, "  {}", note);
    }
    for comp in &view.competitors {
        let _ = writeln!(out, "  {}", comp.url);
        for item in &comp.items {
            let _ = writeln!(out, "      {:<22} {}", item.label, item.value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view_of(v: serde_json::Value) -> AnalysisView {
        let resp: AnalysisResponse = serde_json::from_value(v).unwrap();
        project(&resp, &Locale::en)
    }

    #[test]
    fn missing_sections_fall_back_to_placeholders() {
        let view = view_of(json!({"status": "success", "target_analysis": {}}));
        assert_eq!(view.panels.len(), 11);
        let title = view.panel(PanelId::Title).unwrap();
        assert_eq!(title.item("Title Length").unwrap().value, "N/A characters");
        assert_eq!(
            title.item("Title Length").unwrap().status,
            Some(MetricStatus::Neutral)
        );
        assert_eq!(title.item("Title Text").unwrap().value, "Not found");
        assert_eq!(
            view.recommendations_note.as_deref(),
            Some("No recommendations available")
        );
        assert_eq!(
            view.competitors_note.as_deref(),
            Some("No competitor data available")
        );
    }

    #[test]
    fn keyword_position_zero_is_not_found() {
        let view = view_of(json!({
            "status": "success",
            "target_analysis": {"title": {"keyword_position": 0}, "meta_description": {"keyword_position": 12}}
        }));
        let title = view.panel(PanelId::Title).unwrap();
        assert_eq!(title.item("Keyword Position").unwrap().value, "Not found");
        let meta = view.panel(PanelId::MetaDescription).unwrap();
        assert_eq!(meta.item("Keyword Position").unwrap().value, "12");
    }

    #[test]
    fn text_output_lists_every_panel() {
        let view = view_of(json!({
            "status": "success",
            "warning": "Competitor data is partial",
            "target_analysis": {"url": "https://example.com", "keyword": "seo"}
        }));
        let text = render_text(&view);
        assert!(text.starts_with("WARNING: Competitor data is partial"));
        assert!(text.contains("== Performance"));
        assert!(text.contains("https://example.com"));
    }
}
