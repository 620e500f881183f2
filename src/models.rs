use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// JSON body sent to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    pub keyword: String,
    /// Two-letter code, already resolved.
    pub country: String,
}

/// Top-level response from the analysis service.
///
/// Only `status == "success"` together with a `target_analysis` section counts as a
/// usable result; everything else is interpreted by the lifecycle as a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_section")]
    pub target_analysis: Option<TargetAnalysis>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub competitor_analysis_summary: Option<Vec<CompetitorSummary>>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub warning: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub detail: Option<String>,
}

impl AnalysisResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// Findings for the submitted page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetAnalysis {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub keyword: Option<String>,
    #[serde(default, deserialize_with = "de_opt_section")]
    pub title: Option<TextElement>,
    #[serde(default, deserialize_with = "de_opt_section")]
    pub meta_description: Option<TextElement>,
    #[serde(default, deserialize_with = "de_opt_section")]
    pub headings: Option<Headings>,
    #[serde(default, deserialize_with = "de_opt_section")]
    pub content: Option<Content>,
    #[serde(default, deserialize_with = "de_opt_section")]
    pub links: Option<Links>,
    #[serde(default, deserialize_with = "de_opt_section")]
    pub images: Option<Images>,
    #[serde(default, deserialize_with = "de_opt_section")]
    pub schema: Option<Schema>,
    #[serde(default, deserialize_with = "de_opt_section")]
    pub technical: Option<Technical>,
    #[serde(default, deserialize_with = "de_opt_section")]
    pub performance: Option<Performance>,
    #[serde(default, deserialize_with = "de_opt_section")]
    pub benchmarks: Option<Benchmarks>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub recommendations: Option<Vec<Recommendation>>,
}

/// Title or meta description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub length: Option<f64>,
    /// The service sends either an index or a label here.
    #[serde(default)]
    pub keyword_position: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headings {
    #[serde(default, deserialize_with = "de_opt_number")]
    pub h1_count: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub h2_count: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub h3_count: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_flag")]
    pub keyword_in_h1: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, deserialize_with = "de_opt_number")]
    pub word_count: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub keyword_density: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub readability_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, deserialize_with = "de_opt_number")]
    pub internal_count: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub external_count: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub broken_count: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Images {
    #[serde(default, deserialize_with = "de_opt_number")]
    pub total_count: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub with_alt_count: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub without_alt_count: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Usually type names, but JSON-LD objects show up too.
    #[serde(default, deserialize_with = "de_opt_list")]
    pub types: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "de_opt_flag")]
    pub is_valid: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Technical {
    #[serde(default, deserialize_with = "de_opt_flag")]
    pub mobile_responsive: Option<bool>,
    #[serde(default, deserialize_with = "de_opt_flag")]
    pub ssl_enabled: Option<bool>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub canonical_url: Option<String>,
}

/// Timings in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    #[serde(default, deserialize_with = "de_opt_number")]
    pub page_load_time: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub first_contentful_paint: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub time_to_interactive: Option<f64>,
}

/// Reference values derived by the service from the competing pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Benchmarks {
    #[serde(default, deserialize_with = "de_opt_number")]
    pub word_count: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub keyword_density: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub readability: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub resource_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorSummary {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub title_length: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub word_count: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub keyword_density: Option<f64>,
}

/// Serde helper: keep JSON numbers, read every other value as absent.
///
/// The service is not strict about numeric fields (`"N/A"`, `null`, or objects show up),
/// and a stray value must not reject the whole response.
fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
    struct NumberVisitor;

    impl<'de> Visitor<'de> for NumberVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "any JSON value (only numbers are kept)")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_str<E>(self, _: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D2>(self, inner: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            inner.deserialize_any(NumberVisitor)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(NumberVisitor)
}

/// Serde helper: keep JSON strings, read every other value as absent.
fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Serde helper: flags follow JSON truthiness (`1`, `"yes"` count as set; `0`, `""` do not).
fn de_opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|x| x != 0.0 && !x.is_nan())),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    })
}

/// Serde helper: a list only when the value is a JSON array; anything else is absent.
/// Items of the wrong shape become `T::default()` so the rest of the list survives.
fn de_opt_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|v| serde_json::from_value(v).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}

/// Serde helper: sections are read from JSON objects. Any other truthy value gives an
/// empty section, and falsy values (`null`, `false`, `0`, `""`) give none.
fn de_opt_section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if !is_truthy(Some(&value)) {
        return Ok(None);
    }
    Ok(Some(match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => T::default(),
    }))
}

/// JavaScript-style truthiness of an optional JSON value, used for "value or fallback" display.
pub fn is_truthy(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|x| x != 0.0 && !x.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
