use crate::metrics::map_locale;
use num_format::Locale;
use std::time::Duration;

/// Analysis endpoint used when none is configured.
pub const DEFAULT_API_URL: &str = "https://on-page-seo-advisor-1.onrender.com/analyze";

/// Deadline for one submission, including reading the response body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Runtime settings shared by the client and the lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub timeout: Duration,
    /// Locale tag for digit grouping of counts (`en`, `de`, ...).
    pub locale: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            locale: "en".into(),
        }
    }
}

impl Settings {
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn number_locale(&self) -> &'static Locale {
        map_locale(&self.locale)
    }
}
