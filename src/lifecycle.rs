//! One submission, start to finish.
//!
//! `Idle -> Validating -> Submitting -> AwaitingResponse -> {Succeeded | Failed} -> Idle`
//!
//! The lifecycle validates the form, resolves the country, sends exactly one request
//! under a deadline, interprets the reply and hands the terminal outcome to the
//! [`RenderSurface`]. Apart from the busy indicator, the surface is only written to once a
//! terminal state is reached.
//! At most one request is in flight per [`Lifecycle`]; overlapping submissions are
//! rejected with [`SubmitOutcome::Busy`].

use crate::api::{Client, Transport, interpret_response};
use crate::config::Settings;
use crate::country;
use crate::error::{AnalysisError, TransportError};
use crate::models::AnalysisRequest;
use crate::render::{AnalysisView, RenderSurface, project};
use log::{debug, info, warn};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Validating,
    Submitting,
    AwaitingResponse,
    Succeeded,
    Failed,
}

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub url: String,
    pub keyword: String,
    pub country: String,
}

impl FormInput {
    pub fn new(
        url: impl Into<String>,
        keyword: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            keyword: keyword.into(),
            country: country.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Succeeded(AnalysisView),
    Failed(AnalysisError),
    /// Another submission was still in flight; nothing was sent.
    Busy,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            SubmitOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Check the form and build the request payload.
///
/// URL and keyword are trimmed and must be non-empty; the URL must parse as an absolute URL.
/// The country never fails validation, it is resolved with [`country::resolve`].
pub fn validate(form: &FormInput) -> Result<AnalysisRequest, AnalysisError> {
    let url = form.url.trim();
    let keyword = form.keyword.trim();
    if url.is_empty() || keyword.is_empty() {
        return Err(AnalysisError::MissingInput);
    }
    if Url::parse(url).is_err() {
        return Err(AnalysisError::InvalidUrl);
    }
    let country_input = form.country.trim();
    let country = country::resolve(Some(country_input));
    debug!("country input {:?} -> code {:?}", country_input, country);
    Ok(AnalysisRequest {
        url: url.to_string(),
        keyword: keyword.to_string(),
        country,
    })
}

/// Drives submissions against one analysis endpoint.
pub struct Lifecycle<T: Transport = Client> {
    transport: T,
    settings: Settings,
    busy: AtomicBool,
    state: Mutex<LifecycleState>,
}

/// Clears the busy flag and returns to `Idle` even if the submission future is dropped.
struct InFlight<'a, T: Transport> {
    owner: &'a Lifecycle<T>,
}

impl<T: Transport> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        self.owner.set_state(LifecycleState::Idle);
        self.owner.busy.store(false, Ordering::Release);
    }
}

/// Holds the surface's busy indicator on; switching it off again on drop covers a
/// caller that abandons the submission mid-request.
struct BusyIndicator<'s, S: RenderSurface> {
    surface: &'s mut S,
}

impl<'s, S: RenderSurface> BusyIndicator<'s, S> {
    fn engage(surface: &'s mut S) -> Self {
        surface.set_busy(true);
        Self { surface }
    }
}

impl<S: RenderSurface> Drop for BusyIndicator<'_, S> {
    fn drop(&mut self) {
        self.surface.set_busy(false);
    }
}

impl Lifecycle<Client> {
    pub fn new(settings: Settings) -> Self {
        Self::with_transport(Client::default(), settings)
    }
}

impl<T: Transport> Lifecycle<T> {
    pub fn with_transport(transport: T, settings: Settings) -> Self {
        Self {
            transport,
            settings,
            busy: AtomicBool::new(false),
            state: Mutex::new(LifecycleState::Idle),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// True while a request is being sent or awaited.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn set_state(&self, next: LifecycleState) {
        let mut s = self.state.lock().unwrap_or_else(|e| e.into_inner());
        debug!("lifecycle {:?} -> {:?}", *s, next);
        *s = next;
    }

    /// Run one submission and report its outcome to `surface`.
    ///
    /// Errors never escape: every failure ends up as [`SubmitOutcome::Failed`] with the
    /// surface showing its message and previous results hidden.
    ///
    /// Dropping the returned future cancels the request. The lifecycle goes back to
    /// `Idle` and the surface gets `set_busy(false)`, but neither results nor an
    /// error are shown.
    pub async fn submit<S: RenderSurface>(&self, form: &FormInput, surface: &mut S) -> SubmitOutcome {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("submission ignored: a request is already in flight");
            return SubmitOutcome::Busy;
        }
        let _in_flight = InFlight { owner: self };

        match self.run(form, surface).await {
            Ok(view) => {
                self.set_state(LifecycleState::Succeeded);
                surface.show_results(&view);
                SubmitOutcome::Succeeded(view)
            }
            Err(e) => {
                self.set_state(LifecycleState::Failed);
                warn!("analysis failed ({}): {}", e.kind(), e);
                surface.hide_results();
                surface.show_error(&e.to_string());
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn run<S: RenderSurface>(
        &self,
        form: &FormInput,
        surface: &mut S,
    ) -> Result<AnalysisView, AnalysisError> {
        self.set_state(LifecycleState::Validating);
        let request = validate(form)?;

        self.set_state(LifecycleState::Submitting);
        info!(
            "analyzing {} for {:?} (country {})",
            request.url, request.keyword, request.country
        );
        debug!("POST {} payload {:?}", self.settings.api_url, request);
        let indicator = BusyIndicator::engage(surface);

        self.set_state(LifecycleState::AwaitingResponse);
        // Elapsing drops the transport future, which cancels the in-flight call.
        let reply = tokio::time::timeout(
            self.settings.timeout,
            self.transport.post_json(&self.settings.api_url, &request),
        )
        .await;
        drop(indicator);

        let raw = match reply {
            Err(_) => return Err(AnalysisError::Timeout),
            Ok(Err(TransportError::Unreachable(e))) => {
                debug!("transport error: {}", e);
                return Err(AnalysisError::NetworkUnreachable);
            }
            Ok(Err(TransportError::Body(e))) => {
                debug!("body error: {}", e);
                return Err(AnalysisError::MalformedResponse);
            }
            Ok(Ok(raw)) => raw,
        };
        info!("response received: HTTP {}", raw.status);

        let resp = interpret_response(&raw)?;
        Ok(project(&resp, self.settings.number_locale()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_trims_and_resolves_country() {
        let req = validate(&FormInput::new(" https://example.com ", " seo ", " Germany ")).unwrap();
        assert_eq!(req.url, "https://example.com");
        assert_eq!(req.keyword, "seo");
        assert_eq!(req.country, "de");
    }

    #[test]
    fn relative_url_is_invalid() {
        assert_eq!(
            validate(&FormInput::new("example.com/page", "seo", "")),
            Err(AnalysisError::InvalidUrl)
        );
    }

    #[test]
    fn blank_fields_are_missing_input() {
        assert_eq!(
            validate(&FormInput::new("   ", "seo", "")),
            Err(AnalysisError::MissingInput)
        );
        assert_eq!(
            validate(&FormInput::new("https://example.com", "", "")),
            Err(AnalysisError::MissingInput)
        );
    }
}
