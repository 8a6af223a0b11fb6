//! Search state for the widget and the controller that mutates it.
//!
//! Every submission gets a sequence tag. A lookup's outcome is applied only
//! while its tag is still the latest one issued, so a slow earlier lookup can
//! never overwrite the result of a later submission.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::{
    error::{FetchError, ValidationError},
    model::WeatherResult,
    provider::WeatherProvider,
};

/// What the presentation layer reads after each change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    query: String,
    outcome: Outcome,
    is_loading: bool,
}

/// A result and an error message are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
enum Outcome {
    #[default]
    Nothing,
    Weather(WeatherResult),
    Error(String),
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        match &self.outcome {
            Outcome::Weather(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
}

/// How a call to [`SearchController::submit`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected before any lookup was made.
    Invalid(ValidationError),
    /// The lookup settled and its outcome is now in the state.
    Applied,
    /// A newer submission was made while this lookup was in flight; its
    /// outcome was discarded.
    Superseded,
}

#[derive(Debug, Default)]
struct Inner {
    state: SearchState,
    latest_tag: u64,
}

/// Owns the [`SearchState`] and runs lookups against a [`WeatherProvider`].
///
/// Cloning gives another handle to the same state.
#[derive(Debug, Clone)]
pub struct SearchController {
    provider: Arc<dyn WeatherProvider>,
    inner: Arc<Mutex<Inner>>,
}

impl SearchController {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider, inner: Arc::new(Mutex::new(Inner::default())) }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.inner.lock().state.clone()
    }

    /// Bind the input text without submitting it.
    pub fn set_query(&self, text: &str) {
        self.inner.lock().state.query = text.to_string();
    }

    /// Submit whatever is currently in the input.
    pub async fn submit_query(&self) -> SubmitOutcome {
        let query = self.inner.lock().state.query.clone();
        self.submit(&query).await
    }

    /// Validate `raw_input`, look it up and record the outcome.
    pub async fn submit(&self, raw_input: &str) -> SubmitOutcome {
        let place_name = raw_input.trim();

        let tag = {
            let mut inner = self.inner.lock();
            inner.state.query = raw_input.to_string();
            inner.latest_tag += 1;

            if place_name.is_empty() {
                debug!("rejected empty place name");
                inner.state.is_loading = false;
                inner.state.outcome = Outcome::Error(ValidationError::EmptyPlaceName.to_string());
                return SubmitOutcome::Invalid(ValidationError::EmptyPlaceName);
            }

            inner.state.is_loading = true;
            if matches!(inner.state.outcome, Outcome::Error(_)) {
                inner.state.outcome = Outcome::Nothing;
            }
            inner.latest_tag
        };

        let mut loading = LoadingGuard { inner: &self.inner, tag, settled: false };

        debug!(tag, place_name, "lookup started");
        let fetched = self.provider.fetch_weather(place_name).await;

        let outcome = self.apply(tag, fetched);
        loading.settled = true;
        outcome
    }

    fn apply(&self, tag: u64, fetched: Result<WeatherResult, FetchError>) -> SubmitOutcome {
        let mut inner = self.inner.lock();

        if inner.latest_tag != tag {
            debug!(tag, latest = inner.latest_tag, "discarding stale lookup");
            return SubmitOutcome::Superseded;
        }

        inner.state.is_loading = false;
        inner.state.outcome = match fetched {
            Ok(result) => Outcome::Weather(result),
            Err(err) => Outcome::Error(err.user_message().to_string()),
        };

        SubmitOutcome::Applied
    }
}

/// Clears the loading flag when a submit future is dropped before its lookup
/// settles, unless a newer lookup has taken over. Settled lookups clear it in
/// [`SearchController::apply`], under the same lock as the outcome.
struct LoadingGuard<'a> {
    inner: &'a Mutex<Inner>,
    tag: u64,
    settled: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = self.inner.lock();
        if inner.latest_tag == self.tag {
            inner.state.is_loading = false;
        }
    }
}
