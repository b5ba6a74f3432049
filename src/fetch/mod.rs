//! Loading/success/error state machine wrapping one remote read.
//!
//! A [`FetchController`] owns the state of a single fetch slot. Issuing a
//! request moves the slot to [`FetchState::Loading`] and hands back a
//! [`PendingFetch`], the in-flight remote call. The owner awaits it (or
//! hands it to its runtime) and feeds the resulting [`FetchCompletion`] back
//! through [`FetchController::complete`].
//!
//! Requests are never cancelled. When several are in flight the completion
//! applied last decides the final state, regardless of issue order.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::CatalogError;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

mod keys;

pub use keys::{FetchKey, FetchPayload};

/// Boxed future performing one remote read.
pub type LoadFuture<T> = Pin<Box<dyn Future<Output = Result<T, CatalogError>> + Send>>;

/// State of a fetch slot.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request has been issued and no completion has been applied since.
    Loading,
    /// The last applied completion succeeded.
    Success(T),
    /// The last applied completion failed.
    Failure(CatalogError),
}

impl<T> FetchState<T> {
    /// Returns the payload when the state is [`FetchState::Success`].
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        match self {
            Self::Success(payload) => Some(payload),
            _ => None,
        }
    }

    /// Returns the error when the state is [`FetchState::Failure`].
    #[must_use]
    pub const fn error(&self) -> Option<&CatalogError> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }

    /// Returns `true` while a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// An issued remote read that has not completed yet.
#[must_use = "a pending fetch does nothing until it is awaited"]
pub struct PendingFetch<K, T> {
    key: K,
    started: Instant,
    load: LoadFuture<T>,
}

impl<K, T> PendingFetch<K, T> {
    /// Key the request was issued with.
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Waits for the remote call and packages its outcome.
    pub async fn resolve(self) -> FetchCompletion<K, T> {
        let outcome = self.load.await;
        FetchCompletion {
            key: self.key,
            outcome,
            latency: self.started.elapsed(),
        }
    }
}

impl<K: fmt::Debug, T> fmt::Debug for PendingFetch<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFetch")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Outcome of a [`PendingFetch`], ready to be applied to its controller.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCompletion<K, T> {
    /// Key the request was issued with.
    pub key: K,
    /// Payload or error returned by the remote call.
    pub outcome: Result<T, CatalogError>,
    /// Time between issue and completion.
    pub latency: Duration,
}

impl<K, T> FetchCompletion<K, T> {
    /// Builds a completion directly, without a remote call.
    pub const fn new(key: K, outcome: Result<T, CatalogError>) -> Self {
        Self {
            key,
            outcome,
            latency: Duration::ZERO,
        }
    }
}

/// Drives one fetch slot through `Idle → Loading → Success | Failure`.
pub struct FetchController<K, T> {
    component: &'static str,
    state: FetchState<T>,
    last_successful_key: Option<K>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<K, T> FetchController<K, T>
where
    K: FetchKey,
    T: FetchPayload + Send + 'static,
{
    /// Creates an idle controller. `component` names the owner in logs and
    /// telemetry.
    #[must_use]
    pub fn new(component: &'static str, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            component,
            state: FetchState::Idle,
            last_successful_key: None,
            telemetry,
        }
    }

    /// Issues a remote read for `key`.
    ///
    /// Returns `None` and leaves the state untouched when the key is unset;
    /// `load` is not called in that case. Otherwise the state becomes
    /// [`FetchState::Loading`] and `load` is invoked exactly once.
    pub fn request<F, Fut>(&mut self, key: &K, load: F) -> Option<PendingFetch<K, T>>
    where
        F: FnOnce(K) -> Fut,
        Fut: Future<Output = Result<T, CatalogError>> + Send + 'static,
    {
        if key.is_unset() {
            tracing::debug!(component = self.component, "skipping fetch for unset key");
            return None;
        }

        self.state = FetchState::Loading;
        tracing::debug!(component = self.component, ?key, "fetch started");
        self.telemetry.record(TelemetryEvent::FetchStarted {
            component: self.component.to_owned(),
        });

        Some(PendingFetch {
            key: key.clone(),
            started: Instant::now(),
            load: Box::pin(load(key.clone())),
        })
    }

    /// Re-issues the last successful request with the same key.
    ///
    /// Returns `None` when no request has succeeded yet.
    pub fn refresh<F, Fut>(&mut self, load: F) -> Option<PendingFetch<K, T>>
    where
        F: FnOnce(K) -> Fut,
        Fut: Future<Output = Result<T, CatalogError>> + Send + 'static,
    {
        let key = self.last_successful_key.clone()?;
        self.request(&key, load)
    }

    /// Applies a completion, moving to exactly one of `Success` or `Failure`.
    pub fn complete(&mut self, completion: FetchCompletion<K, T>) -> &FetchState<T> {
        let FetchCompletion {
            key,
            outcome,
            latency,
        } = completion;
        let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok(payload) => {
                tracing::debug!(
                    component = self.component,
                    ?key,
                    latency_ms,
                    items = payload.item_count(),
                    "fetch succeeded"
                );
                self.telemetry.record(TelemetryEvent::FetchSucceeded {
                    component: self.component.to_owned(),
                    latency_ms,
                    item_count: payload.item_count(),
                });
                self.last_successful_key = Some(key);
                self.state = FetchState::Success(payload);
            }
            Err(error) => {
                tracing::warn!(component = self.component, ?key, "fetch failed: {error}");
                self.telemetry.record(TelemetryEvent::FetchFailed {
                    component: self.component.to_owned(),
                    latency_ms,
                    message: error.message().to_owned(),
                });
                self.state = FetchState::Failure(error);
            }
        }

        &self.state
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Returns `true` while a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Payload of the last successful completion, if that is the current
    /// state.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        self.state.payload()
    }

    /// Error of the last failed completion, if that is the current state.
    #[must_use]
    pub const fn error(&self) -> Option<&CatalogError> {
        self.state.error()
    }

    /// Key of the most recent successful completion.
    #[must_use]
    pub const fn last_successful_key(&self) -> Option<&K> {
        self.last_successful_key.as_ref()
    }
}
