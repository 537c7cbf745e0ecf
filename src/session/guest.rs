//! Guest sessions and their storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::HttpBackend;
use crate::widget::WidgetState;

/// Default idle timeout (30 minutes).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// An anonymous visitor, identified by the `guest_uuid` cookie.
///
/// Guests carry the question/answer history the backend uses to build
/// prompts, and the rendered state of the browser widget.
#[derive(Debug, Clone)]
pub struct Guest {
    inner: Arc<GuestInner>,
}

#[derive(Debug)]
struct GuestInner {
    id: String,
    exchanges: RwLock<Vec<Exchange>>,
    widget: RwLock<WidgetState>,
    remote: Mutex<Option<Arc<HttpBackend>>>,
    created_at: DateTime<Utc>,
    last_activity: RwLock<DateTime<Utc>>,
}

impl Guest {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(GuestInner {
                id,
                exchanges: RwLock::new(Vec::new()),
                widget: RwLock::new(WidgetState::default()),
                remote: Mutex::new(None),
                created_at: now,
                last_activity: RwLock::new(now),
            }),
        }
    }

    /// Get the guest ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Record an answered question.
    pub fn record_exchange(&self, question: impl Into<String>, answer: impl Into<String>) {
        let exchange = Exchange {
            question: question.into(),
            answer: answer.into(),
            created_at: Utc::now(),
        };
        self.inner
            .exchanges
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(exchange);
        self.touch();
    }

    /// The `limit` most recent exchanges, oldest first.
    #[must_use]
    pub fn recent_exchanges(&self, limit: usize) -> Vec<Exchange> {
        let guard = self
            .inner
            .exchanges
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let start = guard.len().saturating_sub(limit);
        guard[start..].to_vec()
    }

    #[must_use]
    pub fn exchange_count(&self) -> usize {
        self.inner
            .exchanges
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Snapshot of the browser widget state.
    #[must_use]
    pub fn widget_state(&self) -> WidgetState {
        self.inner
            .widget
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the browser widget state.
    pub fn store_widget_state(&self, state: WidgetState) {
        *self
            .inner
            .widget
            .write()
            .unwrap_or_else(PoisonError::into_inner) = state;
        self.touch();
    }

    /// This guest's remote backend, built by `init` on first use.
    ///
    /// Each guest keeps its own client so the remote server sees one
    /// session per visitor.
    pub fn remote_backend_or_try_init<E>(
        &self,
        init: impl FnOnce() -> Result<HttpBackend, E>,
    ) -> Result<Arc<HttpBackend>, E> {
        let mut slot = self
            .inner
            .remote
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(backend) = slot.as_ref() {
            return Ok(Arc::clone(backend));
        }
        let backend = Arc::new(init()?);
        *slot = Some(Arc::clone(&backend));
        Ok(backend)
    }

    fn touch(&self) {
        *self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Utc::now();
    }

    /// Check if the guest has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        // Negative durations (clock skew) never expire.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }

    /// Time since the guest was created.
    #[must_use]
    pub fn age(&self) -> Duration {
        (Utc::now() - self.inner.created_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Thread-safe store for guests.
#[derive(Debug, Clone)]
pub struct GuestStore {
    inner: Arc<RwLock<HashMap<String, Guest>>>,
}

impl Default for GuestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GuestStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a guest with a fresh UUID.
    #[must_use]
    pub fn create(&self) -> Guest {
        let guest = Guest::new(Uuid::new_v4().to_string());
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(guest.id().to_string(), guest.clone());
        guest
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Guest> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Resolve a cookie value to a guest, creating one when the cookie is
    /// missing or refers to a guest this process does not know.
    #[must_use]
    pub fn resolve(&self, id: Option<&str>) -> Guest {
        id.and_then(|id| self.get(id))
            .unwrap_or_else(|| self.create())
    }

    pub fn remove(&self, id: &str) -> Option<Guest> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove guests idle longer than `timeout`.
    ///
    /// Returns the number of guests removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, guest| !guest.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}
