//! # Lifecycle events published by the registry and its controllers.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Page events**: discovery and configuration (forms found, skipped,
//!   ignored, controllers built);
//! - **Submission events**: one submit cycle from dispatch to rendering;
//! - **Subscriber events**: faults inside the fan-out machinery itself.
//!
//! The [`Event`] struct carries optional metadata such as the form's
//! resource name, a reason string, a response status and a field count.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore exact order when events from
//! overlapping submissions interleave.
//!
//! ## Example
//! ```rust
//! use formwire::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::SubmitFailed)
//!     .with_form("client")
//!     .with_status(422)
//!     .with_reason("validation failed");
//!
//! assert_eq!(ev.kind, EventKind::SubmitFailed);
//! assert_eq!(ev.form.as_deref(), Some("client"));
//! assert_eq!(ev.status, Some(422));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Page events ===
    /// A form with a usable id was discovered and described.
    ///
    /// Sets: `form`, `at`, `seq`.
    FormDiscovered,

    /// A form element could not be managed (missing or unusable id) and
    /// was excluded; discovery continued.
    ///
    /// Sets: `reason`, `at`, `seq`.
    FormSkipped,

    /// A descriptor was configured with `ignore` and no controller was
    /// built for it.
    ///
    /// Sets: `form`, `at`, `seq`.
    FormIgnored,

    /// A controller was built and is accepting submissions.
    ///
    /// Sets: `form`, `at`, `seq`.
    ControllerReady,

    /// `configure` arrived after the controller was already built and had
    /// no effect.
    ///
    /// Sets: `form`, `at`, `seq`.
    ConfigRejected,

    /// Redirection settings were rebuilt on a live controller.
    ///
    /// Sets: `form`, `count` (redirections now registered), `at`, `seq`.
    RedirectionsApplied,

    // === Submission events ===
    /// A submit cycle started; the request is about to be dispatched.
    ///
    /// Sets: `form`, `at`, `seq`.
    SubmitStarted,

    /// The server accepted the submission (2xx).
    ///
    /// Sets: `form`, `status`, `at`, `seq`.
    SubmitSucceeded,

    /// The submission was rejected (non-2xx) or produced no response.
    ///
    /// Sets: `form`, `status` (absent for transport failures), `reason`,
    /// `at`, `seq`.
    SubmitFailed,

    /// A rendering pass annotated the page with validation errors.
    ///
    /// Sets: `form`, `count` (annotated fields), `at`, `seq`.
    ErrorsRendered,

    /// All error annotations of the form were removed.
    ///
    /// Sets: `form`, `at`, `seq`.
    ErrorsCleared,

    /// All fields of the form were reset to their defaults.
    ///
    /// Sets: `form`, `at`, `seq`.
    FieldsReset,

    // === Subscriber events ===
    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `form` (subscriber name), `reason`, `at`, `seq`.
    SubscriberOverflow,

    /// Subscriber panicked during event processing.
    ///
    /// Sets: `form` (subscriber name), `reason`, `at`, `seq`.
    SubscriberPanicked,
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Resource name of the form, if applicable (subscriber name for
    /// subscriber events).
    pub form: Option<Arc<str>>,
    /// Human-readable reason (skip causes, failure messages, ...).
    pub reason: Option<Arc<str>>,
    /// Response status, when a response existed.
    pub status: Option<u16>,
    /// A count whose meaning depends on the kind (annotated fields,
    /// registered redirections).
    pub count: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp
    /// and the next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            form: None,
            reason: None,
            status: None,
            count: None,
        }
    }

    /// Attaches a form resource name.
    #[inline]
    pub fn with_form(mut self, form: impl Into<Arc<str>>) -> Self {
        self.form = Some(form.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a response status.
    #[inline]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches a count.
    #[inline]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::now(EventKind::SubscriberOverflow)
            .with_form(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::now(EventKind::SubscriberPanicked)
            .with_form(subscriber)
            .with_reason(info)
    }

    /// True for submission-cycle events.
    #[inline]
    pub fn is_submission(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubmitStarted
                | EventKind::SubmitSucceeded
                | EventKind::SubmitFailed
                | EventKind::ErrorsRendered
                | EventKind::ErrorsCleared
                | EventKind::FieldsReset
        )
    }
}
