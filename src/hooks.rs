//! # Per-form lifecycle hooks.
//!
//! [`Hooks`] is the extension point for application code that wants to act
//! on one form's submission cycle: tweak the page before dispatch, close a
//! modal on success, surface a flash message on error. All methods default
//! to no-ops, so implementors override only what they need.
//!
//! Hooks are per-form: the registry installs [`NoopHooks`] by default and
//! `FormOverrides` swaps in custom ones. For page-wide observation of
//! *every* form, subscribe to the event bus instead
//! ([`Subscribe`](crate::Subscribe)).
//!
//! # Example
//! ```
//! use async_trait::async_trait;
//! use formwire::{Hooks, Response};
//!
//! struct CloseModal;
//!
//! #[async_trait]
//! impl Hooks for CloseModal {
//!     async fn on_success(&self, form: &str, _response: &Response) {
//!         println!("{form} saved, closing modal");
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::submit::Response;

/// Shared handle to a form's hooks.
pub type HooksRef = Arc<dyn Hooks>;

/// Contract for per-form lifecycle callbacks.
///
/// Called inline on the submitting task; implementations should stay
/// short and must not assume any particular UI event type — they receive
/// the form's resource name and the raw response instead.
#[async_trait]
pub trait Hooks: Send + Sync + 'static {
    /// Runs after the submit cycle started, before the request is built
    /// and dispatched.
    async fn before_submit(&self, form: &str) {
        let _ = form;
    }

    /// Runs when the server accepted the submission, before annotations
    /// are cleared and fields reset.
    async fn on_success(&self, form: &str, response: &Response) {
        let _ = (form, response);
    }

    /// Runs when the submission was rejected or never got a response,
    /// before the rendering pass.
    ///
    /// `response` is `None` for transport failures; `reason` is a short
    /// human-readable description either way.
    async fn on_error(&self, form: &str, response: Option<&Response>, reason: &str) {
        let _ = (form, response, reason);
    }
}

/// The default hooks: every callback is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

#[async_trait]
impl Hooks for NoopHooks {}
