//! # Function-backed transport (`TransportFn`)
//!
//! [`TransportFn`] wraps a closure `F: Fn(Request) -> Fut`, producing a
//! fresh future per dispatch. This avoids shared mutable state; if a stub
//! needs to count calls or flip behavior between submissions, hold an
//! `Arc<...>` explicitly inside the closure.
//!
//! ## Example
//! ```rust
//! use formwire::{Request, Response, TransportFn, TransportRef};
//!
//! let t: TransportRef = TransportFn::arc(|req: Request| async move {
//!     assert_eq!(req.url, "/clients");
//!     Ok(Response::ok(serde_json::json!({"id": 7})))
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::submit::request::{Request, Response};
use crate::submit::transport::Transport;

/// Function-backed transport implementation.
///
/// Wraps a closure that *creates* a new future per dispatch.
pub struct TransportFn<F> {
    f: F,
}

impl<F> TransportFn<F> {
    /// Creates a new function-backed transport.
    ///
    /// Prefer [`TransportFn::arc`] when you immediately need a
    /// [`TransportRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the transport and returns it as a shared handle
    /// (`Arc<dyn Transport>`).
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Transport for TransportFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, TransportError>> + Send + 'static,
{
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        (self.f)(request).await
    }
}
