//! # Transport abstraction.
//!
//! This module defines the [`Transport`] trait, the seam between a form
//! controller and the network. The common handle type is [`TransportRef`],
//! an `Arc<dyn Transport>` shared by every controller of a registry.
//!
//! A transport receives one [`Request`] and either returns a [`Response`]
//! (any status — validation rejections are still responses) or a
//! [`TransportError`] when no response could be obtained. The library
//! exposes no cancellation or timeout primitive: a request left
//! outstanding is never cancelled from here.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::submit::request::{Request, Response};

/// Shared handle to a transport.
pub type TransportRef = Arc<dyn Transport>;

/// # Asynchronous submission dispatcher.
///
/// Implementations wrap an HTTP client, a test stub, or anything that can
/// turn a request into a JSON response.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use formwire::{Request, Response, Transport, TransportError};
///
/// struct AlwaysCreated;
///
/// #[async_trait]
/// impl Transport for AlwaysCreated {
///     async fn send(&self, _req: Request) -> Result<Response, TransportError> {
///         Ok(Response { status: 201, body: serde_json::json!({"id": 1}) })
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Dispatches one submission and waits for its response.
    ///
    /// Return `Ok` for any response the server produced, whatever the
    /// status; return `Err` only when no response exists at all.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}
