//! Submission plumbing: request/response shapes, the transport seam, and
//! server error payload extraction.

mod payload;
mod request;
mod transport;
mod transport_fn;

pub use payload::ErrorPayload;
pub use request::{Method, Request, Response};
pub use transport::{Transport, TransportRef};
pub use transport_fn::TransportFn;
