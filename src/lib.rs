//! # formwire
//!
//! **Formwire** is a lightweight form-submission handling library for Rust.
//!
//! It discovers forms in a document, intercepts their submission, sends
//! the serialized field values through an async transport, and renders
//! field-level validation errors returned by the server back onto the
//! page. The crate is independent of any concrete UI binding or HTTP
//! client: pages are reached through the [`Document`] trait and the
//! network through the [`Transport`] trait.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//!     │FormDescriptor │   │FormDescriptor │   │FormDescriptor │
//!     │  (form #1)    │   │  (form #2)    │   │  (form #3)    │
//!     └──────┬────────┘   └──────┬────────┘   └──────┬────────┘
//!            ▼                   ▼                   ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Registry (page orchestrator)                                     │
//! │  - Bus (broadcast events)                                         │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! │  - controllers keyed by resource name                             │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//!  │FormController│  │FormController│  │FormController│
//!  │(submit cycle)│  │(submit cycle)│  │(submit cycle)│
//!  └┬─────────────┘  └┬─────────────┘  └┬─────────────┘
//!   │ Publishes       │ Publishes       │ Publishes
//!   │ - SubmitStarted │ - SubmitFailed  │ - SubmitSucceeded
//!   │ - ErrorsRendered│ - ErrorsCleared │ - FieldsReset
//!   ▼                 ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                          event listener (in Registry)
//!                                   ▼
//!                             SubscriberSet
//!                        ┌─────────┼─────────┐
//!                        ▼         ▼         ▼
//!                     sub1.on   sub2.on   subN.on
//!                     _event()  _event()  _event()
//! ```
//!
//! ### Submit cycle
//! ```text
//! Registry::submit(name) ──► FormController::submit()
//!
//! ├─► state: Idle ─► Submitting
//! ├─► publish SubmitStarted, run before_submit hook
//! ├─► FieldMap::build(fields, redirections)
//! │     (redirected fields submit under their target id, never twice)
//! ├─► Transport::send(Request { method, url, fields })
//! │       │
//! │       ├─ 2xx ──► Succeeded: on_success hook,
//! │       │          clear annotations, reset fields
//! │       ├─ non-2xx ──► Failed: on_error hook,
//! │       │          ErrorPayload::extract → ErrorRenderer::render
//! │       └─ Err ──► Failed: on_error hook,
//! │                  render empty payload (clears stale markup)
//! └─► state settles back to Idle
//! ```
//!
//! Overlapping submissions on one form are **not** serialized; their
//! responses may interleave. Callers that need ordering must await each
//! cycle before starting the next.
//!
//! ## Features
//! | Area              | Description                                                         | Key types / traits                        |
//! |-------------------|---------------------------------------------------------------------|-------------------------------------------|
//! | **Page seam**     | Plug in a real DOM, a renderer, or the built-in in-memory model.    | [`Document`], [`MemoryDom`]               |
//! | **Naming**        | Explicit grammar from element ids to resource names.                | [`NameScheme`]                            |
//! | **Fields**        | Redirection detection/overrides and the per-cycle field map.        | [`RedirectMap`], [`FieldMap`]             |
//! | **Rendering**     | Clear-then-render validation markup, preset or patched styles.      | [`ErrorRenderer`], [`ErrorStyle`]         |
//! | **Dispatch**      | Async transport seam and a closure-backed stub.                     | [`Transport`], [`TransportFn`]            |
//! | **Hooks**         | Per-form lifecycle callbacks.                                       | [`Hooks`]                                 |
//! | **Subscriber API**| Observe the whole page's lifecycle events.                          | [`Subscribe`], [`Event`]                  |
//! | **Errors**        | Typed errors for registry misuse and dead transports.               | [`RegistryError`], [`TransportError`]     |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use formwire::{Document, FieldModel, FormModel, MemoryDom, Registry, Response, TransportFn};
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // A page with one scaffold-style form.
//!     let dom = Arc::new(MemoryDom::new());
//!     dom.insert(
//!         FormModel::new("new_client")
//!             .action("/clients")
//!             .field(FieldModel::new("client_firstname")),
//!     );
//!
//!     // A transport that rejects empty first names.
//!     let transport = TransportFn::arc(|req| async move {
//!         if req.field("client_firstname") == Some("") {
//!             Ok(Response::unprocessable(
//!                 serde_json::json!({"firstname": ["Can't be blank!"]}),
//!             ))
//!         } else {
//!             Ok(Response::ok(serde_json::json!({"id": 1})))
//!         }
//!     });
//!
//!     let registry = Registry::builder(dom.clone(), transport).build();
//!     registry.discover().await;
//!     registry.initialize().await?;
//!
//!     // Empty value: the server's validation payload lands on the page.
//!     registry.submit("client").await?;
//!     assert_eq!(dom.messages("client_firstname"), vec!["Can't be blank!"]);
//!
//!     // Fixed value: annotations are cleared and the form is reset.
//!     dom.set_value("client_firstname", "Ada");
//!     registry.submit("client").await?;
//!     assert!(dom.messages("client_firstname").is_empty());
//!
//!     registry.close();
//!     Ok(())
//! }
//! ```

mod config;
mod dom;
mod error;
mod events;
mod fields;
mod form;
mod hooks;
mod naming;
mod page;
mod render;
mod submit;
mod subscribers;

// ---- Public re-exports ----

pub use config::{Config, FormOverrides, StyleOverride};
pub use dom::{Document, DocumentRef, FieldModel, FieldNode, FormModel, FormNode, MemoryDom};
pub use error::{RegistryError, TransportError};
pub use events::{Bus, Event, EventKind};
pub use fields::{FieldMap, RedirectMap};
pub use form::{FormController, FormDescriptor, SubmitInput, SubmitOutcome, SubmitState};
pub use hooks::{Hooks, HooksRef, NoopHooks};
pub use naming::NameScheme;
pub use page::{Registry, RegistryBuilder};
pub use render::{ErrorRenderer, ErrorStyle, StylePatch, StylePreset};
pub use submit::{ErrorPayload, Method, Request, Response, Transport, TransportFn, TransportRef};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
