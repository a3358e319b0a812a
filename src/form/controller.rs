//! # FormController: single-form submission supervisor.
//!
//! Supervises one managed form through its submit cycles:
//! - serializes the current field values per the resolved field map,
//! - dispatches the request through the shared [`Transport`],
//! - routes the response: success → clear-and-reset, failure → rendering,
//! - invokes the form's [`Hooks`] and publishes lifecycle events.
//!
//! ## Event flow
//! For each cycle, the controller publishes:
//! ```text
//! SubmitStarted → [dispatch] → SubmitSucceeded → ErrorsCleared → FieldsReset
//!                            → SubmitFailed → ErrorsRendered
//! ```
//!
//! ## Rules
//! - One cycle per `submit` call; there are **no retries**.
//! - Overlapping cycles on one form are **not serialized**: a second
//!   `submit` may start while the first response is outstanding, and the
//!   responses may interleave. Callers that need ordering must wait for
//!   each cycle to finish.
//! - Every failure path ends in a rendering pass; a transport failure
//!   renders the empty payload, clearing stale annotations.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::config::Config;
use crate::dom::DocumentRef;
use crate::error::TransportError;
use crate::events::{Bus, Event, EventKind};
use crate::fields::{FieldMap, RedirectMap};
use crate::form::descriptor::FormDescriptor;
use crate::form::state::{SubmitInput, SubmitState};
use crate::render::ErrorRenderer;
use crate::submit::{ErrorPayload, Method, Request, Response, TransportRef};

/// Result of one submit cycle.
///
/// All three variants are normal outcomes: the controller has already run
/// hooks and rendering by the time it returns.
#[derive(Clone, Debug)]
pub enum SubmitOutcome {
    /// The server accepted the submission; annotations were cleared and
    /// fields reset.
    Accepted(Response),
    /// The server rejected the submission; the payload was rendered.
    Rejected {
        /// The raw response.
        response: Response,
        /// The extracted validation payload.
        payload: ErrorPayload,
    },
    /// No response was obtained; stale annotations were cleared.
    Failed(TransportError),
}

impl SubmitOutcome {
    /// True for [`SubmitOutcome::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// Supervises submission cycles of a single managed form.
pub struct FormController {
    descriptor: FormDescriptor,
    doc: DocumentRef,
    transport: TransportRef,
    bus: Bus,
    default_method: Method,
    renderer: ErrorRenderer,
    /// Explicit redirections accumulated over the controller's lifetime.
    explicit: Mutex<BTreeMap<String, String>>,
    /// Currently resolved redirections (auto-detected + explicit).
    redirects: Mutex<RedirectMap>,
    state: Mutex<SubmitState>,
}

impl FormController {
    /// Creates a controller and resolves the initial redirections
    /// (auto-detected markers merged with the descriptor's explicit
    /// overrides; detection seeds empty target values).
    pub fn new(
        descriptor: FormDescriptor,
        doc: DocumentRef,
        transport: TransportRef,
        bus: Bus,
        cfg: &Config,
    ) -> Self {
        let renderer = ErrorRenderer::new(
            descriptor.resource(),
            cfg.naming.clone(),
            descriptor.style().clone(),
        );
        let explicit = descriptor.redirects().clone();
        let mut redirects = RedirectMap::detect(doc.as_ref(), descriptor.element_id());
        redirects.merge(explicit.iter().map(|(s, t)| (s.clone(), t.clone())));

        Self {
            descriptor,
            doc,
            transport,
            bus,
            default_method: cfg.default_method,
            renderer,
            explicit: Mutex::new(explicit),
            redirects: Mutex::new(redirects),
            state: Mutex::new(SubmitState::Idle),
        }
    }

    /// The form's descriptor.
    pub fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    /// The form's resource name.
    pub fn resource(&self) -> &str {
        self.descriptor.resource()
    }

    /// Current submission state.
    pub fn state(&self) -> SubmitState {
        *self.state.lock().expect("state lock poisoned")
    }

    /// Snapshot of the currently resolved redirections.
    pub fn redirections(&self) -> RedirectMap {
        self.redirects.lock().expect("redirect lock poisoned").clone()
    }

    /// Rebuilds the redirections: markers are re-detected (seeding empty
    /// target values again) and the given settings are merged on top of
    /// all explicit redirections seen so far. Publishes
    /// [`EventKind::RedirectionsApplied`].
    pub fn apply_redirections(&self, settings: impl IntoIterator<Item = (String, String)>) {
        let mut explicit = self.explicit.lock().expect("redirect lock poisoned");
        explicit.extend(settings);

        let mut rebuilt = RedirectMap::detect(self.doc.as_ref(), self.descriptor.element_id());
        rebuilt.merge(explicit.iter().map(|(s, t)| (s.clone(), t.clone())));
        let count = rebuilt.len() as u32;
        *self.redirects.lock().expect("redirect lock poisoned") = rebuilt;

        self.bus.publish(
            Event::now(EventKind::RedirectionsApplied)
                .with_form(self.descriptor.resource())
                .with_count(count),
        );
    }

    /// Runs one submit cycle to completion.
    ///
    /// See the module docs for the event flow and the overlap caveat. The
    /// returned outcome reports what already happened; there is nothing
    /// left for the caller to route.
    pub async fn submit(&self) -> SubmitOutcome {
        self.transition(SubmitInput::Submit);
        self.bus
            .publish(Event::now(EventKind::SubmitStarted).with_form(self.resource()));
        self.descriptor.hooks().before_submit(self.resource()).await;

        let map = self.field_map();
        let request = self.build_request(&map);
        let result = self.transport.send(request).await;

        let outcome = match result {
            Ok(response) if response.is_success() => self.handle_success(&map, response).await,
            Ok(response) => self.handle_rejection(&map, response).await,
            Err(error) => self.handle_transport_failure(&map, error).await,
        };
        self.settle();
        outcome
    }

    /// Resolves the field map for the current cycle.
    fn field_map(&self) -> FieldMap {
        let redirects = self.redirects.lock().expect("redirect lock poisoned");
        FieldMap::build(
            &self.doc.fields(self.descriptor.element_id()),
            &redirects,
        )
    }

    /// Serializes the current field values into a request.
    ///
    /// Redirected fields submit under their target identifier; the map
    /// guarantees no identifier appears twice.
    fn build_request(&self, map: &FieldMap) -> Request {
        let fields = map
            .iter()
            .map(|(_, effective)| {
                let value = self.doc.value(effective).unwrap_or_default();
                (effective.to_string(), value)
            })
            .collect();

        let method = self
            .doc
            .method_override(self.descriptor.element_id())
            .as_deref()
            .and_then(Method::parse)
            .unwrap_or(self.default_method);

        Request {
            method,
            url: self.descriptor.action().to_string(),
            fields,
        }
    }

    async fn handle_success(&self, map: &FieldMap, response: Response) -> SubmitOutcome {
        self.transition(SubmitInput::Response(true));
        self.bus.publish(
            Event::now(EventKind::SubmitSucceeded)
                .with_form(self.resource())
                .with_status(response.status),
        );
        self.descriptor
            .hooks()
            .on_success(self.resource(), &response)
            .await;

        self.renderer.clear_all(self.doc.as_ref(), map);
        self.bus
            .publish(Event::now(EventKind::ErrorsCleared).with_form(self.resource()));

        self.doc.reset_fields(self.descriptor.element_id());
        self.bus
            .publish(Event::now(EventKind::FieldsReset).with_form(self.resource()));

        SubmitOutcome::Accepted(response)
    }

    async fn handle_rejection(&self, map: &FieldMap, response: Response) -> SubmitOutcome {
        self.transition(SubmitInput::Response(false));
        let reason = format!("validation failed ({})", response.status);
        self.bus.publish(
            Event::now(EventKind::SubmitFailed)
                .with_form(self.resource())
                .with_status(response.status)
                .with_reason(reason.clone()),
        );
        self.descriptor
            .hooks()
            .on_error(self.resource(), Some(&response), &reason)
            .await;

        let payload = ErrorPayload::extract(&response.body, self.resource());
        let annotated = self.renderer.render(self.doc.as_ref(), map, &payload);
        self.bus.publish(
            Event::now(EventKind::ErrorsRendered)
                .with_form(self.resource())
                .with_count(annotated as u32),
        );

        SubmitOutcome::Rejected { response, payload }
    }

    async fn handle_transport_failure(
        &self,
        map: &FieldMap,
        error: TransportError,
    ) -> SubmitOutcome {
        self.transition(SubmitInput::Response(false));
        self.bus.publish(
            Event::now(EventKind::SubmitFailed)
                .with_form(self.resource())
                .with_reason(error.as_message()),
        );
        self.descriptor
            .hooks()
            .on_error(self.resource(), None, &error.as_message())
            .await;

        // The rendering pass still runs: stale annotations from a previous
        // rejection must not survive a dead submission.
        let annotated = self
            .renderer
            .render(self.doc.as_ref(), map, &ErrorPayload::empty());
        self.bus.publish(
            Event::now(EventKind::ErrorsRendered)
                .with_form(self.resource())
                .with_count(annotated as u32),
        );

        SubmitOutcome::Failed(error)
    }

    fn transition(&self, input: SubmitInput) {
        let mut state = self.state.lock().expect("state lock poisoned");
        *state = state.on(input);
    }

    fn settle(&self) {
        let mut state = self.state.lock().expect("state lock poisoned");
        *state = state.settle();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::dom::{Document, FieldModel, FormModel, MemoryDom};
    use crate::submit::TransportFn;

    fn client_dom() -> Arc<MemoryDom> {
        let dom = MemoryDom::new();
        dom.insert(
            FormModel::new("new_client")
                .action("/clients")
                .field(FieldModel::new("client_firstname"))
                .field(FieldModel::new("client_lastname")),
        );
        Arc::new(dom)
    }

    fn controller(dom: Arc<MemoryDom>, transport: TransportRef) -> FormController {
        let cfg = Config::default();
        let descriptor = FormDescriptor::new("new_client", "client", "/clients", &cfg);
        FormController::new(descriptor, dom, transport, Bus::new(16), &cfg)
    }

    fn rejecting(body: serde_json::Value) -> TransportRef {
        TransportFn::arc(move |_req| {
            let body = body.clone();
            async move { Ok(Response::unprocessable(body)) }
        })
    }

    #[tokio::test]
    async fn test_failure_annotates_exactly_the_named_field() {
        let dom = client_dom();
        let ctrl = controller(
            dom.clone(),
            rejecting(json!({"firstname": ["Can't be blank!"]})),
        );

        let outcome = ctrl.submit().await;
        assert!(!outcome.is_accepted());
        assert_eq!(dom.wrapper_classes("client_firstname"), vec!["error-field"]);
        assert_eq!(dom.messages("client_firstname"), vec!["Can't be blank!"]);
        assert!(dom.wrapper_classes("client_lastname").is_empty());
        assert_eq!(ctrl.state(), SubmitState::Idle);
    }

    #[tokio::test]
    async fn test_success_clears_errors_and_resets_fields() {
        let dom = client_dom();
        let fail = controller(
            dom.clone(),
            rejecting(json!({"firstname": ["Can't be blank!"]})),
        );
        fail.submit().await;
        assert!(dom.any_marked("error-field"));

        dom.set_value("client_firstname", "Ada");
        let ok = controller(
            dom.clone(),
            TransportFn::arc(|_req| async { Ok(Response::ok(json!({"id": 1}))) }),
        );
        let outcome = ok.submit().await;
        assert!(outcome.is_accepted());
        assert!(!dom.any_marked("error-field"));
        assert!(dom.messages("client_firstname").is_empty());
        assert_eq!(dom.value("client_firstname").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_sequential_failures_leave_only_second_payload() {
        let dom = client_dom();
        let first = controller(
            dom.clone(),
            rejecting(json!({"firstname": ["Can't be blank!"]})),
        );
        first.submit().await;

        let second = controller(
            dom.clone(),
            rejecting(json!({"lastname": ["Already exists!"]})),
        );
        second.submit().await;

        assert!(dom.wrapper_classes("client_firstname").is_empty());
        assert!(dom.messages("client_firstname").is_empty());
        assert_eq!(dom.wrapper_classes("client_lastname"), vec!["error-field"]);
        assert_eq!(dom.messages("client_lastname"), vec!["Already exists!"]);
    }

    #[tokio::test]
    async fn test_transport_failure_clears_stale_annotations() {
        let dom = client_dom();
        let fail = controller(
            dom.clone(),
            rejecting(json!({"firstname": ["Can't be blank!"]})),
        );
        fail.submit().await;
        assert!(dom.any_marked("error-field"));

        let dead = controller(
            dom.clone(),
            TransportFn::arc(|_req| async {
                Err(TransportError::Network {
                    reason: "refused".into(),
                })
            }),
        );
        let outcome = dead.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(!dom.any_marked("error-field"));
    }

    #[tokio::test]
    async fn test_request_carries_values_method_and_action() {
        let dom = MemoryDom::new();
        dom.insert(
            FormModel::new("edit_client_42")
                .action("/clients/42")
                .method_override("put")
                .field(FieldModel::new("client_firstname").value("Ada")),
        );
        let dom = Arc::new(dom);

        let seen: Arc<Mutex<Vec<Request>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let transport = TransportFn::arc(move |req| {
            sink.lock().unwrap().push(req);
            async { Ok(Response::ok(json!(null))) }
        });

        let cfg = Config::default();
        let descriptor = FormDescriptor::new("edit_client_42", "client", "/clients/42", &cfg);
        let ctrl = FormController::new(descriptor, dom, transport, Bus::new(16), &cfg);
        ctrl.submit().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, Method::Put);
        assert_eq!(seen[0].url, "/clients/42");
        assert_eq!(seen[0].field("client_firstname"), Some("Ada"));
    }

    #[tokio::test]
    async fn test_redirected_field_submits_under_target_once() {
        let dom = MemoryDom::new();
        dom.insert(
            FormModel::new("edit_client_42")
                .action("/clients/42")
                .field(
                    FieldModel::new("client_date_of_birth")
                        .value("1990-01-01")
                        .redirect("date_show"),
                )
                .field(FieldModel::new("date_show")),
        );
        let dom = Arc::new(dom);

        let seen: Arc<Mutex<Vec<Request>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let transport = TransportFn::arc(move |req| {
            sink.lock().unwrap().push(req);
            async { Ok(Response::ok(json!(null))) }
        });

        let cfg = Config::default();
        let descriptor = FormDescriptor::new("edit_client_42", "client", "/clients/42", &cfg);
        let ctrl = FormController::new(descriptor, dom, transport, Bus::new(16), &cfg);
        ctrl.submit().await;

        let seen = seen.lock().unwrap();
        // Detection seeded the display field from the hidden value; the pair
        // submits once, under the target identifier.
        assert_eq!(seen[0].fields, vec![("date_show".to_string(), "1990-01-01".to_string())]);
    }

    #[tokio::test]
    async fn test_apply_redirections_takes_effect_on_next_cycle() {
        let dom = MemoryDom::new();
        dom.insert(
            FormModel::new("new_client")
                .action("/clients")
                .field(FieldModel::new("client_color").value("red"))
                .field(FieldModel::new("color_show")),
        );
        let dom = Arc::new(dom);

        let seen: Arc<Mutex<Vec<Request>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let transport = TransportFn::arc(move |req| {
            sink.lock().unwrap().push(req);
            async { Ok(Response::ok(json!(null))) }
        });

        let cfg = Config::default();
        let descriptor = FormDescriptor::new("new_client", "client", "/clients", &cfg);
        let ctrl = FormController::new(descriptor, dom, transport, Bus::new(16), &cfg);

        ctrl.apply_redirections([("client_color".to_string(), "color_show".to_string())]);
        assert_eq!(ctrl.redirections().target("client_color"), Some("color_show"));

        ctrl.submit().await;
        let seen = seen.lock().unwrap();
        assert_eq!(
            seen[0].fields,
            vec![("color_show".to_string(), "red".to_string())]
        );
    }
}
