//! # Registry: page-wide form management.
//!
//! The [`Registry`] owns the event bus, the subscriber fan-out and the set
//! of form controllers for one document. It is an explicit object owned by
//! the initializing caller — there is no process-wide singleton, and two
//! registries over two documents never share state.
//!
//! ## Lifecycle
//! ```text
//! RegistryBuilder::build()
//!     └─► discover()             scan Document::forms()
//!           ├─► usable id   → FormDescriptor (+ FormDiscovered)
//!           └─► missing id  → reported, skipped (FormSkipped), scan continues
//!     └─► configure(name, ..)    typed overrides, pre-construction only
//!     └─► initialize()           one FormController per non-ignored form
//!           ├─► ignored     → FormIgnored
//!           └─► built       → ControllerReady
//!     └─► submit(name)           drive one submit cycle
//!     └─► apply_redirections(name, ..)   post-construction rebuild
//!     └─► close()                stop listener + subscriber workers
//! ```
//!
//! ## Rules
//! - A form with no usable id is a configuration error of that form only:
//!   it is reported and excluded, discovery continues.
//! - `configure` after `initialize` fails with
//!   [`RegistryError::ControllerExists`]; live controllers are
//!   reconfigured through their own entry points
//!   ([`FormController::apply_redirections`]).
//! - Controllers are keyed by resource name; a later form with the same
//!   resource name replaces the earlier descriptor during discovery.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, FormOverrides};
use crate::dom::DocumentRef;
use crate::error::RegistryError;
use crate::events::{Bus, Event, EventKind};
use crate::form::{FormController, FormDescriptor, SubmitOutcome};
use crate::page::builder::RegistryBuilder;
use crate::submit::TransportRef;
use crate::subscribers::SubscriberSet;

/// Page-wide registry of managed forms.
pub struct Registry {
    cfg: Config,
    doc: DocumentRef,
    transport: TransportRef,
    bus: Bus,
    token: CancellationToken,
    discovered: AtomicBool,
    descriptors: RwLock<BTreeMap<String, FormDescriptor>>,
    controllers: RwLock<BTreeMap<String, Arc<FormController>>>,
}

impl Registry {
    /// Starts a builder over the given document and transport.
    pub fn builder(doc: DocumentRef, transport: TransportRef) -> RegistryBuilder {
        RegistryBuilder::new(doc, transport)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        doc: DocumentRef,
        transport: TransportRef,
        bus: Bus,
        token: CancellationToken,
    ) -> Self {
        Self {
            cfg,
            doc,
            transport,
            bus,
            token,
            discovered: AtomicBool::new(false),
            descriptors: RwLock::new(BTreeMap::new()),
            controllers: RwLock::new(BTreeMap::new()),
        }
    }

    /// Spawns the listener that forwards bus events to the subscriber set.
    ///
    /// The listener owns the set; on cancellation it shuts the workers
    /// down gracefully.
    pub(crate) fn listen(bus: &Bus, set: SubscriberSet, token: CancellationToken) {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(ev) => set.emit(&ev),
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    }
                }
            }
            set.shutdown().await;
        });
    }

    /// The event bus (for ad-hoc `subscribe()` calls in tests or tooling).
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Scans the document for forms and builds descriptors.
    ///
    /// A form element without an id, or whose id resolves to an empty
    /// resource name, is reported ([`EventKind::FormSkipped`] plus a
    /// warning) and excluded; the scan continues. Returns the number of
    /// descriptors now registered.
    pub async fn discover(&self) -> usize {
        let mut descriptors = self.descriptors.write().await;
        for form in self.doc.forms() {
            let Some(id) = form.id.filter(|id| !id.is_empty()) else {
                eprintln!(
                    "[formwire] form with no id cannot be managed; expected \
                     an id like \"form_<resource>\" (action={:?})",
                    form.action
                );
                self.bus.publish(
                    Event::now(EventKind::FormSkipped).with_reason("missing form id"),
                );
                continue;
            };

            let resource = self.cfg.naming.resolve(&id);
            if resource.is_empty() {
                eprintln!("[formwire] form id {id:?} does not resolve to a resource name");
                self.bus.publish(
                    Event::now(EventKind::FormSkipped).with_reason("unresolvable form id"),
                );
                continue;
            }

            let descriptor = FormDescriptor::new(id, resource.clone(), form.action, &self.cfg);
            descriptors.insert(resource.clone(), descriptor);
            self.bus
                .publish(Event::now(EventKind::FormDiscovered).with_form(resource));
        }
        self.discovered.store(true, Ordering::Release);
        descriptors.len()
    }

    /// Merges typed overrides into the named descriptor.
    ///
    /// Must run before [`initialize`](Registry::initialize) built the
    /// form's controller; afterwards it fails with
    /// [`RegistryError::ControllerExists`] and changes nothing.
    pub async fn configure(
        &self,
        name: &str,
        overrides: FormOverrides,
    ) -> Result<(), RegistryError> {
        if self.controllers.read().await.contains_key(name) {
            self.bus
                .publish(Event::now(EventKind::ConfigRejected).with_form(name.to_string()));
            return Err(RegistryError::ControllerExists {
                name: name.to_string(),
            });
        }

        let mut descriptors = self.descriptors.write().await;
        let descriptor = descriptors
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownForm {
                name: name.to_string(),
            })?;
        descriptor.apply(&overrides);
        Ok(())
    }

    /// Builds one controller per non-ignored descriptor.
    ///
    /// Idempotent: descriptors that already have a controller are left
    /// alone. Returns the sorted resource names of all active controllers.
    pub async fn initialize(&self) -> Result<Vec<String>, RegistryError> {
        if !self.discovered.load(Ordering::Acquire) {
            return Err(RegistryError::NothingDiscovered);
        }

        let descriptors = self.descriptors.read().await;
        let mut controllers = self.controllers.write().await;
        for (name, descriptor) in descriptors.iter() {
            if controllers.contains_key(name) {
                continue;
            }
            if descriptor.is_ignored() {
                self.bus
                    .publish(Event::now(EventKind::FormIgnored).with_form(name.clone()));
                continue;
            }

            let controller = Arc::new(FormController::new(
                descriptor.clone(),
                Arc::clone(&self.doc),
                Arc::clone(&self.transport),
                self.bus.clone(),
                &self.cfg,
            ));
            controllers.insert(name.clone(), controller);
            self.bus
                .publish(Event::now(EventKind::ControllerReady).with_form(name.clone()));
        }

        Ok(controllers.keys().cloned().collect())
    }

    /// Returns the controller for the named form, if one is active.
    pub async fn controller(&self, name: &str) -> Option<Arc<FormController>> {
        self.controllers.read().await.get(name).cloned()
    }

    /// Sorted resource names of all active controllers.
    pub async fn active(&self) -> Vec<String> {
        self.controllers.read().await.keys().cloned().collect()
    }

    /// Drives one submit cycle of the named form.
    pub async fn submit(&self, name: &str) -> Result<SubmitOutcome, RegistryError> {
        let controller = self
            .controller(name)
            .await
            .ok_or_else(|| RegistryError::UnknownForm {
                name: name.to_string(),
            })?;
        Ok(controller.submit().await)
    }

    /// Rebuilds the named controller's redirections with the given
    /// settings merged on top (see
    /// [`FormController::apply_redirections`]).
    pub async fn apply_redirections(
        &self,
        name: &str,
        settings: impl IntoIterator<Item = (String, String)>,
    ) -> Result<(), RegistryError> {
        let controller = self
            .controller(name)
            .await
            .ok_or_else(|| RegistryError::UnknownForm {
                name: name.to_string(),
            })?;
        controller.apply_redirections(settings);
        Ok(())
    }

    /// Stops the event listener; the subscriber workers drain their
    /// queues and exit. Controllers stay usable, but events published
    /// after this point reach no subscriber.
    pub fn close(&self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::dom::{Document, FieldModel, FormModel, MemoryDom};
    use crate::error::TransportError;
    use crate::submit::{Response, TransportFn};

    fn page() -> Arc<MemoryDom> {
        let dom = MemoryDom::new();
        dom.insert(
            FormModel::new("new_client")
                .action("/clients")
                .field(FieldModel::new("client_firstname"))
                .field(FieldModel::new("client_lastname")),
        );
        dom.insert(
            FormModel::new("edit_supplier_7")
                .action("/suppliers/7")
                .field(FieldModel::new("supplier_name").value("ACME")),
        );
        dom.insert(FormModel::anonymous().action("/untracked"));
        Arc::new(dom)
    }

    fn accepting() -> TransportRef {
        TransportFn::arc(|_req| async { Ok(Response::ok(json!({"id": 1}))) })
    }

    #[tokio::test]
    async fn test_discover_skips_idless_forms_and_continues() {
        let registry = Registry::builder(page(), accepting()).build();
        let found = registry.discover().await;
        assert_eq!(found, 2);

        let names = registry.initialize().await.unwrap();
        assert_eq!(names, vec!["client".to_string(), "supplier".to_string()]);
    }

    #[tokio::test]
    async fn test_initialize_requires_discovery() {
        let registry = Registry::builder(page(), accepting()).build();
        assert_eq!(
            registry.initialize().await,
            Err(RegistryError::NothingDiscovered)
        );
    }

    #[tokio::test]
    async fn test_ignored_form_gets_no_controller() {
        let registry = Registry::builder(page(), accepting()).build();
        registry.discover().await;
        registry
            .configure("supplier", FormOverrides::new().ignore(true))
            .await
            .unwrap();

        let names = registry.initialize().await.unwrap();
        assert_eq!(names, vec!["client".to_string()]);
        assert!(registry.controller("supplier").await.is_none());
    }

    #[tokio::test]
    async fn test_configure_after_initialize_is_rejected() {
        let registry = Registry::builder(page(), accepting()).build();
        registry.discover().await;
        registry.initialize().await.unwrap();

        let result = registry
            .configure("client", FormOverrides::new().ignore(true))
            .await;
        assert_eq!(
            result,
            Err(RegistryError::ControllerExists {
                name: "client".to_string()
            })
        );
        // The controller survives untouched.
        assert!(registry.controller("client").await.is_some());
    }

    #[tokio::test]
    async fn test_configure_unknown_form_fails() {
        let registry = Registry::builder(page(), accepting()).build();
        registry.discover().await;
        assert_eq!(
            registry.configure("ghost", FormOverrides::new()).await,
            Err(RegistryError::UnknownForm {
                name: "ghost".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_submit_routes_to_named_controller() {
        let dom = page();
        let registry = Registry::builder(dom.clone(), accepting()).build();
        registry.discover().await;
        registry.initialize().await.unwrap();

        let outcome = registry.submit("supplier").await.unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(dom.value("supplier_name").as_deref(), Some("ACME"));

        assert_eq!(
            registry.submit("ghost").await.unwrap_err(),
            RegistryError::UnknownForm {
                name: "ghost".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_sequential_failures_show_only_latest_payload() {
        let dom = page();
        let calls = Arc::new(Mutex::new(0u32));
        let counter = calls.clone();
        let transport = TransportFn::arc(move |_req| {
            let mut calls = counter.lock().unwrap();
            *calls += 1;
            let body = if *calls == 1 {
                json!({"firstname": ["Can't be blank!"]})
            } else {
                json!({"lastname": ["Already exists!"]})
            };
            async move { Ok(Response::unprocessable(body)) }
        });

        let registry = Registry::builder(dom.clone(), transport).build();
        registry.discover().await;
        registry.initialize().await.unwrap();

        registry.submit("client").await.unwrap();
        assert_eq!(dom.messages("client_firstname"), vec!["Can't be blank!"]);

        registry.submit("client").await.unwrap();
        assert!(dom.messages("client_firstname").is_empty());
        assert!(dom.wrapper_classes("client_firstname").is_empty());
        assert_eq!(dom.messages("client_lastname"), vec!["Already exists!"]);
        assert_eq!(dom.wrapper_classes("client_lastname"), vec!["error-field"]);
    }

    #[tokio::test]
    async fn test_failure_then_success_leaves_a_clean_form() {
        let dom = page();
        let calls = Arc::new(Mutex::new(0u32));
        let counter = calls.clone();
        let transport = TransportFn::arc(move |_req| {
            let mut calls = counter.lock().unwrap();
            *calls += 1;
            let response = if *calls == 1 {
                Response::unprocessable(json!({"client": {"firstname": ["Can't be blank!"]}}))
            } else {
                Response::ok(json!({"id": 9}))
            };
            async move { Ok(response) }
        });

        let registry = Registry::builder(dom.clone(), transport).build();
        registry.discover().await;
        registry.initialize().await.unwrap();

        registry.submit("client").await.unwrap();
        assert!(dom.any_marked("error-field"));

        dom.set_value("client_firstname", "Ada");
        let outcome = registry.submit("client").await.unwrap();
        assert!(outcome.is_accepted());
        assert!(!dom.any_marked("error-field"));
        assert_eq!(dom.value("client_firstname").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_transport_error_is_an_outcome_not_a_panic() {
        let dom = page();
        let transport = TransportFn::arc(|_req| async {
            Err(TransportError::Network {
                reason: "refused".into(),
            })
        });
        let registry = Registry::builder(dom, transport).build();
        registry.discover().await;
        registry.initialize().await.unwrap();

        let outcome = registry.submit("client").await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_apply_redirections_reaches_live_controller() {
        let dom = MemoryDom::new();
        dom.insert(
            FormModel::new("edit_client_42")
                .action("/clients/42")
                .field(FieldModel::new("client_date_of_birth").value("1990-01-01"))
                .field(FieldModel::new("date_show")),
        );
        let dom = Arc::new(dom);

        let registry = Registry::builder(dom.clone(), accepting()).build();
        registry.discover().await;
        registry.initialize().await.unwrap();

        registry
            .apply_redirections(
                "client",
                [("client_date_of_birth".to_string(), "date_show".to_string())],
            )
            .await
            .unwrap();

        let controller = registry.controller("client").await.unwrap();
        assert_eq!(
            controller.redirections().target("client_date_of_birth"),
            Some("date_show")
        );
    }
}
