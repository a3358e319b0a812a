//! Builder for assembling a [`Registry`] with optional features.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::dom::DocumentRef;
use crate::events::Bus;
use crate::page::registry::Registry;
use crate::submit::TransportRef;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Builder for constructing a [`Registry`].
///
/// The document and transport are mandatory; configuration and
/// subscribers are optional.
pub struct RegistryBuilder {
    doc: DocumentRef,
    transport: TransportRef,
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl RegistryBuilder {
    /// Creates a new builder over the given document and transport.
    pub fn new(doc: DocumentRef, transport: TransportRef) -> Self {
        Self {
            doc,
            transport,
            cfg: Config::default(),
            subscribers: Vec::new(),
        }
    }

    /// Replaces the default configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive lifecycle events (discovery, submit cycles,
    /// rendering) through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds and returns the registry.
    ///
    /// This initializes the event bus, spawns the subscriber listener and
    /// workers, and hands back the registry ready for
    /// [`discover`](Registry::discover). Must be called inside a Tokio
    /// runtime.
    pub fn build(self) -> Arc<Registry> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let token = CancellationToken::new();
        let set = SubscriberSet::new(self.subscribers);
        Registry::listen(&bus, set, token.clone());

        Arc::new(Registry::new_internal(
            self.cfg,
            self.doc,
            self.transport,
            bus,
            token,
        ))
    }
}
