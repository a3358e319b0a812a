//! # Demo: custom_subscriber
//!
//! Implements a custom [`Subscribe`] that counts submit cycles across the
//! whole page, plus per-form [`Hooks`] that react to one form's outcomes.
//!
//! ## Run
//! ```bash
//! cargo run --example custom_subscriber
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use formwire::{
    Event, EventKind, FieldModel, FormModel, FormOverrides, Hooks, MemoryDom, Registry, Response,
    Subscribe, TransportFn,
};

/// Counts started and failed submit cycles.
#[derive(Default)]
struct CycleCounter {
    started: AtomicU32,
    failed: AtomicU32,
}

#[async_trait]
impl Subscribe for CycleCounter {
    async fn on_event(&self, event: &Event) {
        match event.kind {
            EventKind::SubmitStarted => {
                self.started.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::SubmitFailed => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "CycleCounter"
    }

    fn queue_capacity(&self) -> usize {
        64
    }
}

struct Announcer;

#[async_trait]
impl Hooks for Announcer {
    async fn before_submit(&self, form: &str) {
        println!("[hook] submitting {form}");
    }

    async fn on_success(&self, form: &str, response: &Response) {
        println!("[hook] {form} saved: {}", response.body);
    }

    async fn on_error(&self, form: &str, _response: Option<&Response>, reason: &str) {
        println!("[hook] {form} rejected: {reason}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dom = Arc::new(MemoryDom::new());
    dom.insert(
        FormModel::new("new_client")
            .action("/clients")
            .field(FieldModel::new("client_firstname").value("Ada")),
    );

    let flaky = Arc::new(AtomicU32::new(0));
    let attempts = flaky.clone();
    let transport = TransportFn::arc(move |_req| {
        let attempt = attempts.fetch_add(1, Ordering::Relaxed);
        async move {
            if attempt == 0 {
                Ok(Response::unprocessable(serde_json::json!({
                    "firstname": ["Already exists!"]
                })))
            } else {
                Ok(Response::ok(serde_json::json!({"id": 2})))
            }
        }
    });

    let counter = Arc::new(CycleCounter::default());
    let subs: Vec<Arc<dyn Subscribe>> = vec![counter.clone()];
    let registry = Registry::builder(dom, transport)
        .with_subscribers(subs)
        .build();

    registry.discover().await;
    registry
        .configure("client", FormOverrides::new().hooks(Arc::new(Announcer)))
        .await?;
    registry.initialize().await?;

    registry.submit("client").await?;
    registry.submit("client").await?;

    // Give the subscriber worker a tick to drain its queue.
    tokio::task::yield_now().await;
    println!(
        "cycles: started={} failed={}",
        counter.started.load(Ordering::Relaxed),
        counter.failed.load(Ordering::Relaxed),
    );

    registry.close();
    Ok(())
}
