//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [discovered] form="client"
//! [submit] form="client"
//! [failed] form="client" status=Some(422) reason="validation failed"
//! [rendered] form="client" fields=1
//! [submit] form="client"
//! [succeeded] form="client" status=201
//! [cleared] form="client"
//! [reset] form="client"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::FormDiscovered => {
                println!("[discovered] form={:?}", e.form);
            }
            EventKind::FormSkipped => {
                println!("[skipped] reason={:?}", e.reason);
            }
            EventKind::FormIgnored => {
                println!("[ignored] form={:?}", e.form);
            }
            EventKind::ControllerReady => {
                println!("[ready] form={:?}", e.form);
            }
            EventKind::ConfigRejected => {
                println!("[config-rejected] form={:?}", e.form);
            }
            EventKind::RedirectionsApplied => {
                println!(
                    "[redirections] form={:?} registered={:?}",
                    e.form, e.count
                );
            }
            EventKind::SubmitStarted => {
                println!("[submit] form={:?}", e.form);
            }
            EventKind::SubmitSucceeded => {
                println!(
                    "[succeeded] form={:?} status={}",
                    e.form,
                    e.status.unwrap_or(0)
                );
            }
            EventKind::SubmitFailed => {
                println!(
                    "[failed] form={:?} status={:?} reason={:?}",
                    e.form, e.status, e.reason
                );
            }
            EventKind::ErrorsRendered => {
                println!(
                    "[rendered] form={:?} fields={}",
                    e.form,
                    e.count.unwrap_or(0)
                );
            }
            EventKind::ErrorsCleared => {
                println!("[cleared] form={:?}", e.form);
            }
            EventKind::FieldsReset => {
                println!("[reset] form={:?}", e.form);
            }
            EventKind::SubscriberOverflow => {
                println!(
                    "[subscriber-overflow] subscriber={:?} reason={:?}",
                    e.form, e.reason
                );
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={} info={}",
                    e.form.as_deref().unwrap_or("unknown"),
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
