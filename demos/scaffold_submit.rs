//! # Demo: scaffold_submit
//!
//! Minimal end-to-end walkthrough over a scaffold-style form: a failed
//! submission renders the server's validation payload, a corrected one
//! clears it and resets the form.
//!
//! ## Flow
//! ```text
//! MemoryDom ──► Registry::builder().with_subscribers([LogWriter]).build()
//!     ├─► discover()          → FormDiscovered
//!     ├─► initialize()        → ControllerReady
//!     ├─► submit("client")    → SubmitFailed → ErrorsRendered
//!     ├─► set_value(...)
//!     └─► submit("client")    → SubmitSucceeded → ErrorsCleared → FieldsReset
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example scaffold_submit --features logging
//! ```

use std::sync::Arc;

use formwire::{
    Document, FieldModel, FormModel, LogWriter, MemoryDom, Registry, Response, Subscribe,
    TransportFn,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. A page holding one scaffold form with two wrapped fields
    let dom = Arc::new(MemoryDom::new());
    dom.insert(
        FormModel::new("new_client")
            .action("/clients")
            .field(FieldModel::new("client_firstname"))
            .field(FieldModel::new("client_lastname").value("Lovelace")),
    );

    // 2. A stand-in server: first name must not be blank
    let transport = TransportFn::arc(|req| async move {
        if req.field("client_firstname") == Some("") {
            Ok(Response::unprocessable(serde_json::json!({
                "client": {"firstname": ["Can't be blank!"]}
            })))
        } else {
            Ok(Response {
                status: 201,
                body: serde_json::json!({"id": 1}),
            })
        }
    });

    // 3. Build the registry with the demo event printer
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let registry = Registry::builder(dom.clone(), transport)
        .with_subscribers(subs)
        .build();

    registry.discover().await;
    registry.initialize().await?;

    // 4. Submit with a blank first name: validation markup appears
    registry.submit("client").await?;
    println!(
        "after rejection: classes={:?} messages={:?}",
        dom.wrapper_classes("client_firstname"),
        dom.messages("client_firstname"),
    );

    // 5. Fix the value and submit again: the form ends up clean and reset
    dom.set_value("client_firstname", "Ada");
    registry.submit("client").await?;
    println!(
        "after success: classes={:?} firstname={:?}",
        dom.wrapper_classes("client_firstname"),
        dom.value("client_firstname"),
    );

    registry.close();
    Ok(())
}
