//! # Demo: redirected_fields
//!
//! Datepicker-style dual-field input: the resource-named field
//! `client_date_of_birth` carries a redirection marker naming the visible
//! display element `date_show`. Detection seeds the display element with
//! the stored value (edit flow), the submission goes out under the display
//! identifier exactly once, and validation errors land on the display
//! element's wrapper.
//!
//! ## Run
//! ```bash
//! cargo run --example redirected_fields
//! ```

use std::sync::Arc;

use formwire::{Document, FieldModel, FormModel, MemoryDom, Registry, Request, Response, TransportFn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dom = Arc::new(MemoryDom::new());
    dom.insert(
        FormModel::new("edit_client_42")
            .action("/clients/42")
            .method_override("PUT")
            .field(
                FieldModel::new("client_date_of_birth")
                    .value("1990-01-01")
                    .redirect("date_show"),
            )
            .field(FieldModel::new("date_show")),
    );

    let transport = TransportFn::arc(|req: Request| async move {
        println!("dispatch: {} {} fields={:?}", req.method, req.url, req.fields);
        Ok(Response::unprocessable(serde_json::json!({
            "date_of_birth": ["is not a valid date"]
        })))
    });

    let registry = Registry::builder(dom.clone(), transport).build();
    registry.discover().await;
    registry.initialize().await?;

    // Auto-detection already seeded the display element.
    println!("display value: {:?}", dom.value("date_show"));

    registry.submit("client").await?;
    println!(
        "display wrapper: classes={:?} messages={:?}",
        dom.wrapper_classes("date_show"),
        dom.messages("date_show"),
    );

    // Redirections can also be installed or replaced after construction.
    registry
        .apply_redirections(
            "client",
            [("client_date_of_birth".to_string(), "date_show".to_string())],
        )
        .await?;

    registry.close();
    Ok(())
}
