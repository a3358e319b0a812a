//! # Document abstraction.
//!
//! This module defines the [`Document`] trait, the seam between the
//! library and whatever actually holds the page: a real DOM behind a WASM
//! boundary, a server-side renderer, or the built-in in-memory model
//! ([`MemoryDom`](crate::MemoryDom)). The common handle type is
//! [`DocumentRef`], an `Arc<dyn Document>` shared by the registry and its
//! controllers.
//!
//! The surface is deliberately small: enumerate forms and fields, read and
//! write field values, and mutate per-field error markup. Everything above
//! it (name resolution, field mapping, payload routing) is pure logic.

use std::sync::Arc;

use crate::render::ErrorStyle;

/// Shared handle to a document.
pub type DocumentRef = Arc<dyn Document>;

/// A form element as seen at discovery time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormNode {
    /// The element id, if the markup carries one. Forms without an id
    /// cannot be managed and are reported and skipped.
    pub id: Option<String>,
    /// The form's action URL. May be empty (submit to the current page).
    pub action: String,
}

/// A field-bearing element (input, select, textarea) of one form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldNode {
    /// The element id, if any. Fields without an id are invisible to the
    /// field mapper.
    pub id: Option<String>,
    /// Value of the redirection marker attribute, naming the element that
    /// should actually receive the value and the validation display.
    pub redirect: Option<String>,
}

impl FieldNode {
    /// Convenience constructor for a plain field.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            redirect: None,
        }
    }

    /// Attaches a redirection marker.
    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }
}

/// # Minimal mutable view of a page.
///
/// Implementations must be cheap to call and must tolerate unknown ids by
/// doing nothing; the library never treats a missing element as fatal.
///
/// The wrapper-level operations mirror a `closest(wrapper_tag)` lookup:
/// they act on the nearest ancestor whose tag matches
/// [`ErrorStyle::wrapper_tag`], and are no-ops when no such ancestor
/// exists.
pub trait Document: Send + Sync + 'static {
    /// All form elements on the page, in document order.
    fn forms(&self) -> Vec<FormNode>;

    /// Field-bearing elements of the given form, in document order.
    fn fields(&self, form_id: &str) -> Vec<FieldNode>;

    /// Current value of a field, or `None` for unknown ids.
    fn value(&self, field_id: &str) -> Option<String>;

    /// Sets a field's current value. Unknown ids are ignored.
    fn set_value(&self, field_id: &str, value: &str);

    /// Method-override convention lookup for a form (e.g. a hidden
    /// `_method` input). `None` means the form has no override.
    fn method_override(&self, form_id: &str) -> Option<String> {
        let _ = form_id;
        None
    }

    /// Adds the error class to the field's wrapper.
    fn mark_error(&self, field_id: &str, style: &ErrorStyle);

    /// Removes the error class and all message elements from the field's
    /// wrapper. Must be idempotent.
    fn clear_error(&self, field_id: &str, style: &ErrorStyle);

    /// Appends one message element to the field's wrapper.
    fn append_message(&self, field_id: &str, style: &ErrorStyle, text: &str);

    /// Resets every field of the form to its default value.
    fn reset_fields(&self, form_id: &str);
}
