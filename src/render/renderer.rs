//! # Validation rendering.
//!
//! [`ErrorRenderer`] turns an [`ErrorPayload`] into error markup through
//! the [`Document`] seam. The pass is clear-then-render: every mapped
//! field's annotation is removed first, then fields present in the payload
//! are re-annotated — so rendering an empty payload equals clearing, and
//! repeated passes never stack markup.
//!
//! Lookup semantics: the payload keys field names without the resource
//! prefix (`firstname`, not `client_firstname`). The lookup name is
//! derived from the entry's *logical* identifier — the resource-named one;
//! the annotation lands on the *effective* element's wrapper, which is the
//! display element when a redirection is in place.

use crate::dom::Document;
use crate::fields::FieldMap;
use crate::naming::NameScheme;
use crate::render::options::ErrorStyle;
use crate::submit::ErrorPayload;

/// Renders and clears per-field validation markup for one form.
#[derive(Clone, Debug)]
pub struct ErrorRenderer {
    resource: String,
    scheme: NameScheme,
    style: ErrorStyle,
}

impl ErrorRenderer {
    /// Creates a renderer for the given resource name.
    pub fn new(resource: impl Into<String>, scheme: NameScheme, style: ErrorStyle) -> Self {
        Self {
            resource: resource.into(),
            scheme,
            style,
        }
    }

    /// The markup convention in use.
    pub fn style(&self) -> &ErrorStyle {
        &self.style
    }

    /// Runs one clear-then-render pass.
    ///
    /// Returns the number of fields that ended up annotated.
    pub fn render(&self, doc: &dyn Document, map: &FieldMap, payload: &ErrorPayload) -> usize {
        let mut annotated = 0;
        for (logical, effective) in map.iter() {
            doc.clear_error(effective, &self.style);

            let name = self
                .scheme
                .field_name(&self.resource, logical)
                .unwrap_or_else(|| logical.to_string());
            if let Some(messages) = payload.messages(&name) {
                doc.mark_error(effective, &self.style);
                for message in messages {
                    doc.append_message(effective, &self.style, message);
                }
                annotated += 1;
            }
        }
        annotated
    }

    /// Removes every annotation for the mapped fields (used after a
    /// successful submission).
    pub fn clear_all(&self, doc: &dyn Document, map: &FieldMap) {
        for (_, effective) in map.iter() {
            doc.clear_error(effective, &self.style);
        }
    }
}
