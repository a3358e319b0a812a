//! # In-memory document model.
//!
//! [`MemoryDom`] is a deterministic [`Document`] implementation: a small
//! page model holding forms, fields, wrappers and their error markup. It
//! backs the crate's own tests and demos and is useful as a page double in
//! downstream test suites — no browser, no timers, no I/O.
//!
//! Pages are assembled from [`FormModel`] / [`FieldModel`] builders:
//!
//! ```
//! use formwire::{Document, FieldModel, FormModel, MemoryDom};
//!
//! let dom = MemoryDom::new();
//! dom.insert(
//!     FormModel::new("new_client")
//!         .action("/clients")
//!         .field(FieldModel::new("client_firstname"))
//!         .field(FieldModel::new("client_lastname").value("Doe")),
//! );
//!
//! assert_eq!(dom.value("client_lastname").as_deref(), Some("Doe"));
//! ```
//!
//! Every field sits in exactly one wrapper (default tag `div`); the
//! wrapper-level [`Document`] operations apply only when the configured
//! wrapper tag matches, mirroring a failed `closest()` lookup otherwise.

use std::sync::RwLock;

use crate::dom::document::{Document, FieldNode, FormNode};
use crate::render::ErrorStyle;

/// Builder for one form of a [`MemoryDom`] page.
#[derive(Clone, Debug)]
pub struct FormModel {
    id: Option<String>,
    action: String,
    method_override: Option<String>,
    fields: Vec<FieldModel>,
}

impl FormModel {
    /// Creates a form with the given element id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            action: String::new(),
            method_override: None,
            fields: Vec::new(),
        }
    }

    /// Creates a form without an id (used to exercise discovery skipping).
    pub fn anonymous() -> Self {
        Self {
            id: None,
            action: String::new(),
            method_override: None,
            fields: Vec::new(),
        }
    }

    /// Sets the form's action URL.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Declares a method-override field value (e.g. `PUT` for edit forms).
    pub fn method_override(mut self, method: impl Into<String>) -> Self {
        self.method_override = Some(method.into());
        self
    }

    /// Appends a field, preserving document order.
    pub fn field(mut self, field: FieldModel) -> Self {
        self.fields.push(field);
        self
    }
}

/// Builder for one field of a [`FormModel`].
#[derive(Clone, Debug)]
pub struct FieldModel {
    id: Option<String>,
    value: String,
    redirect: Option<String>,
    wrapper_tag: String,
}

impl FieldModel {
    /// Creates a field with the given element id, empty value, and a `div`
    /// wrapper.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            value: String::new(),
            redirect: None,
            wrapper_tag: "div".to_string(),
        }
    }

    /// Creates a field without an id (invisible to the field mapper).
    pub fn anonymous() -> Self {
        Self {
            id: None,
            value: String::new(),
            redirect: None,
            wrapper_tag: "div".to_string(),
        }
    }

    /// Sets the field's value; this also becomes its default for reset.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Attaches a redirection marker naming the display element.
    pub fn redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    /// Overrides the wrapper tag (default `div`).
    pub fn wrapper_tag(mut self, tag: impl Into<String>) -> Self {
        self.wrapper_tag = tag.into();
        self
    }
}

#[derive(Clone, Debug)]
struct FieldState {
    id: Option<String>,
    value: String,
    default: String,
    redirect: Option<String>,
    wrapper_tag: String,
    wrapper_classes: Vec<String>,
    messages: Vec<(String, String)>, // (class, text), in append order
}

impl From<FieldModel> for FieldState {
    fn from(model: FieldModel) -> Self {
        Self {
            id: model.id,
            default: model.value.clone(),
            value: model.value,
            redirect: model.redirect,
            wrapper_tag: model.wrapper_tag,
            wrapper_classes: Vec::new(),
            messages: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
struct FormState {
    id: Option<String>,
    action: String,
    method_override: Option<String>,
    fields: Vec<FieldState>,
}

/// Deterministic in-memory page.
///
/// Interior mutability makes it usable behind a
/// [`DocumentRef`](crate::DocumentRef); all methods take `&self`.
#[derive(Debug, Default)]
pub struct MemoryDom {
    forms: RwLock<Vec<FormState>>,
}

impl MemoryDom {
    /// Creates an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a form to the page, in document order.
    pub fn insert(&self, form: FormModel) {
        let state = FormState {
            id: form.id,
            action: form.action,
            method_override: form.method_override,
            fields: form.fields.into_iter().map(Into::into).collect(),
        };
        self.forms.write().expect("page lock poisoned").push(state);
    }

    /// Classes currently set on the field's wrapper (inspection helper).
    pub fn wrapper_classes(&self, field_id: &str) -> Vec<String> {
        self.with_field(field_id, |f| f.wrapper_classes.clone())
            .unwrap_or_default()
    }

    /// Texts of the message elements in the field's wrapper, in order
    /// (inspection helper).
    pub fn messages(&self, field_id: &str) -> Vec<String> {
        self.with_field(field_id, |f| {
            f.messages.iter().map(|(_, text)| text.clone()).collect()
        })
        .unwrap_or_default()
    }

    /// True if any wrapper on the page carries the given class
    /// (inspection helper).
    pub fn any_marked(&self, class: &str) -> bool {
        let forms = self.forms.read().expect("page lock poisoned");
        forms.iter().any(|form| {
            form.fields
                .iter()
                .any(|f| f.wrapper_classes.iter().any(|c| c == class))
        })
    }

    fn with_field<R>(&self, field_id: &str, f: impl FnOnce(&FieldState) -> R) -> Option<R> {
        let forms = self.forms.read().expect("page lock poisoned");
        forms
            .iter()
            .flat_map(|form| form.fields.iter())
            .find(|field| field.id.as_deref() == Some(field_id))
            .map(f)
    }

    fn with_field_mut<R>(&self, field_id: &str, f: impl FnOnce(&mut FieldState) -> R) -> Option<R> {
        let mut forms = self.forms.write().expect("page lock poisoned");
        forms
            .iter_mut()
            .flat_map(|form| form.fields.iter_mut())
            .find(|field| field.id.as_deref() == Some(field_id))
            .map(f)
    }
}

impl Document for MemoryDom {
    fn forms(&self) -> Vec<FormNode> {
        let forms = self.forms.read().expect("page lock poisoned");
        forms
            .iter()
            .map(|form| FormNode {
                id: form.id.clone(),
                action: form.action.clone(),
            })
            .collect()
    }

    fn fields(&self, form_id: &str) -> Vec<FieldNode> {
        let forms = self.forms.read().expect("page lock poisoned");
        forms
            .iter()
            .find(|form| form.id.as_deref() == Some(form_id))
            .map(|form| {
                form.fields
                    .iter()
                    .map(|field| FieldNode {
                        id: field.id.clone(),
                        redirect: field.redirect.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn value(&self, field_id: &str) -> Option<String> {
        self.with_field(field_id, |f| f.value.clone())
    }

    fn set_value(&self, field_id: &str, value: &str) {
        self.with_field_mut(field_id, |f| f.value = value.to_string());
    }

    fn method_override(&self, form_id: &str) -> Option<String> {
        let forms = self.forms.read().expect("page lock poisoned");
        forms
            .iter()
            .find(|form| form.id.as_deref() == Some(form_id))
            .and_then(|form| form.method_override.clone())
    }

    fn mark_error(&self, field_id: &str, style: &ErrorStyle) {
        self.with_field_mut(field_id, |f| {
            if f.wrapper_tag == style.wrapper_tag
                && !f.wrapper_classes.iter().any(|c| c == &style.error_class)
            {
                f.wrapper_classes.push(style.error_class.clone());
            }
        });
    }

    fn clear_error(&self, field_id: &str, style: &ErrorStyle) {
        self.with_field_mut(field_id, |f| {
            if f.wrapper_tag == style.wrapper_tag {
                f.wrapper_classes.retain(|c| c != &style.error_class);
                f.messages.retain(|(class, _)| class != &style.message_class);
            }
        });
    }

    fn append_message(&self, field_id: &str, style: &ErrorStyle, text: &str) {
        self.with_field_mut(field_id, |f| {
            if f.wrapper_tag == style.wrapper_tag {
                f.messages
                    .push((style.message_class.clone(), text.to_string()));
            }
        });
    }

    fn reset_fields(&self, form_id: &str) {
        let mut forms = self.forms.write().expect("page lock poisoned");
        if let Some(form) = forms.iter_mut().find(|form| form.id.as_deref() == Some(form_id)) {
            for field in &mut form.fields {
                field.value = field.default.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> MemoryDom {
        let dom = MemoryDom::new();
        dom.insert(
            FormModel::new("new_client")
                .action("/clients")
                .field(FieldModel::new("client_firstname"))
                .field(FieldModel::new("client_lastname").value("Doe")),
        );
        dom
    }

    #[test]
    fn test_forms_and_fields_in_document_order() {
        let dom = page();
        let forms = dom.forms();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].id.as_deref(), Some("new_client"));
        assert_eq!(forms[0].action, "/clients");

        let ids: Vec<_> = dom
            .fields("new_client")
            .into_iter()
            .filter_map(|f| f.id)
            .collect();
        assert_eq!(ids, vec!["client_firstname", "client_lastname"]);
    }

    #[test]
    fn test_unknown_ids_are_harmless() {
        let dom = page();
        assert!(dom.fields("missing").is_empty());
        assert_eq!(dom.value("missing"), None);
        dom.set_value("missing", "x");
        dom.mark_error("missing", &ErrorStyle::default());
    }

    #[test]
    fn test_mark_is_idempotent_and_clear_removes_messages() {
        let dom = page();
        let style = ErrorStyle::default();
        dom.mark_error("client_firstname", &style);
        dom.mark_error("client_firstname", &style);
        dom.append_message("client_firstname", &style, "Can't be blank!");
        assert_eq!(dom.wrapper_classes("client_firstname"), vec!["error-field"]);
        assert_eq!(dom.messages("client_firstname"), vec!["Can't be blank!"]);

        dom.clear_error("client_firstname", &style);
        dom.clear_error("client_firstname", &style);
        assert!(dom.wrapper_classes("client_firstname").is_empty());
        assert!(dom.messages("client_firstname").is_empty());
    }

    #[test]
    fn test_wrapper_tag_mismatch_is_a_no_op() {
        let dom = MemoryDom::new();
        dom.insert(
            FormModel::new("new_client")
                .field(FieldModel::new("client_firstname").wrapper_tag("fieldset")),
        );
        let style = ErrorStyle::default(); // expects div wrappers
        dom.mark_error("client_firstname", &style);
        assert!(dom.wrapper_classes("client_firstname").is_empty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let dom = page();
        dom.set_value("client_firstname", "Ada");
        dom.set_value("client_lastname", "Lovelace");
        dom.reset_fields("new_client");
        assert_eq!(dom.value("client_firstname").as_deref(), Some(""));
        assert_eq!(dom.value("client_lastname").as_deref(), Some("Doe"));
    }
}
