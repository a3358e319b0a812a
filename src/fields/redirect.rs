//! # Redirection detection and overrides.
//!
//! Some fields are not what the user actually types into: a datepicker or
//! typeahead shows a display element while the canonical, resource-named
//! field (often hidden) carries the submitted value. A redirection maps
//! such a field onto its display element, which then receives the value
//! and the validation rendering.
//!
//! [`RedirectMap`] is built two ways, layered:
//! 1. **Auto-detection** — fields carrying a redirection marker attribute
//!    record `field id → marker value`. If the target holds no value yet,
//!    the source's current value is copied into it once (so edit forms
//!    show the stored value in the display element).
//! 2. **Explicit overrides** — caller-supplied pairs merged on top;
//!    explicit always wins over auto-detected.

use std::collections::BTreeMap;

use crate::dom::Document;

/// Mapping from source field identifier to target (display) identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedirectMap {
    entries: BTreeMap<String, String>,
}

impl RedirectMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans the form's fields for redirection markers.
    ///
    /// For every marker found, records `source → target` and seeds the
    /// target's value from the source when the target is currently empty.
    /// Fields without an id are skipped.
    pub fn detect(doc: &dyn Document, form_id: &str) -> Self {
        let mut entries = BTreeMap::new();
        for field in doc.fields(form_id) {
            let (Some(id), Some(target)) = (field.id, field.redirect) else {
                continue;
            };
            let target_empty = doc.value(&target).map_or(true, |v| v.is_empty());
            if target_empty {
                if let Some(value) = doc.value(&id) {
                    doc.set_value(&target, &value);
                }
            }
            entries.insert(id, target);
        }
        Self { entries }
    }

    /// Merges explicit overrides on top of the detected entries.
    ///
    /// Explicit pairs win over auto-detected ones for the same source.
    pub fn merge(&mut self, overrides: impl IntoIterator<Item = (String, String)>) {
        for (source, target) in overrides {
            self.entries.insert(source, target);
        }
    }

    /// Target for the given source field, if one is registered.
    pub fn target(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    /// True if the given id is the target of any redirection.
    pub fn is_target(&self, id: &str) -> bool {
        self.entries.values().any(|t| t == id)
    }

    /// Number of registered redirections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no redirection is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(source, target)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, FieldModel, FormModel, MemoryDom};

    fn dual_field_page(target_value: &str) -> MemoryDom {
        let dom = MemoryDom::new();
        dom.insert(
            FormModel::new("edit_client_42")
                .field(
                    FieldModel::new("client_date_of_birth")
                        .value("1990-01-01")
                        .redirect("date_show"),
                )
                .field(FieldModel::new("date_show").value(target_value)),
        );
        dom
    }

    #[test]
    fn test_detect_records_marker_pairs() {
        let dom = dual_field_page("");
        let map = RedirectMap::detect(&dom, "edit_client_42");
        assert_eq!(map.target("client_date_of_birth"), Some("date_show"));
        assert!(map.is_target("date_show"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_detect_seeds_empty_target_value() {
        let dom = dual_field_page("");
        RedirectMap::detect(&dom, "edit_client_42");
        assert_eq!(dom.value("date_show").as_deref(), Some("1990-01-01"));
    }

    #[test]
    fn test_detect_keeps_populated_target_value() {
        let dom = dual_field_page("already typed");
        RedirectMap::detect(&dom, "edit_client_42");
        assert_eq!(dom.value("date_show").as_deref(), Some("already typed"));
    }

    #[test]
    fn test_explicit_override_wins() {
        let dom = dual_field_page("");
        let mut map = RedirectMap::detect(&dom, "edit_client_42");
        map.merge([("client_date_of_birth".to_string(), "other_show".to_string())]);
        assert_eq!(map.target("client_date_of_birth"), Some("other_show"));
        assert_eq!(map.len(), 1);
    }
}
