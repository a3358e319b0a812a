//! # Field map: the resolved submission/lookup set of one form.
//!
//! [`FieldMap`] pairs each logical field identifier with the effective
//! identifier actually used for request field naming and validation
//! display. It is rebuilt on every submission cycle from the form's
//! current fields and the controller's [`RedirectMap`]:
//!
//! - a redirection **source** maps to its target, and the target is
//!   suppressed from independent listing;
//! - any field that is some redirection's **target** never gets an entry of
//!   its own, regardless of whether it appears before or after its source
//!   in document order;
//! - every other field maps to itself.
//!
//! Guarantee: no effective identifier appears twice, so no field is ever
//! submitted twice.

use crate::dom::FieldNode;
use crate::fields::redirect::RedirectMap;

/// Ordered `logical → effective` identifier pairs for one submission cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Builds the map from the form's fields (document order) and the
    /// current redirections.
    pub fn build(fields: &[FieldNode], redirects: &RedirectMap) -> Self {
        let mut entries = Vec::with_capacity(fields.len());
        for field in fields {
            let Some(id) = field.id.as_deref() else {
                continue;
            };
            if let Some(target) = redirects.target(id) {
                entries.push((id.to_string(), target.to_string()));
            } else if !redirects.is_target(id) {
                entries.push((id.to_string(), id.to_string()));
            }
        }
        Self { entries }
    }

    /// Iterates `(logical, effective)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, e)| (l.as_str(), e.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the form exposed no mappable field.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::FieldNode;

    fn pairs(map: &FieldMap) -> Vec<(String, String)> {
        map.iter()
            .map(|(l, e)| (l.to_string(), e.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_fields_map_to_themselves() {
        let fields = vec![
            FieldNode::new("client_firstname"),
            FieldNode::new("client_lastname"),
        ];
        let map = FieldMap::build(&fields, &RedirectMap::new());
        assert_eq!(
            pairs(&map),
            vec![
                ("client_firstname".into(), "client_firstname".into()),
                ("client_lastname".into(), "client_lastname".into()),
            ]
        );
    }

    #[test]
    fn test_redirection_suppresses_target_entry() {
        let fields = vec![
            FieldNode::new("client_date_of_birth").with_redirect("date_show"),
            FieldNode::new("date_show"),
        ];
        let mut redirects = RedirectMap::new();
        redirects.merge([("client_date_of_birth".to_string(), "date_show".to_string())]);

        let map = FieldMap::build(&fields, &redirects);
        assert_eq!(
            pairs(&map),
            vec![("client_date_of_birth".into(), "date_show".into())]
        );
    }

    #[test]
    fn test_target_before_source_still_single_entry() {
        let fields = vec![
            FieldNode::new("date_show"),
            FieldNode::new("client_date_of_birth").with_redirect("date_show"),
        ];
        let mut redirects = RedirectMap::new();
        redirects.merge([("client_date_of_birth".to_string(), "date_show".to_string())]);

        let map = FieldMap::build(&fields, &redirects);
        assert_eq!(
            pairs(&map),
            vec![("client_date_of_birth".into(), "date_show".into())]
        );
    }

    #[test]
    fn test_explicit_override_beats_marker() {
        // The marker points at date_show, the explicit override at custom_show;
        // the merged redirect map already resolved that fight.
        let fields = vec![
            FieldNode::new("client_date_of_birth").with_redirect("date_show"),
            FieldNode::new("date_show"),
            FieldNode::new("custom_show"),
        ];
        let mut redirects = RedirectMap::new();
        redirects.merge([("client_date_of_birth".to_string(), "custom_show".to_string())]);

        let map = FieldMap::build(&fields, &redirects);
        assert_eq!(
            pairs(&map),
            vec![
                ("client_date_of_birth".into(), "custom_show".into()),
                ("date_show".into(), "date_show".into()),
            ]
        );
    }

    #[test]
    fn test_fields_without_id_are_skipped() {
        let fields = vec![
            FieldNode {
                id: None,
                redirect: None,
            },
            FieldNode::new("client_firstname"),
        ];
        let map = FieldMap::build(&fields, &RedirectMap::new());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_no_effective_id_appears_twice() {
        let fields = vec![
            FieldNode::new("date_show"),
            FieldNode::new("client_date_of_birth").with_redirect("date_show"),
            FieldNode::new("client_firstname"),
        ];
        let mut redirects = RedirectMap::new();
        redirects.merge([("client_date_of_birth".to_string(), "date_show".to_string())]);

        let map = FieldMap::build(&fields, &redirects);
        let mut effective: Vec<_> = map.iter().map(|(_, e)| e.to_string()).collect();
        effective.sort();
        effective.dedup();
        assert_eq!(effective.len(), map.len());
    }
}
