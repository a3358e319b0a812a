//! # Server error payload.
//!
//! A rejected submission answers with a JSON object mapping field names to
//! lists of validation messages, either directly:
//!
//! ```json
//! { "firstname": ["Can't be blank!"], "phone": ["Already exists!"] }
//! ```
//!
//! or nested one level under the resource name:
//!
//! ```json
//! { "client": { "firstname": ["Can't be blank!"] } }
//! ```
//!
//! [`ErrorPayload::extract`] accepts both shapes. Parsing is lenient by
//! design: entries that are not message lists are skipped, a single string
//! counts as a one-message list, and anything unusable yields an empty
//! payload — fields with no entry simply show no message.

use std::collections::BTreeMap;

use serde_json::Value;

/// Field name → ordered validation messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorPayload {
    fields: BTreeMap<String, Vec<String>>,
}

impl ErrorPayload {
    /// Creates an empty payload (renders as "no errors anywhere").
    pub fn empty() -> Self {
        Self::default()
    }

    /// Extracts the payload from a response body.
    ///
    /// If the body holds an object under `resource`, that sub-object is
    /// used; otherwise the body itself is. Non-object bodies produce an
    /// empty payload.
    pub fn extract(body: &Value, resource: &str) -> Self {
        let object = match body.get(resource) {
            Some(Value::Object(nested)) => nested,
            _ => match body {
                Value::Object(map) => map,
                _ => return Self::default(),
            },
        };

        let mut fields = BTreeMap::new();
        for (name, value) in object {
            match value {
                Value::Array(items) => {
                    let messages: Vec<String> = items
                        .iter()
                        .filter_map(|m| m.as_str().map(str::to_string))
                        .collect();
                    if !messages.is_empty() {
                        fields.insert(name.clone(), messages);
                    }
                }
                Value::String(message) => {
                    fields.insert(name.clone(), vec![message.clone()]);
                }
                _ => {}
            }
        }
        Self { fields }
    }

    /// Messages for the given field name, in payload order.
    pub fn messages(&self, field_name: &str) -> Option<&[String]> {
        self.fields.get(field_name).map(Vec::as_slice)
    }

    /// Number of fields with at least one message.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field has a message.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for ErrorPayload {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
