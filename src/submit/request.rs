//! # Request and response shapes of one submission.
//!
//! [`Request`] is what a controller hands to the transport: method, target
//! URL and the serialized field values, in document order. [`Response`] is
//! what comes back: an HTTP-ish status code plus the parsed JSON body.
//! The library never interprets a success body — it is passed through to
//! the success hook untouched.

use serde::Serialize;
use serde_json::{Map, Value};

/// Request method of a managed form.
///
/// Resolved from the document's method-override convention (a hidden
/// `_method`-style field), falling back to the configured default (POST).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read-only dispatch (unusual for managed forms, but expressible).
    Get,
    /// Create (the default).
    #[default]
    Post,
    /// Full update.
    Put,
    /// Partial update.
    Patch,
    /// Removal.
    Delete,
}

impl Method {
    /// Parses a method-override value, case-insensitively.
    ///
    /// Unknown strings yield `None`; callers fall back to their default.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "PATCH" => Some(Method::Patch),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outgoing submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Request {
    /// Resolved request method.
    pub method: Method,
    /// The form's action URL, as found in the document (possibly empty,
    /// meaning "current page" — transports decide how to resolve it).
    pub url: String,
    /// Serialized `(effective identifier, value)` pairs, document order,
    /// no identifier twice.
    pub fields: Vec<(String, String)>,
}

impl Request {
    /// Field value by effective identifier.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Renders the field pairs as a JSON object body.
    ///
    /// # Example
    /// ```
    /// use formwire::{Method, Request};
    ///
    /// let req = Request {
    ///     method: Method::Post,
    ///     url: "/clients".into(),
    ///     fields: vec![("client_firstname".into(), "Ada".into())],
    /// };
    /// assert_eq!(req.json_body()["client_firstname"], "Ada");
    /// ```
    pub fn json_body(&self) -> Value {
        let mut map = Map::with_capacity(self.fields.len());
        for (name, value) in &self.fields {
            map.insert(name.clone(), Value::String(value.clone()));
        }
        Value::Object(map)
    }
}

/// One incoming response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// HTTP-ish status code.
    pub status: u16,
    /// Parsed JSON body. `Value::Null` when the server sent none.
    pub body: Value,
}

impl Response {
    /// Builds a 2xx response with the given body.
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Builds a 422 response carrying a validation payload.
    pub fn unprocessable(body: Value) -> Self {
        Self { status: 422, body }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
