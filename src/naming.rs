//! # Resource-name resolution from element identifiers.
//!
//! Managed forms follow an identifier convention of the shape
//! `<prefix>_<resource_name>[_<record_id>]`, e.g. `edit_client_42` or
//! `new_client_history`. [`NameScheme`] turns such an identifier back into
//! the logical resource name with an explicit grammar:
//!
//! ```text
//! identifier := token (DELIM token)*
//! 1. drop every token that equals a configured prefix word
//! 2. drop the final remaining token if it parses as an integer
//! 3. join what is left with DELIM
//! ```
//!
//! There are no error cases: malformed or empty identifiers resolve to the
//! empty string, which the registry treats as "not a managed form".
//!
//! # Example
//! ```
//! use formwire::NameScheme;
//!
//! let scheme = NameScheme::default();
//! assert_eq!(scheme.resolve("edit_client_42"), "client");
//! assert_eq!(scheme.resolve("new_client_history"), "client_history");
//! assert_eq!(scheme.resolve("form_42"), "");
//! ```

/// Grammar for deriving a resource name from a raw element identifier.
///
/// The default scheme strips the prefix words `new`, `edit` and `form` and
/// splits on `_`. Both are configurable for pages that follow a different
/// convention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameScheme {
    /// Prefix words dropped wherever they appear as a whole token.
    pub prefixes: Vec<String>,
    /// Token delimiter.
    pub delimiter: char,
}

impl Default for NameScheme {
    /// Returns the conventional scheme: prefixes `new`, `edit`, `form`,
    /// delimiter `_`.
    fn default() -> Self {
        Self {
            prefixes: vec!["new".to_string(), "edit".to_string(), "form".to_string()],
            delimiter: '_',
        }
    }
}

impl NameScheme {
    /// Creates a scheme with explicit prefix words and delimiter.
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>, delimiter: char) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            delimiter,
        }
    }

    /// Resolves a raw element identifier to a resource name.
    ///
    /// Applies the module-level grammar. The empty string means the
    /// identifier carried no resource name at all.
    pub fn resolve(&self, raw: &str) -> String {
        let mut tokens: Vec<&str> = raw
            .split(self.delimiter)
            .filter(|t| !t.is_empty() && !self.prefixes.iter().any(|p| p == t))
            .collect();

        if let Some(last) = tokens.last() {
            if last.parse::<i64>().is_ok() {
                tokens.pop();
            }
        }

        tokens.join(&self.delimiter.to_string())
    }

    /// Strips `<resource><delimiter>` from a field identifier, yielding the
    /// field's logical name.
    ///
    /// Returns `None` when the identifier does not start with the resource
    /// prefix (the field does not follow the convention).
    ///
    /// # Example
    /// ```
    /// use formwire::NameScheme;
    ///
    /// let scheme = NameScheme::default();
    /// assert_eq!(
    ///     scheme.field_name("client", "client_firstname").as_deref(),
    ///     Some("firstname")
    /// );
    /// assert_eq!(scheme.field_name("client", "date_show"), None);
    /// ```
    pub fn field_name(&self, resource: &str, field_id: &str) -> Option<String> {
        let prefix = format!("{resource}{}", self.delimiter);
        field_id.strip_prefix(&prefix).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_prefix_and_record_id_stripped() {
        let scheme = NameScheme::default();
        assert_eq!(scheme.resolve("edit_client_42"), "client");
    }

    #[test]
    fn test_new_prefix_keeps_multi_token_name() {
        let scheme = NameScheme::default();
        assert_eq!(scheme.resolve("new_client_history"), "client_history");
    }

    #[test]
    fn test_prefix_with_only_record_id_is_empty() {
        let scheme = NameScheme::default();
        assert_eq!(scheme.resolve("form_42"), "");
    }

    #[test]
    fn test_plain_name_passes_through() {
        let scheme = NameScheme::default();
        assert_eq!(scheme.resolve("client"), "client");
        assert_eq!(scheme.resolve("form_client"), "client");
    }

    #[test]
    fn test_empty_and_delimiter_only_input() {
        let scheme = NameScheme::default();
        assert_eq!(scheme.resolve(""), "");
        assert_eq!(scheme.resolve("___"), "");
    }

    #[test]
    fn test_trailing_non_numeric_token_kept() {
        let scheme = NameScheme::default();
        assert_eq!(scheme.resolve("edit_client_history"), "client_history");
    }

    #[test]
    fn test_negative_record_id_dropped() {
        // `parse::<i64>` accepts a sign; a trailing "-1" is still a record id.
        let scheme = NameScheme::default();
        assert_eq!(scheme.resolve("edit_client_-1"), "client");
    }

    #[test]
    fn test_custom_scheme() {
        let scheme = NameScheme::new(["create"], '-');
        assert_eq!(scheme.resolve("create-order-7"), "order");
    }

    #[test]
    fn test_field_name_requires_resource_prefix() {
        let scheme = NameScheme::default();
        assert_eq!(
            scheme.field_name("client", "client_date_of_birth").as_deref(),
            Some("date_of_birth")
        );
        assert_eq!(scheme.field_name("client", "clientfirstname"), None);
    }
}
