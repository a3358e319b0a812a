//! # Error-markup styling.
//!
//! [`ErrorStyle`] describes the markup convention used to annotate a field
//! with validation errors: the wrapper element that receives the error
//! class, the class itself, and the class of the appended message blocks.
//! Each knob is independently overridable through [`StylePatch`];
//! [`StylePreset`] bundles all three for well-known CSS frameworks.
//!
//! # Example
//! ```
//! use formwire::{ErrorStyle, StylePatch, StylePreset};
//!
//! let mut style = ErrorStyle::default();
//! assert_eq!(style.error_class, "error-field");
//!
//! style.apply(StylePatch {
//!     error_class: Some("my-error-class".into()),
//!     ..StylePatch::default()
//! });
//! assert_eq!(style.error_class, "my-error-class");
//! assert_eq!(style.message_class, "help-block");
//!
//! let bs = ErrorStyle::from(StylePreset::Bootstrap3);
//! assert_eq!(bs.error_class, "has-error");
//! ```

/// Markup convention for rendering validation errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorStyle {
    /// Tag of the nearest ancestor that wraps a field and its label; the
    /// error class is toggled on this element and messages are appended to
    /// it.
    pub wrapper_tag: String,
    /// Class added to the wrapper while the field has errors.
    pub error_class: String,
    /// Class of each appended message element; also the selector used to
    /// remove messages again.
    pub message_class: String,
}

impl Default for ErrorStyle {
    /// Returns the built-in convention: `div` wrappers, `error-field` on
    /// the wrapper, `help-block` messages.
    fn default() -> Self {
        Self {
            wrapper_tag: "div".to_string(),
            error_class: "error-field".to_string(),
            message_class: "help-block".to_string(),
        }
    }
}

impl ErrorStyle {
    /// Applies a patch, field by field. `None` fields keep their value.
    pub fn apply(&mut self, patch: StylePatch) {
        if let Some(wrapper_tag) = patch.wrapper_tag {
            self.wrapper_tag = wrapper_tag;
        }
        if let Some(error_class) = patch.error_class {
            self.error_class = error_class;
        }
        if let Some(message_class) = patch.message_class {
            self.message_class = message_class;
        }
    }
}

/// Partial override of an [`ErrorStyle`]; unset fields are left alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StylePatch {
    /// Replacement wrapper tag, if any.
    pub wrapper_tag: Option<String>,
    /// Replacement error class, if any.
    pub error_class: Option<String>,
    /// Replacement message class, if any.
    pub message_class: Option<String>,
}

/// Named style bundles for common CSS frameworks.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StylePreset {
    /// Bootstrap v3: `div` wrappers, `has-error`, `help-block`.
    Bootstrap3,
}

impl From<StylePreset> for ErrorStyle {
    fn from(preset: StylePreset) -> Self {
        match preset {
            StylePreset::Bootstrap3 => ErrorStyle {
                wrapper_tag: "div".to_string(),
                error_class: "has-error".to_string(),
                message_class: "help-block".to_string(),
            },
        }
    }
}
