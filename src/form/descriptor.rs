//! # Form descriptor.
//!
//! [`FormDescriptor`] is the configuration bundle of one discovered form:
//! element id, derived resource name, action URL, ignore flag, error
//! style, hooks and explicit redirections. It is created at discovery time
//! from the global [`Config`] and mutated only through
//! [`FormDescriptor::apply`] until a controller is built from it.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{Config, FormOverrides};
use crate::hooks::{HooksRef, NoopHooks};
use crate::render::ErrorStyle;

/// Descriptor of one managed form.
///
/// Bundles together:
/// - The DOM element id and the resource name derived from it
/// - The form's action URL
/// - Rendering style, hooks, and explicit redirections
/// - The ignore flag (`true` = no controller is built)
#[derive(Clone)]
pub struct FormDescriptor {
    element_id: String,
    resource: String,
    action: String,
    ignore: bool,
    style: ErrorStyle,
    hooks: HooksRef,
    redirects: BTreeMap<String, String>,
}

impl FormDescriptor {
    /// Creates a descriptor inheriting defaults from the global config.
    pub fn new(
        element_id: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
        cfg: &Config,
    ) -> Self {
        Self {
            element_id: element_id.into(),
            resource: resource.into(),
            action: action.into(),
            ignore: false,
            style: cfg.style.clone(),
            hooks: Arc::new(NoopHooks),
            redirects: BTreeMap::new(),
        }
    }

    /// Applies a typed override set on top of the current state.
    pub fn apply(&mut self, overrides: &FormOverrides) {
        if let Some(ignore) = overrides.ignore {
            self.ignore = ignore;
        }
        if let Some(style) = &overrides.style {
            style.apply_to(&mut self.style);
        }
        if let Some(hooks) = &overrides.hooks {
            self.hooks = Arc::clone(hooks);
        }
        self.redirects.extend(
            overrides
                .redirects
                .iter()
                .map(|(s, t)| (s.clone(), t.clone())),
        );
    }

    /// The DOM element id of the form.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// The derived resource name.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The form's action URL.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// True if no controller should be built for this form.
    pub fn is_ignored(&self) -> bool {
        self.ignore
    }

    /// The error-markup style.
    pub fn style(&self) -> &ErrorStyle {
        &self.style
    }

    /// The lifecycle hooks.
    pub fn hooks(&self) -> &HooksRef {
        &self.hooks
    }

    /// Explicit redirection overrides configured so far.
    pub fn redirects(&self) -> &BTreeMap<String, String> {
        &self.redirects
    }
}

impl std::fmt::Debug for FormDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormDescriptor")
            .field("element_id", &self.element_id)
            .field("resource", &self.resource)
            .field("action", &self.action)
            .field("ignore", &self.ignore)
            .field("style", &self.style)
            .field("redirects", &self.redirects)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::StylePreset;

    #[test]
    fn test_inherits_config_defaults() {
        let desc = FormDescriptor::new("new_client", "client", "/clients", &Config::default());
        assert_eq!(desc.element_id(), "new_client");
        assert_eq!(desc.resource(), "client");
        assert!(!desc.is_ignored());
        assert_eq!(desc.style().error_class, "error-field");
    }

    #[test]
    fn test_apply_is_cumulative() {
        let mut desc = FormDescriptor::new("new_client", "client", "/clients", &Config::default());
        desc.apply(&FormOverrides::new().redirect("client_date_of_birth", "date_show"));
        desc.apply(&FormOverrides::new().style_preset(StylePreset::Bootstrap3));

        assert_eq!(desc.redirects().len(), 1);
        assert_eq!(desc.style().error_class, "has-error");
    }
}
