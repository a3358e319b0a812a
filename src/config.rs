//! # Global registry configuration and per-form overrides.
//!
//! [`Config`] centralizes the process-wide defaults a registry applies to
//! every discovered form. [`FormOverrides`] is the typed per-form
//! override: every recognized option is an explicit field, applied with
//! field-wise "later wins" semantics — there is no duck-typed deep merge.
//!
//! Config is used in two ways:
//! 1. **Registry creation**: `RegistryBuilder::new(doc, transport, config)`
//! 2. **Descriptor defaults**: every `FormDescriptor` starts from the
//!    config's naming scheme and error style.
//!
//! ## Sentinel values
//! - `bus_capacity` is clamped to a minimum of 1 by the bus.

use std::collections::BTreeMap;

use crate::hooks::HooksRef;
use crate::naming::NameScheme;
use crate::render::{ErrorStyle, StylePatch, StylePreset};
use crate::submit::Method;

/// Global configuration for a form registry.
///
/// Defines:
/// - **Identifier convention**: the naming scheme for resource-name
///   derivation
/// - **Rendering defaults**: the error-markup style every form starts with
/// - **Dispatch default**: the method used when a form carries no override
/// - **Event system**: bus capacity for event delivery
#[derive(Clone, Debug)]
pub struct Config {
    /// Grammar used to derive resource names from form ids.
    pub naming: NameScheme,

    /// Default error-markup convention. Can be overridden per form.
    pub style: ErrorStyle,

    /// Request method used when the document reports no method override
    /// for a form.
    pub default_method: Method,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages
    /// will skip older items. Minimum value is 1 (enforced by the bus).
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `naming = NameScheme::default()` (`new`/`edit`/`form` prefixes, `_`)
    /// - `style = ErrorStyle::default()` (`div` / `error-field` / `help-block`)
    /// - `default_method = Method::Post`
    /// - `bus_capacity = 1024` (good baseline)
    fn default() -> Self {
        Self {
            naming: NameScheme::default(),
            style: ErrorStyle::default(),
            default_method: Method::Post,
            bus_capacity: 1024,
        }
    }
}

/// Style override of one form: a named preset or a field-wise patch.
#[derive(Clone, Debug)]
pub enum StyleOverride {
    /// Replace the whole style with a named bundle.
    Preset(StylePreset),
    /// Patch individual knobs of the inherited style.
    Patch(StylePatch),
}

impl StyleOverride {
    /// Applies this override on top of the given style.
    pub fn apply_to(&self, style: &mut ErrorStyle) {
        match self {
            StyleOverride::Preset(preset) => *style = ErrorStyle::from(*preset),
            StyleOverride::Patch(patch) => style.apply(patch.clone()),
        }
    }
}

/// Typed per-form configuration override.
///
/// All fields default to "no change". `Registry::configure` merges
/// overrides field-wise before controller construction; later calls win
/// for the fields they set, and explicit redirections accumulate.
#[derive(Clone, Default)]
pub struct FormOverrides {
    /// Exclude the form from management entirely.
    pub ignore: Option<bool>,

    /// Error-markup override (preset or patch).
    pub style: Option<StyleOverride>,

    /// Lifecycle hooks for this form.
    pub hooks: Option<HooksRef>,

    /// Explicit redirections, merged on top of auto-detected markers
    /// (explicit wins per source field).
    pub redirects: BTreeMap<String, String>,
}

impl FormOverrides {
    /// Starts an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ignore flag.
    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = Some(ignore);
        self
    }

    /// Replaces the style with a named preset.
    pub fn style_preset(mut self, preset: StylePreset) -> Self {
        self.style = Some(StyleOverride::Preset(preset));
        self
    }

    /// Patches individual style knobs.
    pub fn style_patch(mut self, patch: StylePatch) -> Self {
        self.style = Some(StyleOverride::Patch(patch));
        self
    }

    /// Installs lifecycle hooks.
    pub fn hooks(mut self, hooks: HooksRef) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Adds one explicit redirection.
    pub fn redirect(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.redirects.insert(source.into(), target.into());
        self
    }

    /// Merges `later` into `self`, field-wise; `later` wins where set.
    pub fn merge(&mut self, later: FormOverrides) {
        if later.ignore.is_some() {
            self.ignore = later.ignore;
        }
        if later.style.is_some() {
            self.style = later.style;
        }
        if later.hooks.is_some() {
            self.hooks = later.hooks;
        }
        self.redirects.extend(later.redirects);
    }
}

impl std::fmt::Debug for FormOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormOverrides")
            .field("ignore", &self.ignore)
            .field("style", &self.style)
            .field("redirects", &self.redirects)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_capacity_clamped() {
        let mut cfg = Config::default();
        cfg.bus_capacity = 0;
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }

    #[test]
    fn test_merge_later_wins_where_set() {
        let mut first = FormOverrides::new()
            .ignore(true)
            .redirect("client_date_of_birth", "date_show");
        let later = FormOverrides::new()
            .ignore(false)
            .redirect("client_color", "color_show");

        first.merge(later);
        assert_eq!(first.ignore, Some(false));
        assert_eq!(first.redirects.len(), 2);
        assert_eq!(
            first.redirects.get("client_date_of_birth").map(String::as_str),
            Some("date_show")
        );
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut first = FormOverrides::new().style_preset(StylePreset::Bootstrap3);
        first.merge(FormOverrides::new());
        assert!(first.style.is_some());

        let mut style = ErrorStyle::default();
        if let Some(over) = &first.style {
            over.apply_to(&mut style);
        }
        assert_eq!(style.error_class, "has-error");
    }
}
