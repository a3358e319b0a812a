//! Validation-error rendering: markup conventions and the render pass.

mod options;
mod renderer;

pub use options::{ErrorStyle, StylePatch, StylePreset};
pub use renderer::ErrorRenderer;
