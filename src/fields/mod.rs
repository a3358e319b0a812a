//! Field resolution: redirection handling and the per-submission field map.
//!
//! - [`redirect`]: auto-detected and explicit `source → target` pairs;
//! - [`map`]: the resolved `logical → effective` set used for request
//!   field naming and error lookup.

mod map;
mod redirect;

pub use map::FieldMap;
pub use redirect::RedirectMap;
