//! Single-form management: descriptor, submission state machine, and the
//! controller that drives one form's submit cycles.

mod controller;
mod descriptor;
mod state;

pub use controller::{FormController, SubmitOutcome};
pub use descriptor::FormDescriptor;
pub use state::{SubmitInput, SubmitState};
