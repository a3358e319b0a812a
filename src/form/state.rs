//! # Submission state machine.
//!
//! One submit cycle is an explicit state machine over two inputs — the
//! submit request and the response arrival:
//!
//! ```text
//! Idle ── Submit ──► Submitting ── Response(ok) ──► Succeeded ─┐
//!   ▲                    │                                     │ settle
//!   │                    └── Response(err) ──► Failed ─────────┤
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `Submitting + Submit → Submitting` is deliberately allowed: overlapping
//! submissions on one form are not serialized, and their responses may
//! interleave. Stray responses in `Idle` are ignored.

/// State of one form's submission cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    /// No submission in flight.
    #[default]
    Idle,
    /// A request has been dispatched; the response is outstanding.
    Submitting,
    /// The last response was a success (transient; settles to `Idle`).
    Succeeded,
    /// The last response was a failure (transient; settles to `Idle`).
    Failed,
}

/// Input events driving the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitInput {
    /// A submission was requested.
    Submit,
    /// A response arrived; `true` = success.
    Response(bool),
}

impl SubmitState {
    /// Applies one input and returns the next state.
    pub fn on(self, input: SubmitInput) -> SubmitState {
        match (self, input) {
            (_, SubmitInput::Submit) => SubmitState::Submitting,
            (SubmitState::Submitting, SubmitInput::Response(true)) => SubmitState::Succeeded,
            (SubmitState::Submitting, SubmitInput::Response(false)) => SubmitState::Failed,
            // Stray response with nothing in flight: ignore.
            (state, SubmitInput::Response(_)) => state,
        }
    }

    /// Settles a terminal state back to `Idle`.
    pub fn settle(self) -> SubmitState {
        match self {
            SubmitState::Succeeded | SubmitState::Failed => SubmitState::Idle,
            state => state,
        }
    }

    /// True while a response is outstanding.
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitState::Submitting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_cycle() {
        let s = SubmitState::Idle;
        let s = s.on(SubmitInput::Submit);
        assert_eq!(s, SubmitState::Submitting);
        let s = s.on(SubmitInput::Response(true));
        assert_eq!(s, SubmitState::Succeeded);
        assert_eq!(s.settle(), SubmitState::Idle);
    }

    #[test]
    fn test_failure_cycle() {
        let s = SubmitState::Idle
            .on(SubmitInput::Submit)
            .on(SubmitInput::Response(false));
        assert_eq!(s, SubmitState::Failed);
        assert_eq!(s.settle(), SubmitState::Idle);
    }

    #[test]
    fn test_overlapping_submit_is_permitted() {
        let s = SubmitState::Submitting.on(SubmitInput::Submit);
        assert_eq!(s, SubmitState::Submitting);
    }

    #[test]
    fn test_stray_response_ignored_when_idle() {
        assert_eq!(SubmitState::Idle.on(SubmitInput::Response(true)), SubmitState::Idle);
        assert_eq!(
            SubmitState::Idle.on(SubmitInput::Response(false)),
            SubmitState::Idle
        );
    }

    #[test]
    fn test_settle_only_touches_terminal_states() {
        assert_eq!(SubmitState::Idle.settle(), SubmitState::Idle);
        assert_eq!(SubmitState::Submitting.settle(), SubmitState::Submitting);
    }
}
