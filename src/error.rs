//! Error types used by the registry and the submission path.
//!
//! This module defines two main error enums:
//!
//! - [`RegistryError`] — errors raised by the form registry itself.
//! - [`TransportError`] — errors raised by a transport while dispatching
//!   one submission.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics. Note that a *validation* failure is not an error: a
//! non-2xx response travels through the normal submission path and ends in
//! a rendering pass.

use thiserror::Error;

/// # Errors produced by the form registry.
///
/// These represent misuse of the registry API, such as addressing a form
/// that was never discovered. A form element without a usable id is *not*
/// an error value — it is reported on the event bus and skipped.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No descriptor or controller exists under the given resource name.
    #[error("unknown form: {name}")]
    UnknownForm {
        /// The resource name that failed to resolve.
        name: String,
    },

    /// A controller for this form is already live; pre-construction
    /// configuration is no longer possible.
    #[error("controller already built for form: {name}")]
    ControllerExists {
        /// The resource name of the live controller.
        name: String,
    },

    /// `initialize` was called before any form had been discovered.
    #[error("no forms discovered; call discover() first")]
    NothingDiscovered,
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use formwire::RegistryError;
    ///
    /// let err = RegistryError::UnknownForm { name: "client".into() };
    /// assert_eq!(err.as_label(), "registry_unknown_form");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::UnknownForm { .. } => "registry_unknown_form",
            RegistryError::ControllerExists { .. } => "registry_controller_exists",
            RegistryError::NothingDiscovered => "registry_nothing_discovered",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RegistryError::UnknownForm { name } => format!("unknown form: {name}"),
            RegistryError::ControllerExists { name } => {
                format!("controller already built: {name}")
            }
            RegistryError::NothingDiscovered => "nothing discovered".to_string(),
        }
    }
}

/// # Errors produced by a transport.
///
/// These represent failures to obtain *any* response for a submission.
/// A response that arrived with a non-2xx status is not a `TransportError`;
/// it is routed to the validation-rendering path instead.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request never produced a response (connection refused, DNS,
    /// aborted page, ...).
    #[error("network failure: {reason}")]
    Network {
        /// The underlying failure message.
        reason: String,
    },

    /// A response arrived but could not be understood as JSON.
    #[error("invalid response: {reason}")]
    InvalidResponse {
        /// What was wrong with the response.
        reason: String,
    },
}

impl TransportError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use formwire::TransportError;
    ///
    /// let err = TransportError::Network { reason: "refused".into() };
    /// assert_eq!(err.as_label(), "transport_network");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::Network { .. } => "transport_network",
            TransportError::InvalidResponse { .. } => "transport_invalid_response",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TransportError::Network { reason } => format!("network: {reason}"),
            TransportError::InvalidResponse { reason } => format!("invalid response: {reason}"),
        }
    }
}
