//! Unified error handling for admin workflows.
//!
//! Every workflow operation returns [`AppError`]. Nothing here is fatal: the
//! caller shows [`AppError::user_message`] and the workflow stays usable.

use pms_admin_core::IdentifierError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::pms::{Operation, PmsError};

/// Exact text shown when a hierarchy delete cannot resolve an email.
pub const DELETE_EMAIL_MISSING: &str =
    "Email not found for this user. Please fetch by email or ensure hierarchy contains an email.";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Identifier failed local validation; no request was sent.
    #[error(transparent)]
    Validation(#[from] IdentifierError),

    /// Bulk submission with no valid identifier.
    #[error("Enter at least one valid email or mobile number")]
    NothingToSubmit,

    /// Hierarchy delete with neither a typed email nor a root email.
    #[error("{}", DELETE_EMAIL_MISSING)]
    DeleteEmailMissing,

    /// Backend call failed.
    #[error("Failed to {operation}: {source}")]
    Pms {
        operation: Operation,
        #[source]
        source: PmsError,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Operation invoked at the wrong point of a workflow.
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
}

impl AppError {
    /// Wrap a backend error for `operation`.
    pub fn pms(operation: Operation) -> impl FnOnce(PmsError) -> Self {
        move |source| Self::Pms { operation, source }
    }

    /// Text shown to the operator.
    ///
    /// Only backend messages go through the "not found" rewrite; local
    /// validation messages are shown verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Pms { operation, source } => source.user_message(operation.fallback()),
            Self::InvalidState(message) => (*message).to_string(),
            other => other.to_string(),
        }
    }

    /// `true` if the error came from the backend or the network.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Pms { .. })
    }

    /// Log the error, sending server-side failures to Sentry.
    pub fn report(&self) {
        let server_side = match self {
            Self::Pms { source, .. } => source.status().is_none_or(|status| status >= 500),
            _ => false,
        };

        if server_side {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin operation error"
            );
        } else {
            tracing::warn!(error = %self, "Admin operation rejected");
        }
    }
}
