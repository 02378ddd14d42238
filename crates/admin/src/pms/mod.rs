//! PMS backend access.
//!
//! Three endpoints are used, all authenticated with a bearer token:
//!
//! - `GET  /pms/users/vi_user_hierarchy.json?email=..&employee_type=..`
//! - `POST /pms/users/delete_user_with_reportees.json` with `{"email": ..}`
//! - `POST /pms/users/delete_multiple_vi_external_users.json` with
//!   `{"users_email_mobile": [..]}`
//!
//! The workflows talk to the backend through the [`PmsApi`] trait so they can
//! be driven by an in-memory fake in tests.

mod client;
pub mod message;
mod types;

pub use client::PmsClient;
pub use types::{DeleteMultipleRequest, DeleteWithReporteesRequest, DeletionReport};

use std::future::Future;

use pms_admin_core::{Email, Identifier, TreeNode};
use thiserror::Error;

/// Errors that can occur when talking to the PMS backend.
#[derive(Debug, Error)]
pub enum PmsError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-2xx response. `message` is already extracted
    /// from the body and cleaned.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A 2xx body that is not JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl PmsError {
    /// Message shown to the operator, with "not found" phrasing rewritten.
    ///
    /// Backend messages are used as-is; transport and parse failures, and
    /// blank backend messages, show the operation's `fallback` text.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } if !message.trim().is_empty() => {
                message::user_facing(message)
            }
            Self::Api { .. } | Self::Http(_) | Self::Parse(_) | Self::Url(_) => {
                message::user_facing(fallback)
            }
        }
    }

    /// HTTP status for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Backend operation, used for logging and fallback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchHierarchy,
    DeleteHierarchy,
    DeleteUsers,
}

impl Operation {
    /// Text shown when the backend gives no usable message.
    #[must_use]
    pub const fn fallback(self) -> &'static str {
        match self {
            Self::FetchHierarchy => message::FETCH_HIERARCHY_FALLBACK,
            Self::DeleteHierarchy => message::DELETE_HIERARCHY_FALLBACK,
            Self::DeleteUsers => message::DELETE_USERS_FALLBACK,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::FetchHierarchy => "fetch hierarchy",
            Self::DeleteHierarchy => "delete hierarchy",
            Self::DeleteUsers => "delete users",
        })
    }
}

/// The backend operations the workflows depend on.
pub trait PmsApi: Send + Sync {
    /// Fetch the reporting tree rooted at `identifier`.
    ///
    /// Returns `Ok(None)` when the 2xx payload is not a JSON object.
    fn fetch_hierarchy(
        &self,
        identifier: &Identifier,
    ) -> impl Future<Output = Result<Option<TreeNode>, PmsError>> + Send;

    /// Delete a manager and, server-side, every reportee below them.
    fn delete_user_with_reportees(
        &self,
        email: &Email,
    ) -> impl Future<Output = Result<DeletionReport, PmsError>> + Send;

    /// Delete a flat list of normalized identifiers.
    fn delete_multiple_users(
        &self,
        identifiers: &[String],
    ) -> impl Future<Output = Result<DeletionReport, PmsError>> + Send;
}
