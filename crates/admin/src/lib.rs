//! PMS user administration library.
//!
//! Two workflows for removing external users from the PMS backend:
//!
//! - [`hierarchy::HierarchyPanel`]: look up one user's reporting tree, then
//!   either hand off to reportee reassignment or delete the whole hierarchy.
//! - [`deletion::BulkDeletion`]: delete a list of emails and mobile numbers
//!   in one request.
//!
//! Both merge their reports into one [`state::AppState`] so results
//! accumulate across batches.
//!
//! # Security
//!
//! Deletions are irreversible and the API token carries admin rights. The
//! token is held in a [`secrecy::SecretString`] and never logged.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod deletion;
pub mod error;
pub mod hierarchy;
pub mod pms;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::{AdminConfig, ConfigError};
pub use error::AppError;
pub use pms::{PmsApi, PmsClient, PmsError};
pub use state::AppState;
