//! Core types for PMS user administration.
//!
//! This module provides type-safe wrappers for the identifiers an operator
//! types and the records the backend returns.

pub mod email;
pub mod id;
pub mod identifier;
pub mod mobile;
pub mod lenient;
pub mod tree;
pub mod user;

pub use email::{Email, EmailError};
pub use id::*;
pub use identifier::{
    Identifier, IdentifierError, IdentifierKind, identifier_error, is_valid_email,
    is_valid_identifier, is_valid_mobile, normalize, sanitize_input,
};
pub use mobile::{MobileNumber, MobileNumberError};
pub use tree::TreeNode;
pub use user::{BlockedManager, Reportee, UserKey, UserRecord};
