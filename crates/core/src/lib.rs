//! PMS Admin Core - Shared types library.
//!
//! This crate provides the domain types used across the PMS admin tools:
//! - `admin` - Backend client, hierarchy view-model and deletion workflows
//! - `cli` - Operator command-line interface
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Identifiers (email / mobile number), node ids, the reporting
//!   tree and the user records returned by deletion calls

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
