//! Shared Kernel - Vocabulary shared by every dashboard crate
//!
//! This crate holds the few things that mean the same everywhere:
//! - The error taxonomy ([`error::kind::ErrorKind`]) and the unified [`error::app_error::AppError`]
//! - Phantom-typed opaque identifiers
//! - User-facing notices (the toast shown after every flow)
//!
//! Nothing in here talks to the network.

pub mod error {
    pub mod app_error;
    pub mod kind;
}
pub mod id;
pub mod notice;
