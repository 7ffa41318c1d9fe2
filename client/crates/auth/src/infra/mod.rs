//! Infrastructure Layer
//!
//! Hosted identity provider adapter.

pub mod gotrue;

pub use gotrue::GoTrueProvider;
