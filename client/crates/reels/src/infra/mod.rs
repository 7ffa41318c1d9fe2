//! Infrastructure Layer
//!
//! Hosted data store implementation.

pub mod postgrest;

pub use postgrest::PostgrestRepository;
