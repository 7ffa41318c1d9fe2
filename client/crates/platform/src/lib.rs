//! Platform Crate - Technical Infrastructure
//!
//! This crate provides the plumbing shared by the identity and data crates:
//! - Provider configuration loaded from the environment
//! - HTTP transport to the hosted auth/data provider
//! - Provider session token holder (in memory, optionally mirrored to disk)
//! - Random token generation
//! - Zeroized password handling
//! - View-scoped tasks whose results are discarded once the view closes

pub mod client;
pub mod config;
pub mod crypto;
pub mod password;
pub mod session;
pub mod task;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use client::{ProviderClient, ProviderError};
pub use config::{ConfigError, ProviderConfig};
pub use session::{ProviderSession, SessionTokens};
