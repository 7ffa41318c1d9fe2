//! Entity Module

pub mod provider_user;
pub mod user;
