//! Value Object Module

pub mod display_name;
pub mod email;
