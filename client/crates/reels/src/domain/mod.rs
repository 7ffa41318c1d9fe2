//! Domain Layer - Reels and their submissions
//!
//! This layer contains:
//! - Domain entities (Reel, NewReel, Submission)
//! - Domain value objects (ReelToken, RedirectUrl)
//! - Domain services (share links)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
