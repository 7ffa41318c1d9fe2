//! Application Layer
//!
//! Use cases for creating and listing reels and their submissions.

pub mod config;
pub mod create_reel;
pub mod list_reels;
pub mod list_submissions;

// Re-exports
pub use config::ReelsConfig;
pub use create_reel::{CreateReelInput, CreateReelOutput, CreateReelUseCase};
pub use list_reels::ListReelsUseCase;
pub use list_submissions::ListSubmissionsUseCase;
