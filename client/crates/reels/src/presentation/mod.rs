//! Presentation Layer
//!
//! View handlers for the create, "My Reels" and submissions pages.

pub mod handlers;

pub use handlers::{Created, ReelView, ReelsAppState};
