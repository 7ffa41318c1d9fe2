//! Reels (Link Data) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Reel and submission entities, tokens, repository traits
//! - `application/` - Create-reel and listing use cases
//! - `infra/` - PostgREST (hosted data REST) implementation
//! - `presentation/` - View handlers producing data or notices
//!
//! ## Data Model
//! - A reel maps a short token to a redirect URL and belongs to one user
//! - Submissions reference a reel by token and are created outside this system
//! - Nothing here is updated or deleted

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ReelsConfig;
pub use error::{ReelError, ReelResult};
pub use infra::postgrest::PostgrestRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

#[cfg(test)]
mod testing;
