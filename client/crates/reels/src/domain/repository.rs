//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entities::{NewReel, Reel, Submission};
use crate::domain::value_objects::ReelToken;
use crate::error::ReelResult;

/// Reel (identifier record) repository trait
#[trait_variant::make(ReelRepository: Send)]
pub trait LocalReelRepository {
    /// Insert a new reel
    async fn create_identifier(&self, reel: &NewReel) -> ReelResult<()>;

    /// All reels owned by `owner`
    async fn list_identifiers(&self, owner: &UserId) -> ReelResult<Vec<Reel>>;

    /// Whether any reel already uses `token`
    async fn identifier_exists(&self, token: &ReelToken) -> ReelResult<bool>;
}

/// Submission repository trait
#[trait_variant::make(SubmissionRepository: Send)]
pub trait LocalSubmissionRepository {
    /// Submissions referencing any of `tokens`
    ///
    /// Callers must not pass an empty set.
    async fn list_submissions(&self, tokens: &[ReelToken]) -> ReelResult<Vec<Submission>>;

    /// Submissions referencing `token`
    async fn list_submissions_for_reel(&self, token: &ReelToken) -> ReelResult<Vec<Submission>>;
}
