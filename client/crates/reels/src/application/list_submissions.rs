//! List Submissions Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::Submission;
use crate::domain::repository::{ReelRepository, SubmissionRepository};
use crate::domain::services::distinct_tokens;
use crate::domain::value_objects::ReelToken;
use crate::error::{ReelError, ReelResult};

/// List Submissions Use Case
pub struct ListSubmissionsUseCase<R, S>
where
    R: ReelRepository,
    S: SubmissionRepository,
{
    reel_repo: Arc<R>,
    submission_repo: Arc<S>,
}

impl<R, S> ListSubmissionsUseCase<R, S>
where
    R: ReelRepository,
    S: SubmissionRepository,
{
    pub fn new(reel_repo: Arc<R>, submission_repo: Arc<S>) -> Self {
        Self {
            reel_repo,
            submission_repo,
        }
    }

    /// Submissions across every reel `owner` has
    ///
    /// An owner without reels gets `[]` without a submissions query.
    pub async fn for_owner(&self, owner: &UserId) -> ReelResult<Vec<Submission>> {
        let reels = self
            .reel_repo
            .list_identifiers(owner)
            .await
            .inspect_err(ReelError::log)?;

        let tokens = distinct_tokens(reels.iter().map(|r| &r.reel_id));
        if tokens.is_empty() {
            tracing::debug!(owner_id = %owner, "No reels, skipping submissions query");
            return Ok(Vec::new());
        }

        let submissions = self
            .submission_repo
            .list_submissions(&tokens)
            .await
            .inspect_err(ReelError::log)?;

        tracing::debug!(
            owner_id = %owner,
            reels = tokens.len(),
            count = submissions.len(),
            "Listed submissions"
        );

        Ok(submissions)
    }

    /// Submissions for a single reel
    pub async fn for_reel(&self, token: &ReelToken) -> ReelResult<Vec<Submission>> {
        self.submission_repo
            .list_submissions_for_reel(token)
            .await
            .inspect_err(ReelError::log)
    }
}
