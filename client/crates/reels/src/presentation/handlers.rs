//! View Handlers
//!
//! One handler per dashboard view. Failures come back as the notice the view
//! shows; successes carry the data to render.

use std::sync::Arc;

use kernel::id::UserId;
use kernel::notice::Notice;
use platform::task::{ScopedTask, ViewScope};

use crate::application::config::ReelsConfig;
use crate::application::{
    CreateReelInput, CreateReelOutput, CreateReelUseCase, ListReelsUseCase,
    ListSubmissionsUseCase,
};
use crate::domain::entities::{Reel, Submission};
use crate::domain::repository::{ReelRepository, SubmissionRepository};
use crate::domain::services::share_link;
use crate::domain::value_objects::ReelToken;
use crate::error::ReelError;

const CREATED: &str = "ReelID created successfully!";
const CREATE_FAILED: &str = "Failed to create ReelID.";
const REELS_FAILED: &str = "Failed to fetch ReelIDs.";
const SUBMISSIONS_FAILED: &str = "Failed to fetch submissions.";

/// Shared state for reel handlers
pub struct ReelsAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<ReelsConfig>,
}

impl<R> Clone for ReelsAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// A reel as the "My Reels" list shows it
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReelView {
    pub reel: Reel,
    pub share_link: String,
}

/// Successful creation plus the notice to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub notice: Notice,
    pub reel: CreateReelOutput,
}

fn notice(err: ReelError, fallback: &str) -> Notice {
    Notice::from_error(&err.to_app_error(), fallback)
}

// ============================================================================
// Create
// ============================================================================

pub async fn create_reel<R>(
    state: &ReelsAppState<R>,
    owner: Option<&UserId>,
    redirect_url: &str,
) -> Result<Created, Notice>
where
    R: ReelRepository,
{
    let use_case = CreateReelUseCase::new(state.repo.clone(), state.config.clone());

    let input = CreateReelInput {
        owner: owner.cloned(),
        redirect_url: redirect_url.to_string(),
    };

    match use_case.execute(input).await {
        Ok(reel) => Ok(Created {
            notice: Notice::success(CREATED),
            reel,
        }),
        Err(e) => Err(notice(e, CREATE_FAILED)),
    }
}

// ============================================================================
// My Reels
// ============================================================================

pub async fn my_reels<R>(state: &ReelsAppState<R>, owner: &UserId) -> Result<Vec<ReelView>, Notice>
where
    R: ReelRepository,
{
    let use_case = ListReelsUseCase::new(state.repo.clone());

    let reels = use_case
        .execute(owner)
        .await
        .map_err(|e| notice(e, REELS_FAILED))?;

    Ok(reels
        .into_iter()
        .map(|reel| ReelView {
            share_link: share_link(&state.config.share_base_url, &reel.reel_id),
            reel,
        })
        .collect())
}

// ============================================================================
// Submissions
// ============================================================================

/// Every submission across the owner's reels (shown under the create form)
pub async fn owner_submissions<R>(
    state: &ReelsAppState<R>,
    owner: &UserId,
) -> Result<Vec<Submission>, Notice>
where
    R: ReelRepository + SubmissionRepository,
{
    ListSubmissionsUseCase::new(state.repo.clone(), state.repo.clone())
        .for_owner(owner)
        .await
        .map_err(|e| notice(e, SUBMISSIONS_FAILED))
}

/// Submissions for the reel named in the path
pub async fn reel_submissions<R>(
    state: &ReelsAppState<R>,
    reel_id: &str,
) -> Result<Vec<Submission>, Notice>
where
    R: ReelRepository + SubmissionRepository,
{
    let token = ReelToken::lookup(reel_id).map_err(|e| notice(e, SUBMISSIONS_FAILED))?;

    ListSubmissionsUseCase::new(state.repo.clone(), state.repo.clone())
        .for_reel(&token)
        .await
        .map_err(|e| notice(e, SUBMISSIONS_FAILED))
}

// ============================================================================
// View-scoped loads
// ============================================================================

/// Start the "My Reels" fetch for a view that may close before it lands
pub fn open_my_reels<R>(
    scope: &ViewScope,
    state: &ReelsAppState<R>,
    owner: UserId,
) -> ScopedTask<Result<Vec<ReelView>, Notice>>
where
    R: ReelRepository + Send + Sync + 'static,
{
    let state = state.clone();
    scope.spawn(async move { my_reels(&state, &owner).await })
}

/// Start the per-reel submissions fetch for a view
pub fn open_reel_submissions<R>(
    scope: &ViewScope,
    state: &ReelsAppState<R>,
    reel_id: String,
) -> ScopedTask<Result<Vec<Submission>, Notice>>
where
    R: ReelRepository + SubmissionRepository + Send + Sync + 'static,
{
    let state = state.clone();
    scope.spawn(async move { reel_submissions(&state, &reel_id).await })
}

/// Start the owner-wide submissions fetch for the create view
pub fn open_owner_submissions<R>(
    scope: &ViewScope,
    state: &ReelsAppState<R>,
    owner: UserId,
) -> ScopedTask<Result<Vec<Submission>, Notice>>
where
    R: ReelRepository + SubmissionRepository + Send + Sync + 'static,
{
    let state = state.clone();
    scope.spawn(async move { owner_submissions(&state, &owner).await })
}
