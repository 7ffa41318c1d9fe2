//! Create Reel Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::ReelsConfig;
use crate::domain::entities::NewReel;
use crate::domain::repository::ReelRepository;
use crate::domain::services::share_link;
use crate::domain::value_objects::{RedirectUrl, ReelToken};
use crate::error::{ReelError, ReelResult};

/// Input DTO for create reel
#[derive(Debug, Clone)]
pub struct CreateReelInput {
    /// Signed-in user, if any
    pub owner: Option<UserId>,
    pub redirect_url: String,
}

/// Output DTO for create reel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReelOutput {
    pub reel_id: ReelToken,
    pub share_link: String,
}

/// Create Reel Use Case
///
/// Tokens are checked against existing reels before insertion. The check and
/// the insert are separate requests, so a reel created elsewhere in between
/// can still collide; the store's rejection is then surfaced as-is.
pub struct CreateReelUseCase<R>
where
    R: ReelRepository,
{
    repo: Arc<R>,
    config: Arc<ReelsConfig>,
}

impl<R> CreateReelUseCase<R>
where
    R: ReelRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ReelsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: CreateReelInput) -> ReelResult<CreateReelOutput> {
        self.execute_with(input, ReelToken::generate).await
    }

    /// Same as [`Self::execute`] with a caller-supplied token generator
    pub async fn execute_with<G>(
        &self,
        input: CreateReelInput,
        mut generate: G,
    ) -> ReelResult<CreateReelOutput>
    where
        G: FnMut() -> ReelToken + Send,
    {
        let owner_id = input.owner.ok_or(ReelError::NotSignedIn)?;
        let redirect_url = RedirectUrl::new(&input.redirect_url)?;

        let reel_id = self.free_token(&mut generate).await?;

        let reel = NewReel {
            reel_id,
            redirect_url,
            owner_id,
        };
        self.repo
            .create_identifier(&reel)
            .await
            .inspect_err(ReelError::log)?;

        tracing::info!(
            reel_id = %reel.reel_id,
            owner_id = %reel.owner_id,
            "Reel created"
        );

        Ok(CreateReelOutput {
            share_link: share_link(&self.config.share_base_url, &reel.reel_id),
            reel_id: reel.reel_id,
        })
    }

    async fn free_token<G>(&self, generate: &mut G) -> ReelResult<ReelToken>
    where
        G: FnMut() -> ReelToken + Send,
    {
        let attempts = self.config.token_attempts.max(1);

        for attempt in 1..=attempts {
            let token = generate();
            let taken = self
                .repo
                .identifier_exists(&token)
                .await
                .inspect_err(ReelError::log)?;

            if !taken {
                return Ok(token);
            }
            tracing::debug!(reel_id = %token, attempt, "ReelID already taken, retrying");
        }

        let err = ReelError::TokenExhausted { attempts };
        err.log();
        Err(err)
    }
}
