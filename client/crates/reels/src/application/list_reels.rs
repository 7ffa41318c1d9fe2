//! List Reels Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::Reel;
use crate::domain::repository::ReelRepository;
use crate::error::{ReelError, ReelResult};

/// List Reels Use Case
pub struct ListReelsUseCase<R>
where
    R: ReelRepository,
{
    repo: Arc<R>,
}

impl<R> ListReelsUseCase<R>
where
    R: ReelRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: &UserId) -> ReelResult<Vec<Reel>> {
        let reels = self
            .repo
            .list_identifiers(owner)
            .await
            .inspect_err(ReelError::log)?;

        tracing::debug!(owner_id = %owner, count = reels.len(), "Listed reels");

        Ok(reels)
    }
}
