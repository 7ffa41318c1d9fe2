//! Domain Entities
//!
//! Core entities for the reels domain.

use chrono::{DateTime, Utc};
use kernel::id::{ReelRecordId, SubmissionId, UserId};
use serde::Serialize;

use crate::domain::value_objects::{RedirectUrl, ReelToken};

/// Reel entity - a stored token → redirect URL mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reel {
    pub id: ReelRecordId,
    pub reel_id: ReelToken,
    pub redirect_url: String,
    pub owner_id: UserId,
}

/// A reel about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReel {
    pub reel_id: ReelToken,
    pub redirect_url: RedirectUrl,
    pub owner_id: UserId,
}

/// Submission entity - collected by the public form, read-only here
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub reel_id: ReelToken,
    pub name: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
