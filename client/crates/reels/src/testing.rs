//! In-memory data store for tests

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{TimeZone, Utc};
use kernel::id::UserId;
use platform::client::ProviderError;

use crate::domain::entities::{NewReel, Reel, Submission};
use crate::domain::repository::{ReelRepository, SubmissionRepository};
use crate::domain::value_objects::ReelToken;
use crate::error::{ReelError, ReelResult};

#[derive(Default)]
pub struct FakeStore {
    reels: Mutex<Vec<Reel>>,
    submissions: Mutex<Vec<Submission>>,
    /// When set, every call fails with this provider message
    failure: Mutex<Option<String>>,
    create_calls: AtomicUsize,
    exists_calls: AtomicUsize,
    list_reel_calls: AtomicUsize,
    list_submission_calls: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reel(self, token: &str, owner: &str) -> Self {
        {
            let mut reels = self.reels.lock().unwrap();
            let id = reels.len() + 1;
            reels.push(Reel {
                id: id.to_string().into(),
                reel_id: ReelToken::from_stored(token),
                redirect_url: format!("https://example.com/{token}"),
                owner_id: UserId::from(owner),
            });
        }
        self
    }

    pub fn with_submission(self, token: &str, name: &str) -> Self {
        {
            let mut submissions = self.submissions.lock().unwrap();
            let id = submissions.len() + 1;
            submissions.push(Submission {
                id: id.to_string().into(),
                reel_id: ReelToken::from_stored(token),
                name: name.to_string(),
                username: format!("@{}", name.to_lowercase()),
                created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, id as u32).unwrap(),
            });
        }
        self
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn reels(&self) -> Vec<Reel> {
        self.reels.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn list_reel_calls(&self) -> usize {
        self.list_reel_calls.load(Ordering::SeqCst)
    }

    pub fn list_submission_calls(&self) -> usize {
        self.list_submission_calls.load(Ordering::SeqCst)
    }

    fn check(&self, operation: &'static str) -> ReelResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(ReelError::Store(ProviderError::Rejected {
                operation,
                status: 400,
                message,
            })),
            None => Ok(()),
        }
    }
}

impl ReelRepository for FakeStore {
    async fn create_identifier(&self, reel: &NewReel) -> ReelResult<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check("create reel")?;

        let mut reels = self.reels.lock().unwrap();
        if reels.iter().any(|r| r.reel_id == reel.reel_id) {
            return Err(ReelError::Store(ProviderError::Rejected {
                operation: "create reel",
                status: 409,
                message: "duplicate key value violates unique constraint \"reels_reelId_key\"".to_string(),
            }));
        }
        let id = reels.len() + 1;
        reels.push(Reel {
            id: id.to_string().into(),
            reel_id: reel.reel_id.clone(),
            redirect_url: reel.redirect_url.as_str().to_string(),
            owner_id: reel.owner_id.clone(),
        });
        Ok(())
    }

    async fn list_identifiers(&self, owner: &UserId) -> ReelResult<Vec<Reel>> {
        self.list_reel_calls.fetch_add(1, Ordering::SeqCst);
        self.check("list reels")?;

        Ok(self
            .reels
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn identifier_exists(&self, token: &ReelToken) -> ReelResult<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.check("check reel id")?;

        Ok(self.reels.lock().unwrap().iter().any(|r| &r.reel_id == token))
    }
}

impl SubmissionRepository for FakeStore {
    async fn list_submissions(&self, tokens: &[ReelToken]) -> ReelResult<Vec<Submission>> {
        self.list_submission_calls.fetch_add(1, Ordering::SeqCst);
        self.check("list submissions")?;

        let wanted: HashSet<&ReelToken> = tokens.iter().collect();
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| wanted.contains(&s.reel_id))
            .cloned()
            .collect())
    }

    async fn list_submissions_for_reel(&self, token: &ReelToken) -> ReelResult<Vec<Submission>> {
        self.list_submission_calls.fetch_add(1, Ordering::SeqCst);
        self.check("list reel submissions")?;

        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| &s.reel_id == token)
            .cloned()
            .collect())
    }
}
