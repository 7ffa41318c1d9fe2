//! PostgREST Repository Implementation
//!
//! Tables (column names as stored):
//! - `reels(id, reelId, redirectUrl, userId)`
//! - `submissions(id, reelId, name, username, created_at)`
//!
//! Row-level security on the hosted side decides what the bearer may see; the
//! owner filter here only narrows the result.

use chrono::{DateTime, Utc};
use kernel::id::{ReelRecordId, SubmissionId, UserId};
use platform::client::ProviderClient;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewReel, Reel, Submission};
use crate::domain::repository::{ReelRepository, SubmissionRepository};
use crate::domain::value_objects::ReelToken;
use crate::error::ReelResult;

const REELS_PATH: &str = "rest/v1/reels";
const SUBMISSIONS_PATH: &str = "rest/v1/submissions";

const REEL_COLUMNS: &str = "id,reelId,redirectUrl,userId";
const SUBMISSION_COLUMNS: &str = "id,reelId,name,username,created_at";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReelRow {
    id: ReelRecordId,
    reel_id: String,
    #[serde(default)]
    redirect_url: Option<String>,
    user_id: UserId,
}

impl From<ReelRow> for Reel {
    fn from(row: ReelRow) -> Self {
        Reel {
            id: row.id,
            reel_id: ReelToken::from_stored(row.reel_id),
            redirect_url: row.redirect_url.unwrap_or_default(),
            owner_id: row.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewReelRow<'a> {
    reel_id: &'a str,
    redirect_url: &'a str,
    user_id: &'a str,
}

impl<'a> From<&'a NewReel> for NewReelRow<'a> {
    fn from(reel: &'a NewReel) -> Self {
        Self {
            reel_id: reel.reel_id.as_str(),
            redirect_url: reel.redirect_url.as_str(),
            user_id: reel.owner_id.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmissionRow {
    id: SubmissionId,
    #[serde(rename = "reelId")]
    reel_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        Submission {
            id: row.id,
            reel_id: ReelToken::from_stored(row.reel_id),
            name: row.name.unwrap_or_default(),
            username: row.username.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

/// `eq.` filter value
fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

/// `in.(…)` filter value with every element quoted
fn in_filter(tokens: &[ReelToken]) -> String {
    let quoted: Vec<String> = tokens
        .iter()
        .map(|t| format!("\"{}\"", t.as_str().replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("in.({})", quoted.join(","))
}

/// PostgREST-backed reel and submission repository
#[derive(Clone)]
pub struct PostgrestRepository {
    client: ProviderClient,
}

impl PostgrestRepository {
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    async fn fetch_submissions(
        &self,
        filter: String,
        operation: &'static str,
    ) -> ReelResult<Vec<Submission>> {
        let request = self
            .client
            .request(Method::GET, SUBMISSIONS_PATH)
            .await?
            .query(&[("select", SUBMISSION_COLUMNS), ("reelId", filter.as_str())]);

        let rows: Vec<SubmissionRow> = self.client.send_json(request, operation).await?;
        Ok(rows.into_iter().map(Submission::from).collect())
    }
}

impl ReelRepository for PostgrestRepository {
    async fn create_identifier(&self, reel: &NewReel) -> ReelResult<()> {
        let request = self
            .client
            .request(Method::POST, REELS_PATH)
            .await?
            .header("Prefer", "return=minimal")
            .json(&[NewReelRow::from(reel)]);

        self.client.send(request, "create reel").await?;
        Ok(())
    }

    async fn list_identifiers(&self, owner: &UserId) -> ReelResult<Vec<Reel>> {
        let request = self
            .client
            .request(Method::GET, REELS_PATH)
            .await?
            .query(&[("select", REEL_COLUMNS), ("userId", eq_filter(owner.as_str()).as_str())]);

        let rows: Vec<ReelRow> = self.client.send_json(request, "list reels").await?;
        Ok(rows.into_iter().map(Reel::from).collect())
    }

    async fn identifier_exists(&self, token: &ReelToken) -> ReelResult<bool> {
        let request = self
            .client
            .request(Method::GET, REELS_PATH)
            .await?
            .query(&[
                ("select", "id"),
                ("reelId", eq_filter(token.as_str()).as_str()),
                ("limit", "1"),
            ]);

        let rows: Vec<serde_json::Value> =
            self.client.send_json(request, "check reel id").await?;
        Ok(!rows.is_empty())
    }
}

impl SubmissionRepository for PostgrestRepository {
    async fn list_submissions(&self, tokens: &[ReelToken]) -> ReelResult<Vec<Submission>> {
        self.fetch_submissions(in_filter(tokens), "list submissions").await
    }

    async fn list_submissions_for_reel(&self, token: &ReelToken) -> ReelResult<Vec<Submission>> {
        self.fetch_submissions(eq_filter(token.as_str()), "list reel submissions")
            .await
    }
}
