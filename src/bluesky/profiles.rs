// Profile lookup via `app.bsky.actor.getProfile`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::client::PublicAtpClient;

/// A Bluesky actor profile — the fields shown in the account header.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub did: String,
    pub handle: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "followersCount", default)]
    pub followers_count: i64,
    #[serde(rename = "followsCount", default)]
    pub follows_count: i64,
    #[serde(rename = "postsCount", default)]
    pub posts_count: i64,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Web URL of the profile on bsky.app.
    pub fn url(&self) -> String {
        format!("https://bsky.app/profile/{}", self.handle)
    }
}

/// Fetch a profile by handle or DID.
pub async fn get_profile(client: &PublicAtpClient, actor: &str) -> Result<Profile> {
    client
        .xrpc_get("app.bsky.actor.getProfile", &[("actor", actor)])
        .await
        .with_context(|| format!("Failed to fetch profile for @{actor}"))
}
