// Author feed — wire types and paginated retrieval.
//
// The upstream JSON shape (app.bsky.feed.getAuthorFeed) is taken as a
// given: these serde types mirror exactly the fields the analysis reads
// and ignore the rest. Timestamps decode straight to DateTime<Utc>, so a
// malformed instant fails at the decoding boundary instead of leaking
// into the analytics.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, info};

use super::client::PublicAtpClient;

/// A post author as returned by the feed endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub did: String,
    pub handle: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub avatar: Option<String>,
}

/// The external-link block inside a record embed.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalLink {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// The embed stored on the post record as authored. Only the external-link
/// variant is read here; images and quoted records are analyzed from the
/// hydrated view embed instead.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordEmbed {
    #[serde(rename = "$type", default)]
    pub embed_type: String,
    pub external: Option<ExternalLink>,
}

/// The authored record of a post.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub embed: Option<RecordEmbed>,
}

/// An image attached to a post, from the hydrated view embed.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedImage {
    pub alt: Option<String>,
}

/// A record referenced by a quote-post embed.
///
/// Covers both shapes the API produces: `app.bsky.embed.record#view` puts
/// the author directly on the record, while
/// `app.bsky.embed.recordWithMedia#view` nests it one level deeper
/// (`embed.record.record.author`). Not-found and blocked records decode
/// with both fields absent.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedRecord {
    pub author: Option<Author>,
    pub record: Option<Box<EmbeddedRecord>>,
}

/// The hydrated embed on a post view.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewEmbed {
    #[serde(rename = "$type", default)]
    pub embed_type: String,
    #[serde(default)]
    pub images: Vec<EmbedImage>,
    pub record: Option<EmbeddedRecord>,
}

/// A single post view from the author feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub uri: String,
    pub cid: String,
    pub author: Author,
    pub record: PostRecord,
    pub embed: Option<ViewEmbed>,
    #[serde(rename = "replyCount", default)]
    pub reply_count: i64,
    #[serde(rename = "repostCount", default)]
    pub repost_count: i64,
    #[serde(rename = "likeCount", default)]
    pub like_count: i64,
    #[serde(rename = "quoteCount", default)]
    pub quote_count: i64,
    #[serde(rename = "indexedAt")]
    pub indexed_at: DateTime<Utc>,
}

/// One end of a reply chain. Root and parent may be not-found or blocked
/// views, in which case the author is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyTarget {
    pub author: Option<Author>,
}

/// The reply context attached to a feed item.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyRef {
    pub root: ReplyTarget,
    pub parent: ReplyTarget,
}

/// The reason a post appears in the feed. Present for reposts (and pins);
/// the type tag decides which.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedReason {
    #[serde(rename = "$type", default)]
    pub reason_type: String,
    pub by: Option<Author>,
    #[serde(rename = "indexedAt")]
    pub indexed_at: Option<DateTime<Utc>>,
}

/// One entry of the author feed: a post plus optional reply/repost context.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    pub post: Post,
    pub reply: Option<ReplyRef>,
    pub reason: Option<FeedReason>,
}

/// Response from `app.bsky.feed.getAuthorFeed`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorFeed {
    pub feed: Vec<FeedItem>,
    pub cursor: Option<String>,
}

/// Fetch one page of an author's feed (up to 100 items).
pub async fn fetch_feed_page(
    client: &PublicAtpClient,
    actor: &str,
    cursor: Option<&str>,
) -> Result<AuthorFeed> {
    let mut params: Vec<(&str, &str)> = vec![("actor", actor), ("limit", "100")];
    if let Some(c) = cursor {
        params.push(("cursor", c));
    }

    client
        .xrpc_get("app.bsky.feed.getAuthorFeed", &params)
        .await
        .with_context(|| format!("Failed to fetch feed for @{actor}"))
}

/// Fetch up to `batches` pages of an author's feed.
///
/// Pages must be fetched strictly in order — each cursor comes from the
/// previous response — with a fixed delay between pages to keep request
/// volume polite. An empty page or a missing cursor ends the walk early.
/// `on_page` is called after each page with (pages fetched, items so far).
pub async fn fetch_feed_batches(
    client: &PublicAtpClient,
    actor: &str,
    batches: usize,
    page_delay: Duration,
    mut on_page: impl FnMut(usize, usize),
) -> Result<Vec<FeedItem>> {
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    for page in 0..batches {
        if page > 0 {
            sleep(page_delay).await;
        }

        let response = fetch_feed_page(client, actor, cursor.as_deref()).await?;

        if response.feed.is_empty() {
            debug!(page = page + 1, "Empty feed page, stopping");
            break;
        }

        items.extend(response.feed);
        on_page(page + 1, items.len());

        debug!(
            page = page + 1,
            total_collected = items.len(),
            "Fetched feed page for @{}",
            actor
        );

        cursor = response.cursor;
        if cursor.is_none() {
            debug!("No cursor returned, feed exhausted");
            break;
        }
    }

    info!(count = items.len(), actor = actor, "Collected feed items");

    Ok(items)
}
