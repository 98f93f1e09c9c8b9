// Feed item classification and enrichment.
//
// Every feed item is exactly one of four thing types, decided in a fixed
// priority order: the repost reason marker wins, then the reply context,
// then a record embed (quote), and anything left is an original post.
// Classification runs first; extraction then trusts the detected
// category's required fields and fails loudly when one is missing.

use std::fmt;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::bluesky::feed::{Author, FeedItem, Post};

/// The four-way classification of a feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThingType {
    Original,
    Reply,
    Repost,
    Quote,
}

impl ThingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThingType::Original => "original",
            ThingType::Reply => "reply",
            ThingType::Repost => "repost",
            ThingType::Quote => "quote",
        }
    }
}

impl fmt::Display for ThingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide the thing type of a raw feed item.
///
/// The categories are not independently detectable — a repost of a reply
/// carries a reply block too — so the order of the checks is the contract.
pub fn classify(item: &FeedItem) -> ThingType {
    if item
        .reason
        .as_ref()
        .is_some_and(|r| r.reason_type.contains("reasonRepost"))
    {
        ThingType::Repost
    } else if item.reply.is_some() {
        ThingType::Reply
    } else if view_embed_type(&item.post).contains("app.bsky.embed.record") {
        ThingType::Quote
    } else {
        ThingType::Original
    }
}

/// Media classification of a post view, from the hydrated embed type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
    Text,
}

pub fn media_type(post: &Post) -> MediaType {
    let embed_type = view_embed_type(post);
    if embed_type.contains("app.bsky.embed.images") {
        MediaType::Image
    } else if embed_type.contains("app.bsky.embed.video") {
        MediaType::Video
    } else {
        MediaType::Text
    }
}

fn view_embed_type(post: &Post) -> &str {
    post.embed.as_ref().map_or("", |e| e.embed_type.as_str())
}

/// Category evidence — one variant per thing type, carrying exactly the
/// fields that category guarantees. This is what makes "interacted user is
/// defined iff the item is not an original" a type-level fact.
#[derive(Debug, Clone)]
pub enum ThingDetail {
    Original,
    /// The parent post's author is who the reply is directed at.
    Reply { parent_author: Author },
    /// The reposted post's original author.
    Repost { author: Author },
    /// The quoted post's author. `with_media` marks the record-with-media
    /// embed variant, where the author sits one level deeper.
    Quote { author: Author, with_media: bool },
}

/// A classified, enriched feed item. Immutable once built.
#[derive(Debug, Clone)]
pub struct Thing {
    /// The underlying post view, as fetched.
    pub post: Post,
    pub detail: ThingDetail,
    /// Effective timestamp: the repost's own indexedAt for reposts, the
    /// record's createdAt otherwise. Always copied from upstream.
    pub created_at: DateTime<Utc>,
    /// Sum of the four engagement counters, missing ones counted as zero.
    /// Computed for every item including reposts — a repost carries the
    /// reposted author's counters, which is why aggregate engagement math
    /// excludes reposts.
    pub interactions: i64,
}

impl Thing {
    /// Classify one raw feed item and extract its enriched record.
    ///
    /// An item whose detected category is missing a structurally required
    /// nested field (a reply without a parent author, a quote without a
    /// quoted author, a repost reason without a timestamp) is a
    /// data-integrity error, not a recoverable condition.
    pub fn from_feed_item(item: FeedItem) -> Result<Self> {
        let thing_type = classify(&item);
        let FeedItem {
            post,
            reply,
            reason,
        } = item;

        let created_at = if thing_type == ThingType::Repost {
            reason
                .as_ref()
                .and_then(|r| r.indexed_at)
                .with_context(|| format!("Repost item {} has no reason timestamp", post.uri))?
        } else {
            post.record.created_at
        };

        let detail = match thing_type {
            ThingType::Original => ThingDetail::Original,
            ThingType::Repost => ThingDetail::Repost {
                author: post.author.clone(),
            },
            ThingType::Reply => {
                let parent_author = reply
                    .and_then(|r| r.parent.author)
                    .with_context(|| format!("Reply item {} has no parent author", post.uri))?;
                ThingDetail::Reply { parent_author }
            }
            ThingType::Quote => {
                let embed = post.embed.as_ref();
                let with_media =
                    embed.is_some_and(|e| e.embed_type.contains("embed.recordWithMedia#view"));
                let quoted = embed.and_then(|e| e.record.as_ref());
                // The media-wrapped variant nests the quoted record one
                // level deeper: embed.record.record.author.
                let author = if with_media {
                    quoted
                        .and_then(|r| r.record.as_deref())
                        .and_then(|r| r.author.clone())
                } else {
                    quoted.and_then(|r| r.author.clone())
                };
                ThingDetail::Quote {
                    author: author.with_context(|| {
                        format!("Quote item {} has no quoted record author", post.uri)
                    })?,
                    with_media,
                }
            }
        };

        let interactions =
            post.like_count + post.repost_count + post.reply_count + post.quote_count;

        Ok(Self {
            post,
            detail,
            created_at,
            interactions,
        })
    }

    pub fn thing_type(&self) -> ThingType {
        match self.detail {
            ThingDetail::Original => ThingType::Original,
            ThingDetail::Reply { .. } => ThingType::Reply,
            ThingDetail::Repost { .. } => ThingType::Repost,
            ThingDetail::Quote { .. } => ThingType::Quote,
        }
    }

    /// Sub-kind label; currently only the media-wrapped quote variant.
    pub fn sub_type(&self) -> Option<&'static str> {
        match self.detail {
            ThingDetail::Quote {
                with_media: true, ..
            } => Some("quote-with-media"),
            _ => None,
        }
    }

    /// Everything except a repost counts as the account's own content.
    pub fn is_original(&self) -> bool {
        !matches!(self.detail, ThingDetail::Repost { .. })
    }

    /// The account this activity is directed at: the parent's author for a
    /// reply, the reposted author for a repost, the quoted author for a
    /// quote. `None` for an original post.
    pub fn interacted_user(&self) -> Option<&Author> {
        match &self.detail {
            ThingDetail::Original => None,
            ThingDetail::Reply { parent_author } => Some(parent_author),
            ThingDetail::Repost { author } => Some(author),
            ThingDetail::Quote { author, .. } => Some(author),
        }
    }

    /// Direct web URL of the post on bsky.app.
    pub fn url(&self) -> String {
        let post_id = self.post.uri.rsplit('/').next().unwrap_or("");
        format!(
            "https://bsky.app/profile/{}/post/{}",
            self.post.author.handle, post_id
        )
    }
}

/// Classify and enrich a whole batch, preserving feed order.
///
/// A structural error on any item aborts the batch — a partial summary
/// with silently dropped items would misrepresent the account.
pub fn enrich_feed(items: Vec<FeedItem>) -> Result<Vec<Thing>> {
    items.into_iter().map(Thing::from_feed_item).collect()
}
