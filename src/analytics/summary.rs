// Batch aggregation — folds a classified feed into an activity summary.
//
// The aggregator is pure: it takes the enriched batch plus an injected
// "now" (the rolling windows are wall-clock-relative and tests need a
// fixed instant) and recomputes the whole summary from scratch each call.
// Degenerate inputs — empty batch, all-repost batch, zero images, zero
// date range — are explicit branches, never division-by-zero.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::classify::{media_type, MediaType, Thing, ThingType};
use crate::util::{self, extract_post_link};

use super::frequency::{count_frequencies, KeyCount};

/// Total and per-original-post average for one engagement counter.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EngagementStat {
    pub total: i64,
    pub average: f64,
}

/// Engagement totals and averages over original content only — a repost
/// carries the reposted author's counters and would skew the account's
/// own numbers.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EngagementSummary {
    pub replies: EngagementStat,
    pub likes: EngagementStat,
    pub reposts: EngagementStat,
    pub quotes: EngagementStat,
}

/// Per-category item counts across the whole batch.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TypeCounts {
    pub original: usize,
    pub reply: usize,
    pub quote: usize,
    pub repost: usize,
}

/// Media mix of original-content items.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MediaTypeCounts {
    pub image: usize,
    pub video: usize,
    pub text: usize,
}

/// Image and alt-text statistics over original-content items.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaStats {
    pub total_images: usize,
    pub images_with_alt: usize,
    pub alt_text_percentage: u32,
}

/// Earliest-to-latest effective timestamp across the batch.
#[derive(Debug, Clone, Serialize)]
pub struct DateRange {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
    pub timespan: String,
}

/// The aggregate analytics for one fetched batch. No identity beyond the
/// call that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSummary {
    pub total_posts: usize,
    pub original_post_count: usize,
    /// Originals that are neither replies nor quotes.
    pub regular_post_count: usize,
    pub posts_per_day: f64,
    pub reposts_per_day: f64,
    pub replies_per_day: f64,
    pub posts_in_last_4_hours: usize,
    pub posts_in_last_12_hours: usize,
    pub posts_in_last_24_hours: usize,
    pub post_types: TypeCounts,
    pub post_media_types: MediaTypeCounts,
    pub engagement: EngagementSummary,
    pub date_range: DateRange,
    pub media: MediaStats,
    pub linked_domains: Vec<KeyCount>,
    pub interacted_users: Vec<KeyCount>,
    pub timezone: String,
}

/// Aggregate a classified batch into a [`FeedSummary`].
///
/// Returns `None` for an empty batch. `now` anchors the rolling windows
/// and the degenerate all-repost date range.
pub fn summarize(things: &[Thing], now: DateTime<Utc>) -> Option<FeedSummary> {
    if things.is_empty() {
        return None;
    }

    // Frequency tables cover the full batch, reposts included.
    let linked_domains = count_frequencies(
        things
            .iter()
            .filter_map(|t| extract_post_link(&t.post.record))
            .map(|link| link.domain)
            .filter(|d| !d.is_empty()),
    );
    let interacted_users = count_frequencies(
        things
            .iter()
            .filter_map(|t| t.interacted_user())
            .map(|a| a.handle.clone())
            .filter(|h| !h.is_empty()),
    );

    let timezone = util::local_timezone_label();

    let originals: Vec<&Thing> = things.iter().filter(|t| t.is_original()).collect();

    // Nothing but reposts: every original-content metric is zero, but the
    // batch-wide counts and tables still stand.
    if originals.is_empty() {
        return Some(FeedSummary {
            total_posts: things.len(),
            original_post_count: 0,
            regular_post_count: 0,
            posts_per_day: 0.0,
            reposts_per_day: 0.0,
            replies_per_day: 0.0,
            posts_in_last_4_hours: 0,
            posts_in_last_12_hours: 0,
            posts_in_last_24_hours: 0,
            post_types: TypeCounts {
                repost: things.len(),
                ..TypeCounts::default()
            },
            post_media_types: MediaTypeCounts::default(),
            engagement: EngagementSummary::default(),
            date_range: DateRange {
                earliest: now,
                latest: now,
                timespan: "0 seconds".to_string(),
            },
            media: MediaStats::default(),
            linked_domains,
            interacted_users,
            timezone,
        });
    }

    // Date range spans the effective timestamps of the entire batch, not
    // just the originals.
    let earliest = things.iter().map(|t| t.created_at).min().unwrap_or(now);
    let latest = things.iter().map(|t| t.created_at).max().unwrap_or(now);
    let date_range_days = (latest - earliest).num_seconds() as f64 / 86_400.0;

    // A zero-length range (single item, identical timestamps) would turn
    // every rate into infinity; report 0 instead.
    let per_day = |count: usize| -> f64 {
        if date_range_days > 0.0 {
            round1(count as f64 / date_range_days)
        } else {
            0.0
        }
    };

    // Rolling windows count original content by its own record timestamp,
    // not the effective one.
    let window_count = |hours: i64| -> usize {
        let threshold = now - Duration::hours(hours);
        originals
            .iter()
            .filter(|t| t.post.record.created_at >= threshold)
            .count()
    };

    let mut post_types = TypeCounts::default();
    let mut post_media_types = MediaTypeCounts::default();
    let mut engagement = EngagementSummary::default();
    let mut total_images = 0usize;
    let mut images_with_alt = 0usize;

    for thing in things {
        match thing.thing_type() {
            ThingType::Original => post_types.original += 1,
            ThingType::Reply => post_types.reply += 1,
            ThingType::Quote => post_types.quote += 1,
            ThingType::Repost => post_types.repost += 1,
        }

        if !thing.is_original() {
            continue;
        }

        match media_type(&thing.post) {
            MediaType::Image => post_media_types.image += 1,
            MediaType::Video => post_media_types.video += 1,
            MediaType::Text => post_media_types.text += 1,
        }

        engagement.replies.total += thing.post.reply_count;
        engagement.likes.total += thing.post.like_count;
        engagement.reposts.total += thing.post.repost_count;
        engagement.quotes.total += thing.post.quote_count;

        if let Some(embed) = &thing.post.embed {
            total_images += embed.images.len();
            images_with_alt += embed
                .images
                .iter()
                .filter(|img| {
                    img.alt
                        .as_deref()
                        .is_some_and(|alt| alt.trim().chars().count() > 5)
                })
                .count();
        }
    }

    let original_count = originals.len();
    for stat in [
        &mut engagement.replies,
        &mut engagement.likes,
        &mut engagement.reposts,
        &mut engagement.quotes,
    ] {
        stat.average = round1(stat.total as f64 / original_count as f64);
    }

    let alt_text_percentage = if total_images > 0 {
        ((images_with_alt as f64 / total_images as f64) * 100.0).round() as u32
    } else {
        0
    };

    Some(FeedSummary {
        total_posts: things.len(),
        original_post_count: original_count,
        regular_post_count: post_types.original,
        posts_per_day: per_day(original_count),
        reposts_per_day: per_day(post_types.repost),
        replies_per_day: per_day(post_types.reply),
        posts_in_last_4_hours: window_count(4),
        posts_in_last_12_hours: window_count(12),
        posts_in_last_24_hours: window_count(24),
        post_types,
        post_media_types,
        engagement,
        date_range: DateRange {
            earliest,
            latest,
            timespan: util::humanize_span(earliest, latest),
        },
        media: MediaStats {
            total_images,
            images_with_alt,
            alt_text_percentage,
        },
        linked_domains,
        interacted_users,
        timezone,
    })
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
