// Colored terminal output for profiles, activity summaries, and post
// listings. Display-only: nothing here feeds back into the analytics.

use chrono::Utc;
use colored::Colorize;

use crate::analytics::frequency::KeyCount;
use crate::analytics::summary::FeedSummary;
use crate::bluesky::profiles::Profile;
use crate::classify::Thing;
use crate::util::humanize_span;

use super::truncate_chars;

/// Display an account header.
pub fn display_profile(profile: &Profile) {
    println!("\n{}", format!("=== @{} ===", profile.handle).bold());
    if let Some(name) = &profile.display_name {
        println!("  {name}");
    }
    if let Some(description) = &profile.description {
        for line in description.lines() {
            println!("  {}", line.dimmed());
        }
    }
    println!(
        "  {} followers · {} following · {} posts",
        profile.followers_count, profile.follows_count, profile.posts_count
    );
    if let Some(created) = profile.created_at {
        println!(
            "  Joined {} ({} ago)",
            created.format("%Y-%m-%d"),
            humanize_span(created, Utc::now())
        );
    }
    println!("  {}", profile.url().dimmed());
}

/// Display the full activity summary.
pub fn display_summary(summary: &FeedSummary) {
    println!(
        "\n{}",
        format!("=== Posting activity ({} items) ===", summary.total_posts).bold()
    );

    println!("\n  {}", "Cadence".bold());
    println!("    Posts/day:   {:>6.1}", summary.posts_per_day);
    println!("    Replies/day: {:>6.1}", summary.replies_per_day);
    println!("    Reposts/day: {:>6.1}", summary.reposts_per_day);
    println!(
        "    Last 4h / 12h / 24h: {} / {} / {}",
        summary.posts_in_last_4_hours, summary.posts_in_last_12_hours,
        summary.posts_in_last_24_hours
    );

    println!("\n  {}", "Mix".bold());
    println!(
        "    {} original · {} replies · {} quotes · {} reposts",
        summary.post_types.original,
        summary.post_types.reply,
        summary.post_types.quote,
        summary.post_types.repost
    );
    println!(
        "    Media: {} image · {} video · {} text-only",
        summary.post_media_types.image, summary.post_media_types.video,
        summary.post_media_types.text
    );
    if summary.media.total_images > 0 {
        println!(
            "    Alt text: {}/{} images ({}%)",
            summary.media.images_with_alt, summary.media.total_images,
            summary.media.alt_text_percentage
        );
    }

    println!("\n  {}", "Engagement (per original post)".bold());
    println!(
        "    Likes:   {:>8} total, {:>6.1} avg",
        summary.engagement.likes.total, summary.engagement.likes.average
    );
    println!(
        "    Replies: {:>8} total, {:>6.1} avg",
        summary.engagement.replies.total, summary.engagement.replies.average
    );
    println!(
        "    Reposts: {:>8} total, {:>6.1} avg",
        summary.engagement.reposts.total, summary.engagement.reposts.average
    );
    println!(
        "    Quotes:  {:>8} total, {:>6.1} avg",
        summary.engagement.quotes.total, summary.engagement.quotes.average
    );

    println!("\n  {}", "Range".bold());
    println!(
        "    {} → {}  ({})",
        summary.date_range.earliest.format("%Y-%m-%d %H:%M"),
        summary.date_range.latest.format("%Y-%m-%d %H:%M"),
        summary.date_range.timespan
    );
    println!("    Timezone: {}", summary.timezone);

    display_table("Top linked domains", &summary.linked_domains, 10);
    display_table("Most interacted with", &summary.interacted_users, 10);
    println!();
}

fn display_table(title: &str, rows: &[KeyCount], limit: usize) {
    if rows.is_empty() {
        return;
    }
    println!("\n  {}", title.bold());
    for row in rows.iter().take(limit) {
        println!("    {:>4}  {}", row.count, row.key);
    }
}

/// Display a listing of classified posts, newest first.
pub fn display_things(things: &[Thing]) {
    if things.is_empty() {
        println!("No posts found.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Recent activity ({} items) ===", things.len()).bold()
    );

    for thing in things {
        let label = thing.sub_type().unwrap_or(thing.thing_type().as_str());
        let who = match thing.interacted_user() {
            Some(author) => format!("  → @{}", author.handle),
            None => String::new(),
        };
        println!(
            "\n  {:<16} {}  {} interactions{}",
            label.cyan(),
            thing.created_at.format("%Y-%m-%d %H:%M"),
            thing.interactions,
            who.dimmed()
        );
        let text = thing.post.record.text.trim();
        if !text.is_empty() {
            println!("    {}", truncate_chars(text, 120).dimmed());
        }
        println!("    {}", thing.url().dimmed());
    }
    println!();
}
