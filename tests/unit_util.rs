// Unit tests for handle cleanup, domain normalization, link extraction,
// duration humanization, and display truncation.

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use contrail::bluesky::feed::PostRecord;
use contrail::output::truncate_chars;
use contrail::util::{clean_handle_input, extract_post_link, extract_url_domain, humanize_span};

// ============================================================
// Handle cleanup
// ============================================================

#[test]
fn clean_handle_strips_at_and_lowercases() {
    assert_eq!(clean_handle_input("@Someone.Bsky.Social"), "someone.bsky.social");
}

#[test]
fn clean_handle_trims_whitespace() {
    assert_eq!(clean_handle_input("  someone.bsky.social  "), "someone.bsky.social");
}

#[test]
fn bare_name_gets_default_domain() {
    assert_eq!(clean_handle_input("someone"), "someone.bsky.social");
    assert_eq!(clean_handle_input("@someone"), "someone.bsky.social");
}

#[test]
fn custom_domain_is_left_alone() {
    assert_eq!(clean_handle_input("name.example.com"), "name.example.com");
}

#[test]
fn empty_input_stays_empty() {
    assert_eq!(clean_handle_input(""), "");
    assert_eq!(clean_handle_input("   "), "");
}

// ============================================================
// Domain normalization
// ============================================================

#[test]
fn domain_is_lowercased_and_stripped() {
    assert_eq!(
        extract_url_domain("https://WWW.Example.com/page/"),
        "example.com"
    );
}

#[test]
fn domain_keeps_subdomains_other_than_www() {
    assert_eq!(
        extract_url_domain("https://blog.example.com/post"),
        "blog.example.com"
    );
}

#[test]
fn invalid_url_normalizes_to_empty() {
    assert_eq!(extract_url_domain("not-a-url"), "");
    assert_eq!(extract_url_domain(""), "");
}

#[test]
fn url_without_host_normalizes_to_empty() {
    assert_eq!(extract_url_domain("mailto:someone@example.com"), "");
}

// ============================================================
// Link extraction
// ============================================================

#[test]
fn external_embed_yields_a_link() {
    let record: PostRecord = serde_json::from_value(json!({
        "text": "check this out",
        "createdAt": "2024-01-01T00:00:00Z",
        "embed": {
            "$type": "app.bsky.embed.external",
            "external": {
                "uri": "https://www.example.com/story",
                "title": "A story"
            }
        }
    }))
    .unwrap();

    let link = extract_post_link(&record).unwrap();
    assert_eq!(link.url, "https://www.example.com/story");
    assert_eq!(link.title, "A story");
    assert_eq!(link.domain, "example.com");
}

#[test]
fn non_external_embed_yields_no_link() {
    let record: PostRecord = serde_json::from_value(json!({
        "text": "a picture",
        "createdAt": "2024-01-01T00:00:00Z",
        "embed": { "$type": "app.bsky.embed.images" }
    }))
    .unwrap();

    assert!(extract_post_link(&record).is_none());
}

#[test]
fn plain_record_yields_no_link() {
    let record: PostRecord = serde_json::from_value(json!({
        "text": "nothing here",
        "createdAt": "2024-01-01T00:00:00Z"
    }))
    .unwrap();

    assert!(extract_post_link(&record).is_none());
}

// ============================================================
// Duration humanization
// ============================================================

#[test]
fn zero_span_reads_zero_seconds() {
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(humanize_span(t, t), "0 seconds");
}

#[test]
fn reversed_span_reads_zero_seconds() {
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(humanize_span(t + Duration::hours(1), t), "0 seconds");
}

#[test]
fn span_keeps_two_adjacent_units() {
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(
        humanize_span(t, t + Duration::hours(2) + Duration::minutes(30)),
        "2 hours, 30 minutes"
    );
}

#[test]
fn span_stops_at_a_zero_unit() {
    // 1 day and 5 minutes: the hours slot is empty, so minutes are dropped.
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(
        humanize_span(t, t + Duration::days(1) + Duration::minutes(5)),
        "1 day"
    );
}

#[test]
fn long_spans_use_calendar_approximations() {
    let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(
        humanize_span(t, t + Duration::days(400)),
        "1 year, 1 month"
    );
}

#[test]
fn units_pluralize() {
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(humanize_span(t, t + Duration::seconds(1)), "1 second");
    assert_eq!(humanize_span(t, t + Duration::seconds(45)), "45 seconds");
    assert_eq!(humanize_span(t, t + Duration::days(14)), "2 weeks");
}

// ============================================================
// Truncation
// ============================================================

#[test]
fn short_text_is_untouched() {
    assert_eq!(truncate_chars("hello", 10), "hello");
    assert_eq!(truncate_chars("hello", 5), "hello");
}

#[test]
fn long_text_is_cut_with_ellipsis() {
    assert_eq!(truncate_chars("hello world", 5), "hello...");
}

#[test]
fn truncation_counts_chars_not_bytes() {
    // Each snowman is 3 bytes; cutting by bytes would split one in half.
    assert_eq!(truncate_chars("☃☃☃☃", 2), "☃☃...");
}
