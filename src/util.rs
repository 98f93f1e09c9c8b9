// Shared helpers: handle cleanup, URL domain normalization, link
// extraction, and rough duration humanization.

use chrono::{DateTime, Local, Utc};
use url::Url;

use crate::bluesky::feed::PostRecord;

/// Normalize raw handle input: trim, lowercase, strip a leading `@`, and
/// assume the bsky.social domain when none is given.
pub fn clean_handle_input(raw: &str) -> String {
    let mut handle = raw.trim().to_lowercase();
    if let Some(stripped) = handle.strip_prefix('@') {
        handle = stripped.to_string();
    }
    if !handle.is_empty() && !handle.contains('.') {
        handle = format!("{handle}.bsky.social");
    }
    handle
}

/// Extract and normalize the domain of a URL: lowercase host, one trailing
/// slash stripped, leading `www.` stripped. Invalid URLs normalize to an
/// empty string so callers can skip them.
pub fn extract_url_domain(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let mut host = match parsed.host_str() {
        Some(h) => h.to_lowercase(),
        None => return String::new(),
    };
    if let Some(stripped) = host.strip_suffix('/') {
        host = stripped.to_string();
    }
    if let Some(stripped) = host.strip_prefix("www.") {
        host = stripped.to_string();
    }
    host
}

/// A link carried by a post's external embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLink {
    pub url: String,
    pub title: String,
    pub domain: String,
}

/// Extract link information from a post record's external embed, if any.
pub fn extract_post_link(record: &PostRecord) -> Option<PostLink> {
    let embed = record.embed.as_ref()?;
    if embed.embed_type != "app.bsky.embed.external" {
        return None;
    }
    let external = embed.external.as_ref()?;
    Some(PostLink {
        url: external.uri.clone(),
        title: external.title.clone(),
        domain: extract_url_domain(&external.uri),
    })
}

const SPAN_UNITS: [(&str, i64); 7] = [
    ("year", 365 * 86_400),
    ("month", 30 * 86_400),
    ("week", 7 * 86_400),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
    ("second", 1),
];

/// Roughly humanize the duration between two instants, keeping the leading
/// unit and, when nonzero, the unit right after it ("1 year, 2 months",
/// "3 hours, 10 minutes"). Months and years are calendar approximations.
pub fn humanize_span(earliest: DateTime<Utc>, latest: DateTime<Utc>) -> String {
    let mut remaining = (latest - earliest).num_seconds().max(0);
    let mut parts: Vec<String> = Vec::new();

    for (name, unit_secs) in SPAN_UNITS {
        if parts.len() == 2 {
            break;
        }
        let value = remaining / unit_secs;
        if value > 0 {
            parts.push(format_unit(value, name));
            remaining -= value * unit_secs;
        } else if !parts.is_empty() {
            // Only the unit adjacent to the leading one is kept.
            break;
        }
    }

    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(", ")
    }
}

fn format_unit(value: i64, name: &str) -> String {
    if value == 1 {
        format!("1 {name}")
    } else {
        format!("{value} {name}s")
    }
}

/// Label for the machine-local UTC offset (e.g. "+02:00").
pub fn local_timezone_label() -> String {
    Local::now().offset().to_string()
}
