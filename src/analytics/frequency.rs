// Ranked frequency tables.
//
// Counting is a single fold that records first-encounter order; ranking is
// a separate stable sort, so equal counts keep the order in which their
// keys first appeared in the feed.

use std::collections::HashMap;

use serde::Serialize;

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

/// Fold an iterator of keys into a frequency table sorted by count
/// descending, ties in first-encounter order.
pub fn count_frequencies<I>(keys: I) -> Vec<KeyCount>
where
    I: IntoIterator<Item = String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for key in keys {
        if !counts.contains_key(&key) {
            order.push(key.clone());
        }
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut table: Vec<KeyCount> = order
        .into_iter()
        .map(|key| {
            let count = counts.remove(&key).unwrap_or(0);
            KeyCount { key, count }
        })
        .collect();

    // Vec::sort_by is stable, which is what preserves tie order.
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}
