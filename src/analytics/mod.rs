// Batch analytics — frequency tables and the feed summary aggregator.

pub mod frequency;
pub mod summary;
