// Contrail: posting-activity analytics for Bluesky accounts.
//
// The pipeline is linear: fetch raw feed items (bluesky), classify and
// enrich each one (classify), fold the batch into a summary (analytics),
// then render (output).

pub mod analytics;
pub mod bluesky;
pub mod classify;
pub mod config;
pub mod output;
pub mod util;
