// Public AT Protocol API surface — XRPC client, author feed, profiles.
//
// Everything here is read-only against the public endpoint; no auth flow.

pub mod client;
pub mod feed;
pub mod profiles;
