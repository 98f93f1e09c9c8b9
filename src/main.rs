use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use contrail::bluesky::client::PublicAtpClient;
use contrail::bluesky::feed;
use contrail::bluesky::profiles;
use contrail::config::Config;
use contrail::{analytics, classify, output, util};

/// Contrail: posting-activity analytics for Bluesky.
///
/// Fetches an account's public author feed, classifies every item
/// (original, reply, repost, quote), and summarizes posting cadence,
/// engagement, media mix, linked domains, and most-interacted-with
/// accounts.
#[derive(Parser)]
#[command(name = "contrail", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch an account's feed and print the activity summary
    Analyze {
        /// The handle to analyze (e.g. someone.bsky.social)
        handle: String,

        /// Number of feed pages to fetch (up to 100 items each)
        #[arg(long)]
        batches: Option<usize>,

        /// Emit the summary as JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// List an account's recent posts with their classification
    Posts {
        /// The handle to list posts for
        handle: String,

        /// Max items to list
        #[arg(long, default_value = "25")]
        limit: usize,
    },

    /// Show an account's profile header
    Profile {
        /// The handle to look up
        handle: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("contrail=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let client = PublicAtpClient::new(&config.public_api_url)?;

    match cli.command {
        Commands::Analyze {
            handle,
            batches,
            json,
        } => {
            let handle = util::clean_handle_input(&handle);
            let batches = batches.unwrap_or(config.default_batches);

            let profile = profiles::get_profile(&client, &handle).await?;
            if !json {
                output::terminal::display_profile(&profile);
            }

            let items = fetch_with_progress(&client, &config, &handle, batches).await?;

            let things = classify::enrich_feed(items)?;
            info!(count = things.len(), "Classified feed items");

            match analytics::summary::summarize(&things, Utc::now()) {
                Some(summary) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&summary)?);
                    } else {
                        output::terminal::display_summary(&summary);
                    }
                }
                None => println!("No posts found for @{handle}."),
            }
        }

        Commands::Posts { handle, limit } => {
            let handle = util::clean_handle_input(&handle);

            let items = fetch_with_progress(&client, &config, &handle, 1).await?;

            let mut things = classify::enrich_feed(items)?;
            things.truncate(limit);
            output::terminal::display_things(&things);
        }

        Commands::Profile { handle } => {
            let handle = util::clean_handle_input(&handle);
            let profile = profiles::get_profile(&client, &handle).await?;
            output::terminal::display_profile(&profile);
        }
    }

    Ok(())
}

/// Walk the author feed with a progress bar over the page count.
async fn fetch_with_progress(
    client: &PublicAtpClient,
    config: &Config,
    handle: &str,
    batches: usize,
) -> Result<Vec<feed::FeedItem>> {
    let progress = ProgressBar::new(batches as u64);
    progress.set_style(ProgressStyle::with_template(
        "  Fetching feed {bar:24} {pos}/{len} pages {msg}",
    )?);

    let items = feed::fetch_feed_batches(
        client,
        handle,
        batches,
        Duration::from_millis(config.page_delay_ms),
        |_, total_items| {
            progress.inc(1);
            progress.set_message(format!("({total_items} items)"));
        },
    )
    .await?;

    progress.finish_and_clear();
    Ok(items)
}
