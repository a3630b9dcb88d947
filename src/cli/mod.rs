pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::DEFAULT_LIMIT;

#[derive(Parser)]
#[command(name = "mattelevizion")]
#[command(about = "Read the news from a Ghost site", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/mattelevizion/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the latest posts
    Feed {
        /// Only posts with this tag slug
        #[arg(short, long)]
        tag: Option<String>,

        /// Number of posts
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,

        /// Page number, starting at 1
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Read one article
    Read {
        /// Article slug
        slug: String,

        /// Open the article in the browser instead of printing it
        #[arg(long)]
        browser: bool,
    },
    /// Show the article slug a link points to
    Resolve {
        /// App or site URL
        url: String,
    },
    /// Open the article a link points to
    Open {
        /// App or site URL
        url: String,
    },
    /// Read links and notification payloads from stdin and open articles
    Listen {
        /// Link the app was launched with
        #[arg(long)]
        initial_url: Option<String>,
    },
    /// List the feed tags
    Tags,
    /// Show configuration status
    Status,
    /// Push notification tools
    Push {
        #[command(subcommand)]
        action: PushAction,
    },
}

#[derive(Subcommand)]
pub enum PushAction {
    /// Store a device push token
    Register {
        token: String,
    },
    /// Mark a device push token inactive
    Unregister {
        token: String,
    },
    /// Route a notification data payload (JSON) as if it was tapped
    Tap {
        payload: String,
    },
}
