//! # reddigest
//!
//! The `reddigest` crate builds a static HTML digest of the day's top
//! posts across a configured set of subreddits, comment threads and
//! playable media included.
//!
//! ## Building the daily digest
//!
//! The following example shows a full run: sign in with the
//! password-grant credentials from the environment, aggregate every
//! configured subreddit, and write the rendered page.
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use reddigest::{render_digest, Client, Config, FeedAggregator};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let client = Client::login(&config).await?;
//!
//! let posts = FeedAggregator::new(&client, &config).collect().await;
//! let page = render_digest(&posts, Utc::now());
//! std::fs::write("docs/index.html", page.into_string())?;
//! # Ok(())
//! # }
//! ```
//!
//! **NOTE**: a [`Client`] holds the bearer token for the whole run —
//! create one and reuse it across every listing call.
//!
//! ## Listing a single subreddit
//!
//! The lower-level listing calls are available directly when the full
//! aggregation pipeline is not wanted.
//!
//! ```rust,no_run
//! use reddigest::{Client, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let client = Client::login(&Config::from_env()?).await?;
//!
//! for post in client.top_posts("askreddit", 5).await? {
//!     println!("{} ({} ups)", post.title, post.ups);
//! }
//! # Ok(())
//! # }
//! ```

pub mod models;

mod client;
mod comments;
mod config;
mod feed;
mod media;
mod render;

pub use client::{AuthError, Client, TransportError};
pub use comments::{extract_comments, Comment, Reply};
pub use config::{Config, ConfigError, Credentials};
pub use feed::{truncate_body, FeedAggregator, Post};
pub use media::Media;
pub use render::render_digest;
