//! Feed aggregation: one normalized post list across all configured
//! subreddits.
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::client::Client;
use crate::comments::{self, Comment};
use crate::config::Config;
use crate::media::Media;
use crate::models::RawPost;

/// Appended to self-text cut at the character budget.
const TRUNCATION_MARKER: &str = "...";

/// A fully normalized post, ready for rendering.
#[derive(Clone, Debug)]
pub struct Post {
    /// Unique within a subreddit.
    pub id: String,
    pub subreddit: String,
    pub title: String,
    pub author: String,
    /// Absolute permalink to the comment page.
    pub permalink: String,
    pub ups: i64,
    pub num_comments: i64,
    pub created_utc: Option<f64>,
    /// Minute-resolution UTC timestamp, or `"N/A"`.
    pub date: String,
    /// Self-text, truncated to the configured budget.
    pub body: String,
    pub media: Option<Media>,
    pub comments: Vec<Comment>,
}

/// Collects the configured subreddits into one normalized post list.
///
/// One subreddit failing to list never aborts the run: the failure is
/// logged and the forum skipped, so the digest is built from whatever
/// remains. Likewise a failed comment fetch only costs that post its
/// comment section, not its place in the digest.
pub struct FeedAggregator<'a> {
    client: &'a Client,
    config: &'a Config,
}

impl<'a> FeedAggregator<'a> {
    pub fn new(client: &'a Client, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// Fetches and normalizes every configured subreddit, returning a
    /// single flat post list shuffled per run so no forum always leads
    /// the page.
    pub async fn collect(&self) -> Vec<Post> {
        let mut posts = Vec::new();

        for (subreddit, count) in &self.config.subreddits {
            let raw_posts = match self.client.top_posts(subreddit, *count).await {
                Ok(raw_posts) => raw_posts,
                Err(e) => {
                    warn!(subreddit = %subreddit, error = %e, "post listing failed, skipping subreddit");
                    continue;
                }
            };

            for raw in raw_posts {
                posts.push(self.normalize(subreddit, raw).await);
            }
        }

        posts.shuffle(&mut rand::thread_rng());
        info!(posts = posts.len(), "feed aggregated");
        posts
    }

    async fn normalize(&self, subreddit: &str, raw: RawPost) -> Post {
        let comments = match self.client.comments(subreddit, &raw.id).await {
            Ok(response) => comments::extract_comments(
                &response,
                self.config.comment_limit,
                self.config.reply_limit,
            ),
            Err(e) => {
                warn!(
                    subreddit = %subreddit,
                    post_id = %raw.id,
                    error = %e,
                    "comment fetch failed, keeping post without comments"
                );
                Vec::new()
            }
        };

        let media = Media::resolve(&raw);

        Post {
            permalink: format!("https://www.reddit.com{}", raw.permalink),
            date: comments::timestamp_label(raw.created_utc),
            body: truncate_body(&raw.selftext, self.config.body_budget),
            id: raw.id,
            subreddit: subreddit.to_string(),
            title: raw.title,
            author: raw.author,
            ups: raw.ups,
            num_comments: raw.num_comments,
            created_utc: raw.created_utc,
            media,
            comments,
        }
    }
}

/// Truncates `text` to `budget` characters, appending a marker when
/// anything was cut. Text at or under the budget is returned verbatim.
pub fn truncate_body(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(budget).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_pass_through_verbatim() {
        assert_eq!(truncate_body("hello", 500), "hello");
        assert_eq!(truncate_body("", 500), "");
    }

    #[test]
    fn body_at_the_budget_is_untouched() {
        let body = "a".repeat(500);
        assert_eq!(truncate_body(&body, 500), body);
    }

    #[test]
    fn long_bodies_are_cut_and_marked() {
        let body = "a".repeat(501);
        let truncated = truncate_body(&body, 500);
        assert_eq!(truncated.chars().count(), 500 + TRUNCATION_MARKER.len());
        assert!(truncated.starts_with(&"a".repeat(500)));
        assert!(truncated.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let body = "é".repeat(10);
        let truncated = truncate_body(&body, 4);
        assert_eq!(truncated, format!("{}{TRUNCATION_MARKER}", "é".repeat(4)));
    }
}
