//! Bounded extraction of comment threads.
//!
//! The comments endpoint returns a two-element array: element 0
//! describes the post, element 1 is the comment listing. The listing
//! nests replies to arbitrary depth and interleaves non-comment nodes
//! (`more` placeholders). [`extract_comments`] flattens that to exactly
//! one level of nesting and hard-limits fan-out at both levels, so the
//! digest stays bounded no matter how large the underlying thread is.
use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{Listing, Node, RawComment, Thing};

/// Shown when a comment carries no creation timestamp.
const DATE_UNAVAILABLE: &str = "N/A";

/// A top-level comment on a post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    /// Absent for deleted or removed authors.
    pub author: Option<String>,
    pub body: String,
    pub ups: i64,
    /// Minute-resolution UTC timestamp, or `"N/A"`.
    pub date: String,
    pub replies: Vec<Reply>,
}

/// A direct reply to a [`Comment`]. Deeper descendants are not kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub author: Option<String>,
    pub body: String,
    pub ups: i64,
    pub date: String,
}

/// Extracts at most `limit` top-level comments from a raw thread
/// response, each carrying at most `reply_limit` replies.
///
/// Nodes whose kind is not `t1` are skipped without consuming a slot.
/// A response that is not the expected two-element shape, or whose
/// listing does not decode, yields an empty vector; the API does not
/// guarantee the shape (posts with comments disabled, for one).
pub fn extract_comments(response: &Value, limit: usize, reply_limit: usize) -> Vec<Comment> {
    let Some(parts) = response.as_array() else {
        return Vec::new();
    };
    if parts.len() < 2 {
        return Vec::new();
    }
    let Ok(thread) = Thing::<Listing<Node>>::deserialize(&parts[1]) else {
        return Vec::new();
    };

    let mut comments = Vec::new();
    for node in &thread.data.children {
        if comments.len() >= limit {
            break;
        }
        let Node::Comment { data } = node else {
            continue;
        };
        comments.push(build_comment(data, reply_limit));
    }
    comments
}

fn build_comment(raw: &RawComment, reply_limit: usize) -> Comment {
    let replies = raw
        .reply_nodes()
        .iter()
        .filter_map(|node| match node {
            Node::Comment { data } => Some(Reply {
                author: data.author.clone(),
                body: data.body.clone(),
                ups: data.ups,
                date: timestamp_label(data.created_utc),
            }),
            Node::Other => None,
        })
        .take(reply_limit)
        .collect();

    Comment {
        author: raw.author.clone(),
        body: raw.body.clone(),
        ups: raw.ups,
        date: timestamp_label(raw.created_utc),
        replies,
    }
}

/// Formats epoch seconds as a minute-resolution UTC string, or `"N/A"`
/// when absent.
pub(crate) fn timestamp_label(created_utc: Option<f64>) -> String {
    created_utc
        .and_then(|secs| DateTime::from_timestamp(secs as i64, 0))
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| DATE_UNAVAILABLE.to_string())
}
