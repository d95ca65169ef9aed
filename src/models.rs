//! The wire model of the Reddit listing API.
//!
//! Every object in a listing response is wrapped in a `kind`-tagged
//! envelope. Comment threads additionally mix node kinds (`t1` comments,
//! `more` placeholders) inside arbitrarily deep reply chains, and a
//! comment's `replies` field is an empty string rather than a listing
//! when it has no children. The types here absorb all of that so the
//! rest of the crate only ever sees comment nodes.
use serde::Deserialize;
use serde_json::Value;

/// The `kind`/`data` envelope wrapping every object in the API.
#[derive(Clone, Debug, Deserialize)]
pub struct Thing<T> {
    #[serde(default)]
    pub kind: String,
    pub data: T,
}

/// A page of children, as returned under a `Listing` thing.
#[derive(Clone, Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Listing<T> {
    #[serde(default)]
    pub children: Vec<T>,
}

/// A single node of a comment tree.
///
/// Only `t1` nodes carry comment data; every other kind (`more`
/// placeholders in particular) parses as [`Node::Other`] and is
/// ignored by the extractor.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind")]
pub enum Node {
    #[serde(rename = "t1")]
    Comment { data: RawComment },
    #[serde(other)]
    Other,
}

/// A post as it appears in a `/top` listing.
#[derive(Clone, Debug, Deserialize)]
pub struct RawPost {
    pub id: String,
    pub title: String,
    pub author: String,
    pub permalink: String,

    #[serde(default)]
    pub ups: i64,
    #[serde(default)]
    pub num_comments: i64,
    pub created_utc: Option<f64>,

    /// The text of this post, if a self-post.
    #[serde(default)]
    pub selftext: String,

    /// Content-type hint; `"image"` marks a directly displayable image.
    pub post_hint: Option<String>,
    #[serde(default)]
    pub is_video: bool,
    /// URL of the linked content.
    pub url: Option<String>,
    pub media: Option<RawMedia>,
}

/// The nested media metadata object on a post.
#[derive(Clone, Debug, Deserialize)]
pub struct RawMedia {
    pub reddit_video: Option<RedditVideo>,
}

/// Candidate source URLs for a Reddit-hosted video.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RedditVideo {
    pub dash_url: Option<String>,
    pub hls_url: Option<String>,
    /// Progressive download; typically video-only.
    pub fallback_url: Option<String>,
}

/// A comment payload inside a `t1` node.
#[derive(Clone, Debug, Deserialize)]
pub struct RawComment {
    /// Absent for deleted or removed authors.
    pub author: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub ups: i64,
    pub created_utc: Option<f64>,
    #[serde(default)]
    pub replies: Option<Replies>,
}

/// The `replies` field of a comment: a listing when children exist,
/// an empty string when none do.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Replies {
    Listing(Thing<Listing<Node>>),
    Other(Value),
}

impl RawComment {
    /// The child nodes of this comment, or an empty slice when the
    /// `replies` field is absent, empty, or not a listing.
    pub fn reply_nodes(&self) -> &[Node] {
        match &self.replies {
            Some(Replies::Listing(listing)) => &listing.data.children,
            _ => &[],
        }
    }
}
