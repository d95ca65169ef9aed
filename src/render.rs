//! Static digest page rendering.
//!
//! Produces a single self-contained HTML document: styling, the
//! comment/reply toggles, and the video player bootstrapping are all
//! embedded, so the output can be dropped on any static host.
use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped, Render, DOCTYPE};

use crate::comments::{Comment, Reply};
use crate::feed::Post;
use crate::media::Media;

const STYLE: &str = r#"
:root {
    --primary-color: #1a1a1b;
    --secondary-color: #ffffff;
    --accent-color: #ff4500;
    --border-color: #343536;
    --card-bg: #222222;
    --comment-bg: #2d2d2d;
    --reply-bg: #3a3a3a;
}
* {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
    padding: 1rem;
    background: var(--primary-color);
    color: var(--secondary-color);
    line-height: 1.6;
}
.container {
    max-width: 800px;
    margin: 0 auto;
}
h1 {
    text-align: center;
    color: var(--accent-color);
    font-size: clamp(1.5rem, 5vw, 2.5rem);
    margin: 1rem 0;
}
.update-time {
    text-align: center;
    color: #808080;
    margin-bottom: 2rem;
    font-size: 0.9rem;
}
.post {
    margin-bottom: 2rem;
    padding: 1.25rem;
    border: 1px solid var(--border-color);
    border-radius: 12px;
    background: var(--card-bg);
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
}
.subreddit-name {
    color: var(--accent-color);
    font-weight: 600;
    margin-bottom: 0.5rem;
    font-size: 0.9rem;
}
.post-title {
    font-size: clamp(1.1rem, 4vw, 1.4rem);
    font-weight: bold;
    margin-bottom: 0.75rem;
}
.post-title a {
    color: var(--secondary-color);
    text-decoration: none;
}
.post-title a:hover {
    color: var(--accent-color);
}
.post-meta {
    display: flex;
    flex-wrap: wrap;
    gap: 1rem;
    margin-bottom: 1rem;
    font-size: 0.9rem;
}
.post-stats, .post-author, .post-date {
    color: #b3b3b3;
}
.post-content {
    margin: 1rem 0;
    font-size: 0.95rem;
}
.media-container {
    margin: 1rem 0;
    border-radius: 8px;
    overflow: hidden;
}
.media-container img, .media-container video {
    width: 100%;
    height: auto;
    display: block;
}
.comment-section-title {
    font-size: 1.1rem;
    margin: 1.5rem 0 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 1px solid var(--border-color);
}
.comment {
    margin: 1rem 0;
    padding: 1rem;
    border-left: 3px solid var(--accent-color);
    background: var(--comment-bg);
    border-radius: 0 8px 8px 0;
}
.comment-header {
    display: flex;
    flex-wrap: wrap;
    gap: 0.5rem;
    align-items: baseline;
    margin-bottom: 0.5rem;
}
.comment-author, .reply-author {
    color: #4fbcff;
    font-weight: 600;
}
.comment-meta, .reply-meta {
    font-size: 0.8rem;
    color: #b3b3b3;
}
.reply {
    margin: 0.75rem 0 0 1rem;
    padding: 0.75rem;
    border-left: 2px solid var(--accent-color);
    background: var(--reply-bg);
    border-radius: 4px;
}
.toggle-button {
    background-color: var(--accent-color);
    border: none;
    color: var(--secondary-color);
    font-size: 0.85rem;
    padding: 0.4rem 0.8rem;
    cursor: pointer;
    margin-bottom: 0.75rem;
    border-radius: 4px;
}
.collapsed {
    display: none;
}
@media (max-width: 600px) {
    body {
        padding: 0.5rem;
    }
    .post {
        padding: 1rem;
        margin-bottom: 1rem;
    }
    .reply {
        margin-left: 0.5rem;
    }
    .comment {
        padding: 0.75rem;
    }
}
"#;

const TOGGLE_SCRIPT: &str = r#"
document.addEventListener("DOMContentLoaded", function() {
    var commentSectionToggles = document.querySelectorAll(".toggle-comment-section");
    commentSectionToggles.forEach(button => {
        button.addEventListener("click", function() {
            var commentSection = button.nextElementSibling;
            if (commentSection.classList.contains("collapsed")) {
                commentSection.classList.remove("collapsed");
                button.textContent = "Hide Comments";
            } else {
                commentSection.classList.add("collapsed");
                button.textContent = "Show Comments";
            }
        });
    });

    var repliesToggles = document.querySelectorAll(".toggle-replies");
    repliesToggles.forEach(button => {
        button.addEventListener("click", function() {
            var repliesSection = button.nextElementSibling;
            if (repliesSection.classList.contains("collapsed")) {
                repliesSection.classList.remove("collapsed");
                button.textContent = "Hide Replies";
            } else {
                repliesSection.classList.add("collapsed");
                button.textContent = "Show Replies";
            }
        });
    });
});
"#;

/// Renders the digest page for an already-aggregated post list.
pub fn render_digest(posts: &[Post], generated_at: DateTime<Utc>) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Daily Reddit Feed" }
                style { (PreEscaped(STYLE)) }
                script src="https://cdn.dashjs.org/latest/dash.all.min.js" {}
                script src="https://cdn.jsdelivr.net/npm/hls.js@latest" {}
            }
            body {
                div class="container" {
                    h1 { "Daily Top Reddit Posts" }
                    p class="update-time" {
                        "Updated on " (generated_at.format("%Y-%m-%d %H:%M")) " UTC"
                    }
                    @for post in posts {
                        (PostCard { post })
                    }
                }
                script { (PreEscaped(TOGGLE_SCRIPT)) }
            }
        }
    }
}

struct PostCard<'a> {
    post: &'a Post,
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        html! {
            div class="post" {
                div class="subreddit-name" { "r/" (post.subreddit) }
                div class="post-title" {
                    a href=(post.permalink) target="_blank" { (post.title) }
                }
                div class="post-meta" {
                    span class="post-stats" { "↑ " (post.ups) " | " (post.num_comments) " comments" }
                    span class="post-author" { "u/" (post.author) }
                    span class="post-date" { (post.date) }
                }
                @if !post.body.is_empty() {
                    div class="post-content" { (post.body) }
                }
                @if let Some(media) = &post.media {
                    (MediaBlock { post_id: &post.id, media })
                }
                @if !post.comments.is_empty() {
                    h3 class="comment-section-title" { "Top Comments" }
                    button class="toggle-button toggle-comment-section" { "Show Comments" }
                    div class="comments-wrapper collapsed" {
                        @for comment in &post.comments {
                            (CommentBlock { comment })
                        }
                    }
                }
            }
        }
    }
}

struct MediaBlock<'a> {
    post_id: &'a str,
    media: &'a Media,
}

impl Render for MediaBlock<'_> {
    fn render(&self) -> Markup {
        match self.media {
            Media::Image { url } => html! {
                div class="media-container" {
                    img src=(url) alt="Post image" loading="lazy";
                }
            },
            Media::Video {
                dash_url,
                hls_url,
                fallback_url,
                ..
            } => html! {
                div class="media-container" {
                    video id={ "video" (self.post_id) } controls playsinline {}
                }
                script {
                    (PreEscaped(video_bootstrap(
                        self.post_id,
                        dash_url.as_deref(),
                        hls_url.as_deref(),
                        fallback_url.as_deref(),
                    )))
                }
            },
        }
    }
}

struct CommentBlock<'a> {
    comment: &'a Comment,
}

impl Render for CommentBlock<'_> {
    fn render(&self) -> Markup {
        let comment = self.comment;
        html! {
            div class="comment" {
                div class="comment-header" {
                    span class="comment-author" { "u/" (author_label(comment.author.as_deref())) }
                    span class="comment-meta" { "↑ " (comment.ups) " | " (comment.date) }
                }
                div class="comment-body" { (comment.body) }
                @if !comment.replies.is_empty() {
                    button class="toggle-button toggle-replies" { "Show Replies" }
                    div class="replies collapsed" {
                        @for reply in &comment.replies {
                            (ReplyBlock { reply })
                        }
                    }
                }
            }
        }
    }
}

struct ReplyBlock<'a> {
    reply: &'a Reply,
}

impl Render for ReplyBlock<'_> {
    fn render(&self) -> Markup {
        let reply = self.reply;
        html! {
            div class="reply" {
                div class="comment-header" {
                    span class="reply-author" { "u/" (author_label(reply.author.as_deref())) }
                    span class="reply-meta" { "↑ " (reply.ups) " | " (reply.date) }
                }
                div class="reply-body" { (reply.body) }
            }
        }
    }
}

fn author_label(author: Option<&str>) -> &str {
    author.unwrap_or("[deleted]")
}

/// Per-post player selection: dash.js when a DASH manifest exists,
/// hls.js (or native HLS) next, plain progressive `src` last.
fn video_bootstrap(
    post_id: &str,
    dash_url: Option<&str>,
    hls_url: Option<&str>,
    fallback_url: Option<&str>,
) -> String {
    format!(
        r##"
document.addEventListener("DOMContentLoaded", function() {{
    var dashUrl = "{dash}";
    var hlsUrl = "{hls}";
    var fallbackUrl = "{fallback}";
    var videoElement = document.querySelector("#video{post_id}");

    if (dashUrl) {{
        var player = dashjs.MediaPlayer().create();
        player.initialize(videoElement, dashUrl, true);
    }} else if (hlsUrl) {{
        if (Hls.isSupported()) {{
            var hls = new Hls();
            hls.loadSource(hlsUrl);
            hls.attachMedia(videoElement);
        }} else if (videoElement.canPlayType('application/vnd.apple.mpegurl')) {{
            videoElement.src = hlsUrl;
        }} else {{
            videoElement.src = fallbackUrl;
        }}
    }} else {{
        videoElement.src = fallbackUrl;
    }}
}});
"##,
        dash = js_string(dash_url.unwrap_or("")),
        hls = js_string(hls_url.unwrap_or("")),
        fallback = js_string(fallback_url.unwrap_or("")),
    )
}

/// Escapes a value for embedding in a double-quoted JS string literal.
/// `<` is escaped so a URL can never close the surrounding script tag.
fn js_string(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('<', "\\u003C")
}
