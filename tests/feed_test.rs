//! Integration tests for the aggregation pipeline, against a mock
//! OAuth + listing server.

use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reddigest::{AuthError, Client, Config, FeedAggregator};

/// A test configuration pointing every endpoint at the mock server.
fn test_config(server: &MockServer, subreddits: Vec<(String, u32)>) -> Config {
    Config {
        token_url: format!("{}/api/v1/access_token", server.uri()),
        api_base: server.uri(),
        subreddits,
        ..Config::for_testing()
    }
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "token_type": "bearer",
            "expires_in": 86400,
            "scope": "*",
        })))
        .mount(server)
        .await;
}

fn post_json(id: &str, title: &str) -> Value {
    json!({
        "kind": "t3",
        "data": {
            "id": id,
            "title": title,
            "author": "someone",
            "permalink": format!("/r/test/comments/{id}/slug/"),
            "ups": 42,
            "num_comments": 7,
            "created_utc": 1_700_000_000.0,
            "selftext": "",
            "is_video": false,
        }
    })
}

fn listing_json(posts: Vec<Value>) -> Value {
    json!({ "kind": "Listing", "data": { "children": posts } })
}

fn comment_json(author: &str, body: &str) -> Value {
    json!({
        "kind": "t1",
        "data": {
            "author": author,
            "body": body,
            "ups": 3,
            "created_utc": 1_700_000_000.0,
            "replies": "",
        }
    })
}

fn thread_json(comments: Vec<Value>) -> Value {
    json!([
        { "kind": "Listing", "data": { "children": [] } },
        { "kind": "Listing", "data": { "children": comments } },
    ])
}

async fn mount_listing(server: &MockServer, subreddit: &str, posts: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/r/{subreddit}/top")))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_json(posts)))
        .mount(server)
        .await;
}

async fn mount_comments(server: &MockServer, subreddit: &str, post_id: &str, comments: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/r/{subreddit}/comments/{post_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(thread_json(comments)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn aggregates_posts_across_subreddits() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    let mut video_post = post_json("vid1", "A video post");
    video_post["data"]["is_video"] = json!(true);
    video_post["data"]["media"] = json!({
        "reddit_video": {
            "dash_url": null,
            "hls_url": "http://x/h.m3u8",
            "fallback_url": "http://x/f.mp4",
        }
    });

    mount_listing(
        &server,
        "rust",
        vec![post_json("aaa", "First rust post"), video_post],
    )
    .await;
    mount_listing(&server, "pics", vec![post_json("bbb", "A picture")]).await;

    mount_comments(
        &server,
        "rust",
        "aaa",
        vec![
            comment_json("alice", "nice"),
            comment_json("bob", "very nice"),
        ],
    )
    .await;
    mount_comments(&server, "rust", "vid1", vec![]).await;
    mount_comments(&server, "pics", "bbb", vec![comment_json("carol", "wow")]).await;

    let config = test_config(
        &server,
        vec![("rust".to_string(), 2), ("pics".to_string(), 1)],
    );
    let client = Client::login(&config).await.expect("login");
    let posts = FeedAggregator::new(&client, &config).collect().await;

    assert_eq!(posts.len(), 3);

    let first = posts.iter().find(|p| p.id == "aaa").expect("post aaa");
    assert_eq!(first.subreddit, "rust");
    assert_eq!(first.title, "First rust post");
    assert_eq!(first.permalink, "https://www.reddit.com/r/test/comments/aaa/slug/");
    assert_eq!(first.ups, 42);
    assert_eq!(first.date, "2023-11-14 22:13");
    assert_eq!(first.comments.len(), 2);
    assert_eq!(first.comments[0].body, "nice");

    let video = posts.iter().find(|p| p.id == "vid1").expect("post vid1");
    let media = video.media.as_ref().expect("resolved media");
    assert_eq!(media.url(), "http://x/h.m3u8");
    assert!(video.comments.is_empty());

    let picture = posts.iter().find(|p| p.id == "bbb").expect("post bbb");
    assert_eq!(picture.subreddit, "pics");
    assert_eq!(picture.comments.len(), 1);
}

#[tokio::test]
async fn skips_a_subreddit_whose_listing_fails() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/broken/top"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_listing(&server, "healthy", vec![post_json("ok1", "Still here")]).await;
    mount_comments(&server, "healthy", "ok1", vec![]).await;

    let config = test_config(
        &server,
        vec![("broken".to_string(), 3), ("healthy".to_string(), 1)],
    );
    let client = Client::login(&config).await.expect("login");
    let posts = FeedAggregator::new(&client, &config).collect().await;

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].subreddit, "healthy");
}

#[tokio::test]
async fn keeps_post_when_comment_fetch_fails() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    mount_listing(&server, "rust", vec![post_json("aaa", "Quiet post")]).await;
    Mock::given(method("GET"))
        .and(path("/r/rust/comments/aaa"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&server, vec![("rust".to_string(), 1)]);
    let client = Client::login(&config).await.expect("login");
    let posts = FeedAggregator::new(&client, &config).collect().await;

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "aaa");
    assert!(posts[0].comments.is_empty());
}

#[tokio::test]
async fn login_sends_a_password_grant() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=tester"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server, Vec::new());
    Client::login(&config).await.expect("login");
}

#[tokio::test]
async fn login_failure_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let config = test_config(&server, Vec::new());
    let error = Client::login(&config).await.expect_err("login must fail");
    assert!(matches!(error, AuthError::Rejected(status) if status.as_u16() == 401));
}
