use chrono::Utc;
use reddigest::{render_digest, Client, Config, FeedAggregator};

#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("configuration");
    let client = Client::login(&config).await.expect("login");

    let posts = FeedAggregator::new(&client, &config).collect().await;
    println!("{}", render_digest(&posts, Utc::now()).into_string());
}
