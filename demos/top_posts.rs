use reddigest::{Client, Config};

#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("configuration");
    let client = Client::login(&config).await.expect("login");

    let posts = client.top_posts("askreddit", 5).await.expect("listing");
    for post in posts {
        println!("{} ({} ups)", post.title, post.ups);
    }
}
