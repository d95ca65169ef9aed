use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::models::{Listing, RawPost, Thing};

/// The password-grant token exchange was refused or never completed.
///
/// Nothing can be fetched without a token, so callers should treat
/// this as fatal for the whole run.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("token endpoint rejected the credential exchange with status {0}")]
    Rejected(StatusCode),
}

/// A listing request failed in transit or returned an unusable response.
///
/// These are per-forum (or per-post) failures; callers skip the
/// affected forum or degrade the affected post and keep going.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("listing endpoint returned status {0}")]
    Status(StatusCode),
}

/// An authenticated client for the Reddit listing API.
///
/// Built on a single [`reqwest::Client`], so as per that documentation
/// create one and **reuse** it for the whole run; the bearer token
/// obtained at login is shared read-only by every request.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

impl Client {
    /// Performs the password-grant OAuth exchange and returns a client
    /// holding the resulting bearer token.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the token endpoint cannot be
    /// reached or refuses the exchange.
    pub async fn login(config: &Config) -> Result<Self, AuthError> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()?;

        let credentials = &config.credentials;
        let form = [
            ("grant_type", "password"),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let response = http
            .post(&config.token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AuthError::Rejected(response.status()));
        }
        let token: TokenResponse = response.json().await?;

        Ok(Self {
            http,
            token: token.access_token,
            api_base: config.api_base.clone(),
        })
    }

    /// Lists the top posts of the current day for one subreddit, in
    /// the API's ranking order.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request fails or the
    /// listing envelope does not decode.
    pub async fn top_posts(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<RawPost>, TransportError> {
        let url = format!("{}/r/{subreddit}/top?t=day&limit={limit}", self.api_base);
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status()));
        }

        let listing: Thing<Listing<Thing<RawPost>>> = response.json().await?;
        Ok(listing
            .data
            .children
            .into_iter()
            .map(|thing| thing.data)
            .collect())
    }

    /// Fetches the raw comment thread for one post, sorted by top.
    ///
    /// The response is returned as an untyped value: its two-element
    /// shape is not guaranteed by the API, so decoding is left to the
    /// comment extractor, which degrades instead of failing.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request fails or the body
    /// is not JSON.
    pub async fn comments(
        &self,
        subreddit: &str,
        post_id: &str,
    ) -> Result<Value, TransportError> {
        let url = format!("{}/r/{subreddit}/comments/{post_id}?sort=top", self.api_base);
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_is_send_and_sync() {
        fn is_send_and_sync<T: Send + Sync>() {}
        is_send_and_sync::<Client>();
    }
}
