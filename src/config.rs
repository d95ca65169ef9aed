use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
}

/// The OAuth password-grant credential bundle.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

/// Run configuration, passed into the aggregator at construction.
///
/// Nothing outside [`Config::from_env`] reads the process environment,
/// so tests construct this directly and point `token_url`/`api_base`
/// at a mock server.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub user_agent: String,

    /// Ordered subreddit name → requested post count mapping.
    pub subreddits: Vec<(String, u32)>,

    /// Top-level comments kept per post.
    pub comment_limit: usize,
    /// Replies kept per comment.
    pub reply_limit: usize,
    /// Self-text character budget; longer bodies are truncated with a
    /// `...` marker.
    pub body_budget: usize,

    pub token_url: String,
    pub api_base: String,

    pub output_path: PathBuf,
}

const DEFAULT_USER_AGENT: &str = "reddigest/0.1";
const DEFAULT_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";

/// Default subreddit name → post count mapping.
const DEFAULT_SUBREDDITS: &[(&str, u32)] = &[
    ("singularity", 8),
    ("ufos", 2),
    ("joerogan", 3),
    ("nosurf", 2),
    ("chatgpt", 2),
    ("productivity", 2),
    ("lifeprotips", 1),
    ("conspiracy", 2),
    ("askreddit", 1),
];

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required credential variables are missing
    /// or if `REDDIGEST_SUBREDDITS`/`REDDIGEST_COMMENT_LIMIT` do not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            credentials: Credentials {
                client_id: required_env("REDDIT_CLIENT_ID")?,
                client_secret: required_env("REDDIT_CLIENT_SECRET")?,
                username: required_env("REDDIT_USERNAME")?,
                password: required_env("REDDIT_PASSWORD")?,
            },
            user_agent: env_or_default("REDDIGEST_USER_AGENT", DEFAULT_USER_AGENT),
            subreddits: match optional_env("REDDIGEST_SUBREDDITS") {
                Some(raw) => parse_subreddits(&raw)?,
                None => default_subreddits(),
            },
            comment_limit: parse_env_usize("REDDIGEST_COMMENT_LIMIT", 3)?,
            reply_limit: parse_env_usize("REDDIGEST_REPLY_LIMIT", 3)?,
            body_budget: parse_env_usize("REDDIGEST_BODY_BUDGET", 500)?,
            token_url: env_or_default("REDDIGEST_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_base: env_or_default("REDDIGEST_API_BASE", DEFAULT_API_BASE),
            output_path: PathBuf::from(env_or_default("REDDIGEST_OUTPUT", "docs/index.html")),
        })
    }

    /// A configuration with placeholder credentials and no subreddits,
    /// for tests that fill in endpoints and forums explicitly.
    pub fn for_testing() -> Self {
        Self {
            credentials: Credentials {
                client_id: "test-client".to_string(),
                client_secret: "test-secret".to_string(),
                username: "tester".to_string(),
                password: "hunter2".to_string(),
            },
            user_agent: DEFAULT_USER_AGENT.to_string(),
            subreddits: Vec::new(),
            comment_limit: 3,
            reply_limit: 3,
            body_budget: 500,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            output_path: PathBuf::from("docs/index.html"),
        }
    }
}

fn default_subreddits() -> Vec<(String, u32)> {
    DEFAULT_SUBREDDITS
        .iter()
        .map(|&(name, count)| (name.to_string(), count))
        .collect()
}

/// Parses a `name:count,name:count` list.
fn parse_subreddits(raw: &str) -> Result<Vec<(String, u32)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, count) = entry.split_once(':').ok_or_else(|| invalid_entry(entry))?;
            let name = name.trim();
            let count: u32 = count.trim().parse().map_err(|_| invalid_entry(entry))?;
            if name.is_empty() {
                return Err(invalid_entry(entry));
            }
            Ok((name.to_string(), count))
        })
        .collect()
}

fn invalid_entry(entry: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: "REDDIGEST_SUBREDDITS".to_string(),
        message: format!("expected name:count, got {entry:?}"),
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            message: format!("expected an integer, got {value:?}"),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subreddit_list() {
        let parsed = parse_subreddits("rust:5, askreddit:1").unwrap();
        assert_eq!(
            parsed,
            vec![("rust".to_string(), 5), ("askreddit".to_string(), 1)]
        );
    }

    #[test]
    fn rejects_malformed_subreddit_entries() {
        assert!(parse_subreddits("rust").is_err());
        assert!(parse_subreddits("rust:lots").is_err());
        assert!(parse_subreddits(":3").is_err());
    }

    #[test]
    fn skips_empty_subreddit_entries() {
        let parsed = parse_subreddits("rust:5,,").unwrap();
        assert_eq!(parsed, vec![("rust".to_string(), 5)]);
    }
}
