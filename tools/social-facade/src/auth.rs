//! Credentials and client configuration.
//!
//! The credential set is read once at startup, validated, and then handed to the
//! [`crate::twitter_client::TwitterClient`]. Nothing in this crate reads the environment
//! after that point.

use {
    oauth1_request::{signature_method::HmacSha1, Builder, ParameterList, Token},
    reqwest::Method,
    std::{collections::BTreeMap, time::Duration},
    thiserror::Error,
};

pub const ENV_API_KEY: &str = "TWITTER_API_KEY";
pub const ENV_API_SECRET: &str = "TWITTER_API_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
pub const ENV_ACCESS_TOKEN_SECRET: &str = "TWITTER_ACCESS_TOKEN_SECRET";
pub const ENV_API_BASE: &str = "TWITTER_API_BASE";

pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Raised when the configuration cannot produce a usable client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required credential: {0} is not set or is empty")]
    MissingCredential(&'static str),
    #[error("Invalid API base URL '{0}'")]
    InvalidApiBase(String),
}

/// Twitter API authentication credentials used to sign every request.
#[derive(Clone)]
pub struct TwitterAuth {
    /// Consumer API key for Twitter API application
    pub consumer_key: String,
    /// Consumer Secret key for Twitter API application
    pub consumer_secret_key: String,
    /// Access Token for user's Twitter account
    pub access_token: String,
    /// Access Token Secret for user's Twitter account
    pub access_token_secret: String,
}

impl std::fmt::Debug for TwitterAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterAuth")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret_key", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

impl TwitterAuth {
    /// Create a new TwitterAuth instance
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret_key: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret_key: consumer_secret_key.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }

    /// Read the four credentials from the process environment.
    ///
    /// Every value must be present and non-empty. The first missing one is reported.
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth = Self {
            consumer_key: read_required(ENV_API_KEY)?,
            consumer_secret_key: read_required(ENV_API_SECRET)?,
            access_token: read_required(ENV_ACCESS_TOKEN)?,
            access_token_secret: read_required(ENV_ACCESS_TOKEN_SECRET)?,
        };

        Ok(auth)
    }

    /// Checks that none of the credentials is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            (ENV_API_KEY, &self.consumer_key),
            (ENV_API_SECRET, &self.consumer_secret_key),
            (ENV_ACCESS_TOKEN, &self.access_token),
            (ENV_ACCESS_TOKEN_SECRET, &self.access_token_secret),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ConfigError::MissingCredential(*name)),
            None => Ok(()),
        }
    }

    /// Create an OAuth token from the credentials
    pub fn to_token(&self) -> Token {
        Token::from_parts(
            self.consumer_key.clone(),
            self.consumer_secret_key.clone(),
            self.access_token.clone(),
            self.access_token_secret.clone(),
        )
    }

    /// Generate an OAuth 1.0a `Authorization` header for a request to `url`.
    ///
    /// Query parameters are part of the signature base string, so they have to be passed
    /// here as well as on the request itself. `url` itself must not carry a query.
    pub fn generate_auth_header(
        &self,
        method: &Method,
        url: &str,
        query: &BTreeMap<&str, String>,
    ) -> String {
        sign(&self.signer(), method, url, query)
    }

    /// Signer with a fresh nonce and the current timestamp on every use.
    fn signer(&self) -> Builder<'static, HmacSha1> {
        Builder::with_token(self.to_token(), HmacSha1::new())
    }
}

fn sign(
    signer: &Builder<'_, HmacSha1>,
    method: &Method,
    url: &str,
    query: &BTreeMap<&str, String>,
) -> String {
    signer.authorize(method.as_str(), url, &query_parameters(query))
}

fn query_parameters<'a>(query: &'a BTreeMap<&str, String>) -> ParameterList<&'a str, &'a str> {
    query.iter().map(|(key, value)| (*key, value.as_str())).collect()
}

/// Everything needed to build a [`crate::twitter_client::TwitterClient`].
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    pub auth: TwitterAuth,
    /// Root of the API, without a version segment. Example: `https://api.twitter.com`
    pub api_base: String,
    /// Applied to every request by the HTTP client.
    pub timeout: Duration,
}

impl TwitterConfig {
    pub fn new(auth: TwitterAuth) -> Self {
        Self {
            auth,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builds the configuration from `TWITTER_*` environment variables.
    ///
    /// `TWITTER_API_BASE` is optional and mostly useful for pointing at a mock server.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(TwitterAuth::from_env()?);

        if let Ok(api_base) = std::env::var(ENV_API_BASE) {
            if !api_base.trim().is_empty() {
                config.api_base = api_base;
            }
        }

        config.validate()?;

        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.validate()?;

        match reqwest::Url::parse(&self.api_base) {
            Ok(url)
                if matches!(url.scheme(), "http" | "https")
                    && url.query().is_none()
                    && url.fragment().is_none() =>
            {
                Ok(())
            }
            _ => Err(ConfigError::InvalidApiBase(self.api_base.clone())),
        }
    }

    /// The API root with any trailing slash removed.
    pub fn api_root(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

fn read_required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential(name)),
    }
}
