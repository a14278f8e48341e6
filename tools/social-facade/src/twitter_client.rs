//! Twitter API client implementation
//!
//! A thin OAuth1-signing client over `reqwest`. One method call is one HTTP exchange.
//! Failures of any sort come back as [`TwitterErrorResponse`].

use {
    crate::{
        auth::{ConfigError, TwitterConfig},
        error::{parse_twitter_response, TwitterError, TwitterErrorKind, TwitterErrorResponse},
        user::models::{UserData, UserResponse},
    },
    log::{debug, warn},
    reqwest::{multipart::Form, Client, Method},
    serde::{de::DeserializeOwned, Serialize},
    serde_json::Value,
    std::{collections::BTreeMap, sync::Arc},
    tokio::sync::OnceCell,
};

/// Twitter API client for making authenticated requests
pub struct TwitterClient {
    /// HTTP client for making requests
    client: Arc<Client>,
    config: TwitterConfig,
    /// Id of the account the credentials belong to, resolved on first use
    user_id: OnceCell<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TwitterClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Query parameters, kept sorted so they can be fed to the OAuth signer as is.
pub type Query<'a> = BTreeMap<&'a str, String>;

pub(crate) enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Form),
}

impl TwitterClient {
    /// Validates `config` and builds the HTTP client with its timeout.
    pub fn new(config: TwitterConfig) -> Result<Self, TwitterClientError> {
        config.validate()?;

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            config,
            user_id: OnceCell::new(),
        })
    }

    /// Builds a client from `TWITTER_*` environment variables.
    pub fn from_env() -> Result<Self, TwitterClientError> {
        Self::new(TwitterConfig::from_env()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_root(), path.trim_start_matches('/'))
    }

    /// Makes a GET request to the Twitter API
    pub async fn get<T>(&self, path: &str, query: Query<'_>) -> Result<T, TwitterErrorResponse>
    where
        T: DeserializeOwned,
    {
        self.make_request(Method::GET, path, query, RequestBody::Empty)
            .await
    }

    /// Makes a POST request with a JSON body
    pub async fn post<T, U>(&self, path: &str, body: &U) -> Result<T, TwitterErrorResponse>
    where
        T: DeserializeOwned,
        U: Serialize,
    {
        let body = serde_json::to_value(body).map_err(TwitterError::ParseError)?;

        self.make_request(Method::POST, path, Query::new(), RequestBody::Json(body))
            .await
    }

    /// Makes a POST request with a multipart body
    pub async fn post_form<T>(&self, path: &str, form: Form) -> Result<T, TwitterErrorResponse>
    where
        T: DeserializeOwned,
    {
        self.make_request(Method::POST, path, Query::new(), RequestBody::Multipart(form))
            .await
    }

    /// Makes a DELETE request to the Twitter API
    pub async fn delete<T>(&self, path: &str) -> Result<T, TwitterErrorResponse>
    where
        T: DeserializeOwned,
    {
        self.make_request(Method::DELETE, path, Query::new(), RequestBody::Empty)
            .await
    }

    /// Id of the account the credentials belong to.
    ///
    /// Resolved with `GET /2/users/me` the first time and cached afterwards. A failed
    /// lookup is not cached.
    pub async fn authenticated_user_id(&self) -> Result<String, TwitterErrorResponse> {
        self.user_id
            .get_or_try_init(|| async {
                let id = self.me().await?.id;
                require_id("authenticated user id", &id)?;
                Ok::<_, TwitterErrorResponse>(id)
            })
            .await
            .cloned()
    }

    /// `GET /2/users/me`
    pub async fn me(&self) -> Result<UserData, TwitterErrorResponse> {
        self.get::<UserResponse>("2/users/me", Query::new())
            .await?
            .parse_twitter_response()
    }

    async fn make_request<T>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: RequestBody,
    ) -> Result<T, TwitterErrorResponse>
    where
        T: DeserializeOwned,
    {
        // Signing needs the query apart from the path.
        if path.contains(['?', '#']) {
            return Err(TwitterErrorResponse::new(
                TwitterErrorKind::Validation,
                format!("Request path '{path}' must not carry a query or fragment"),
            ));
        }

        let url = self.url(path);
        let auth_header = self
            .config
            .auth
            .generate_auth_header(&method, &url, &query);

        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Authorization", auth_header);

        if !query.is_empty() {
            request = request.query(&query);
        }

        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(body) => request.json(&body),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = TwitterError::Network(e).to_error_response();
                warn!("{} {} failed: {}", method, url, error.reason);
                return Err(error);
            }
        };

        match parse_twitter_response::<T>(response).await {
            Ok(data) => Ok(data),
            Err(e) => {
                let error = e.to_error_response();
                warn!(
                    "{} {} returned an error ({:?}, status {:?}): {}",
                    method, url, error.kind, error.status_code, error.reason
                );
                Err(error)
            }
        }
    }
}

/// Unwraps a response envelope into the payload it carries.
pub trait TwitterApiParsedResponse {
    type Output;

    fn parse_twitter_response(self) -> Result<Self::Output, TwitterErrorResponse>;
}

/// Implements [`TwitterApiParsedResponse`] for an envelope with `data` and `errors`
/// fields. Data wins over partial errors.
#[macro_export]
macro_rules! impl_twitter_response_parser {
    ($response_ty:ty, $data_ty:ty) => {
        impl $crate::twitter_client::TwitterApiParsedResponse for $response_ty {
            type Output = $data_ty;

            fn parse_twitter_response(
                self,
            ) -> Result<Self::Output, $crate::error::TwitterErrorResponse> {
                if let Some(data) = self.data {
                    return Ok(data);
                }

                if let Some(first_error) = self.errors.as_ref().and_then(|errors| errors.first()) {
                    return Err($crate::error::TwitterError::from_api_error(first_error)
                        .to_error_response());
                }

                Err($crate::error::TwitterErrorResponse::new(
                    $crate::error::TwitterErrorKind::Parse,
                    "Twitter API response validation failed - no data or errors found in response",
                ))
            }
        }
    };
}

/// Fails with a `validation` error when `value` is blank.
pub(crate) fn require(name: &str, value: &str) -> Result<(), TwitterErrorResponse> {
    if value.trim().is_empty() {
        return Err(TwitterErrorResponse::new(
            TwitterErrorKind::Validation,
            format!("{name} must not be empty"),
        ));
    }

    Ok(())
}

/// Fails with a `validation` error unless `value` is a numeric object id.
///
/// Ids end up as URL path segments, so nothing else may get through.
pub(crate) fn require_id(name: &str, value: &str) -> Result<(), TwitterErrorResponse> {
    require(name, value)?;

    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TwitterErrorResponse::new(
            TwitterErrorKind::Validation,
            format!("{name} must be a numeric id, got '{value}'"),
        ));
    }

    Ok(())
}

const MAX_USERNAME_CHARS: usize = 15;

/// Fails with a `validation` error unless `value` is a valid handle without the `@`.
pub(crate) fn require_username(value: &str) -> Result<(), TwitterErrorResponse> {
    require("username", value)?;

    let valid = value.len() <= MAX_USERNAME_CHARS
        && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if !valid {
        return Err(TwitterErrorResponse::new(
            TwitterErrorKind::Validation,
            format!(
                "username must be 1 to {MAX_USERNAME_CHARS} letters, digits or underscores, got '{value}'"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
impl TwitterClient {
    /// Client pointed at a mock server with throwaway credentials.
    pub(crate) fn for_tests(api_base: &str) -> Self {
        use crate::auth::TwitterAuth;

        let auth = TwitterAuth::new(
            "test_consumer_key",
            "test_consumer_secret",
            "test_access_token",
            "test_access_token_secret",
        );

        Self::new(TwitterConfig::new(auth).with_api_base(api_base))
            .expect("test configuration is valid")
    }

    /// Same as [`TwitterClient::for_tests`] with the authenticated user id already known.
    pub(crate) fn for_tests_as(api_base: &str, user_id: &str) -> Self {
        let client = Self::for_tests(api_base);
        client
            .user_id
            .set(user_id.to_string())
            .expect("fresh cell is empty");
        client
    }
}
