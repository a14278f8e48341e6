use {
    reqwest::{Response, StatusCode},
    schemars::JsonSchema,
    serde::{de::DeserializeOwned, Deserialize, Serialize},
    serde_json::Value,
    thiserror::Error,
};

/// Error kind enumeration for Twitter operations
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TwitterErrorKind {
    /// Network-related error
    Network,
    /// Connection error
    Connection,
    /// Timeout error
    Timeout,
    /// Error parsing response
    Parse,
    /// Authentication/authorization error
    Auth,
    /// Resource not found
    NotFound,
    /// Rate limit exceeded
    RateLimit,
    /// Server error
    Server,
    /// Forbidden access
    Forbidden,
    /// API-specific error
    Api,
    /// Unknown error
    Unknown,
    /// Input rejected before any request was made
    Validation,
}

/// An error object as found in the `errors` array of a v2 response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct TwitterApiError {
    pub title: String,
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

/// Internal error type. Every public operation converts it with
/// [`TwitterError::to_error_response`] before returning.
#[derive(Error, Debug)]
pub enum TwitterError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Response parsing error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Twitter API error: {0} (type: {1}){2}")]
    ApiError(String, String, String),

    #[error("Twitter API status error: {0}")]
    StatusError(StatusCode),

    #[error("Twitter API error ({0}): {1}")]
    RejectedError(StatusCode, String),
}

/// The failure value returned by every operation of this crate
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[error("{kind:?}: {reason}")]
pub struct TwitterErrorResponse {
    /// Detailed error message
    pub reason: String,
    /// Type of error (network, server, auth, etc.)
    pub kind: TwitterErrorKind,
    /// HTTP status code if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl TwitterErrorResponse {
    pub fn new(kind: TwitterErrorKind, reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            kind,
            status_code: None,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

impl From<TwitterError> for TwitterErrorResponse {
    fn from(error: TwitterError) -> Self {
        error.to_error_response()
    }
}

impl TwitterError {
    /// Create a new error from a Twitter API error object
    pub fn from_api_error(error: &TwitterApiError) -> Self {
        let detail = error
            .detail
            .clone()
            .map_or_else(String::new, |d| format!(" - {}", d));

        TwitterError::ApiError(error.title.clone(), error.error_type.clone(), detail)
    }

    /// Convert the error to a standardized TwitterErrorResponse
    pub fn to_error_response(&self) -> TwitterErrorResponse {
        let reason = self.to_string();

        match self {
            TwitterError::Network(req_err) => {
                let kind = if req_err.is_timeout() {
                    TwitterErrorKind::Timeout
                } else if req_err.is_connect() {
                    TwitterErrorKind::Connection
                } else {
                    TwitterErrorKind::Network
                };

                TwitterErrorResponse {
                    reason,
                    kind,
                    status_code: req_err.status().map(|s| s.as_u16()),
                }
            }
            TwitterError::ParseError(_) => {
                TwitterErrorResponse::new(TwitterErrorKind::Parse, reason)
            }
            TwitterError::ApiError(title, error_type, _) => {
                let (kind, code) = classify_api_error(title, error_type);

                TwitterErrorResponse {
                    reason,
                    kind,
                    status_code: code,
                }
            }
            TwitterError::StatusError(status) => {
                let code = status.as_u16();

                TwitterErrorResponse {
                    reason,
                    kind: classify_status(code),
                    status_code: Some(code),
                }
            }
            TwitterError::RejectedError(status, _) => {
                let code = status.as_u16();
                let kind = match classify_status(code) {
                    TwitterErrorKind::Unknown => TwitterErrorKind::Api,
                    kind => kind,
                };

                TwitterErrorResponse {
                    reason,
                    kind,
                    status_code: Some(code),
                }
            }
        }
    }
}

fn classify_api_error(title: &str, error_type: &str) -> (TwitterErrorKind, Option<u16>) {
    let error_type = error_type.to_ascii_lowercase();

    if error_type.contains("rate") || title.contains("Rate") || title.contains("Too Many") {
        (TwitterErrorKind::RateLimit, Some(429))
    } else if error_type.contains("auth") || title.contains("Unauthorized") {
        (TwitterErrorKind::Auth, Some(401))
    } else if error_type.contains("not-found")
        || error_type.contains("resource-not-found")
        || title.contains("Not Found")
    {
        (TwitterErrorKind::NotFound, Some(404))
    } else if error_type.contains("forbidden") || title.contains("Forbidden") {
        (TwitterErrorKind::Forbidden, Some(403))
    } else if error_type.contains("server") {
        (TwitterErrorKind::Server, Some(500))
    } else {
        (TwitterErrorKind::Api, None)
    }
}

fn classify_status(code: u16) -> TwitterErrorKind {
    match code {
        429 => TwitterErrorKind::RateLimit,
        401 => TwitterErrorKind::Auth,
        403 => TwitterErrorKind::Forbidden,
        404 => TwitterErrorKind::NotFound,
        c if c >= 500 => TwitterErrorKind::Server,
        _ => TwitterErrorKind::Unknown,
    }
}

/// Result type for Twitter operations
pub type TwitterResult<T> = Result<T, TwitterError>;

/// Legacy v1.1 error body: `{"code": 88, "message": "..."}`
#[derive(Debug, Deserialize)]
struct TwitterDefaultError {
    code: i32,
    message: String,
}

fn legacy_code_mapping(code: i64) -> Option<(&'static str, &'static str)> {
    match code {
        32 => Some(("authentication", "Unauthorized")),
        88 => Some(("rate_limit", "Rate Limit Exceeded")),
        34 => Some(("not-found", "Not Found Error")),
        _ => None,
    }
}

/// Parse a successful Twitter API response.
///
/// A 2xx body that carries `errors` but no `data` is a failure. Partial errors next to
/// `data` are left to the caller's payload type.
fn parse_successful_twitter_response<T>(text: &str) -> TwitterResult<T>
where
    T: DeserializeOwned,
{
    // 204 and friends. Payload types with all-default fields accept `{}`.
    let text = if text.trim().is_empty() { "{}" } else { text };

    let value = serde_json::from_str::<Value>(text)?;

    if value.get("data").is_none() {
        if let Some(first_error) = value
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|errors| errors.first())
        {
            if let Ok(twitter_error) =
                serde_json::from_value::<TwitterApiError>(first_error.clone())
            {
                return Err(TwitterError::from_api_error(&twitter_error));
            }

            return Err(parse_error_from_json(first_error));
        }
    }

    Ok(serde_json::from_value::<T>(value)?)
}

/// Parse a failed Twitter API response
fn parse_failed_twitter_response<T>(text: &str, status: StatusCode) -> TwitterResult<T> {
    if let Ok(default_error) = serde_json::from_str::<TwitterDefaultError>(text) {
        let (error_type, title) = legacy_code_mapping(default_error.code.into())
            .unwrap_or(("default", "Twitter API Error"));

        return Err(with_status_fallback(
            TwitterError::ApiError(
                title.to_string(),
                error_type.to_string(),
                format!(
                    " - {} (Code: {})",
                    default_error.message, default_error.code
                ),
            ),
            status,
        ));
    }

    if let Ok(error_response) = serde_json::from_str::<Value>(text) {
        if let Some(first_error) = error_response
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|errors| errors.first())
        {
            return Err(with_status_fallback(
                parse_error_from_json(first_error),
                status,
            ));
        }

        // v2 problem document: {"title", "type", "detail", "status"}. Its `type` is often
        // `about:blank`, in which case the status code classifies better.
        if let Ok(problem) = serde_json::from_value::<TwitterApiError>(error_response) {
            let (kind, _) = classify_api_error(&problem.title, &problem.error_type);
            if kind != TwitterErrorKind::Api {
                return Err(TwitterError::from_api_error(&problem));
            }
        }
    }

    Err(TwitterError::StatusError(status))
}

/// An API error that names no known category is classified by the HTTP status instead.
fn with_status_fallback(error: TwitterError, status: StatusCode) -> TwitterError {
    match &error {
        TwitterError::ApiError(title, error_type, detail)
            if classify_api_error(title, error_type).0 == TwitterErrorKind::Api =>
        {
            TwitterError::RejectedError(status, format!("{title} (type: {error_type}){detail}"))
        }
        _ => error,
    }
}

/// Parse error details from a JSON Value
fn parse_error_from_json(error: &Value) -> TwitterError {
    let legacy = error
        .get("code")
        .and_then(|c| c.as_i64())
        .and_then(legacy_code_mapping);

    let (error_type, title) = match legacy {
        Some(mapped) => mapped,
        None => (
            error
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("unknown"),
            error
                .get("title")
                .and_then(|t| t.as_str())
                .unwrap_or("Unknown Error"),
        ),
    };

    let mut detail = String::new();
    if let Some(d) = error.get("detail").and_then(|d| d.as_str()) {
        detail.push_str(&format!(" - {}", d));
    }
    if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
        detail.push_str(&format!(" - {}", message));
    }

    TwitterError::ApiError(title.to_string(), error_type.to_string(), detail)
}

/// Reads the body and turns it into `T` or a [`TwitterError`].
pub async fn parse_twitter_response<T>(response: Response) -> TwitterResult<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let text = response.text().await.map_err(TwitterError::Network)?;

    if status.is_success() {
        parse_successful_twitter_response(&text)
    } else {
        parse_failed_twitter_response(&text, status)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest, serde_json::json};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Envelope {
        data: Option<Value>,
    }

    #[rstest(
        status,
        expected,
        case(429, TwitterErrorKind::RateLimit),
        case(401, TwitterErrorKind::Auth),
        case(403, TwitterErrorKind::Forbidden),
        case(404, TwitterErrorKind::NotFound),
        case(503, TwitterErrorKind::Server),
        case(418, TwitterErrorKind::Unknown)
    )]
    fn test_status_error_classification(status: u16, expected: TwitterErrorKind) {
        let status = StatusCode::from_u16(status).unwrap();
        let response = TwitterError::StatusError(status).to_error_response();

        assert_eq!(response.kind, expected);
        assert_eq!(response.status_code, Some(status.as_u16()));
    }

    #[rstest(
        code,
        expected,
        case(32, TwitterErrorKind::Auth),
        case(88, TwitterErrorKind::RateLimit),
        case(34, TwitterErrorKind::NotFound),
        case(187, TwitterErrorKind::Api)
    )]
    fn test_legacy_error_codes(code: i32, expected: TwitterErrorKind) {
        let body = json!({ "code": code, "message": "legacy" }).to_string();

        let err = parse_failed_twitter_response::<Envelope>(&body, StatusCode::BAD_REQUEST)
            .unwrap_err()
            .to_error_response();

        assert_eq!(err.kind, expected);
        assert!(err.reason.contains("legacy"));
    }

    #[test]
    fn test_failed_response_with_errors_array() {
        let body = json!({
            "errors": [{ "code": 88, "message": "Rate limit exceeded" }]
        })
        .to_string();

        let err = parse_failed_twitter_response::<Envelope>(&body, StatusCode::TOO_MANY_REQUESTS)
            .unwrap_err()
            .to_error_response();

        assert_eq!(err.kind, TwitterErrorKind::RateLimit);
        assert_eq!(err.status_code, Some(429));
    }

    #[rstest(
        status,
        expected,
        case(403, TwitterErrorKind::Forbidden),
        case(503, TwitterErrorKind::Server),
        case(400, TwitterErrorKind::Api)
    )]
    fn test_unclassified_error_entry_keeps_http_status(status: u16, expected: TwitterErrorKind) {
        let body = json!({
            "errors": [{
                "message": "You currently have access to a subset of X API V2 endpoints",
                "code": 453
            }]
        })
        .to_string();
        let status = StatusCode::from_u16(status).unwrap();

        let err = parse_failed_twitter_response::<Envelope>(&body, status)
            .unwrap_err()
            .to_error_response();

        assert_eq!(err.kind, expected);
        assert_eq!(err.status_code, Some(status.as_u16()));
        assert!(err.reason.contains("subset of X API"));
    }

    #[test]
    fn test_failed_response_problem_document() {
        let body = json!({
            "title": "Unauthorized",
            "type": "about:blank",
            "status": 401,
            "detail": "Unauthorized"
        })
        .to_string();

        let err = parse_failed_twitter_response::<Envelope>(&body, StatusCode::UNAUTHORIZED)
            .unwrap_err()
            .to_error_response();

        assert_eq!(err.kind, TwitterErrorKind::Auth);
    }

    #[test]
    fn test_failed_response_without_body_keeps_status() {
        let err = parse_failed_twitter_response::<Envelope>("", StatusCode::BAD_GATEWAY)
            .unwrap_err()
            .to_error_response();

        assert_eq!(err.kind, TwitterErrorKind::Server);
        assert_eq!(err.status_code, Some(502));
    }

    #[test]
    fn test_successful_response_with_only_errors_fails() {
        let body = json!({
            "errors": [{
                "title": "Not Found Error",
                "type": "https://api.twitter.com/2/problems/resource-not-found",
                "detail": "Could not find tweet with id: [1]."
            }]
        })
        .to_string();

        let err = parse_successful_twitter_response::<Envelope>(&body)
            .unwrap_err()
            .to_error_response();

        assert_eq!(err.kind, TwitterErrorKind::NotFound);
        assert!(err.reason.contains("Could not find tweet"));
    }

    #[test]
    fn test_successful_response_keeps_data_next_to_partial_errors() {
        let body = json!({
            "data": { "id": "1" },
            "errors": [{ "title": "Partial", "type": "about:blank" }]
        })
        .to_string();

        let parsed = parse_successful_twitter_response::<Envelope>(&body).unwrap();

        assert_eq!(parsed.data, Some(json!({ "id": "1" })));
    }

    #[test]
    fn test_empty_success_body_reads_as_empty_object() {
        let parsed = parse_successful_twitter_response::<Envelope>("").unwrap();

        assert_eq!(parsed, Envelope { data: None });
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_successful_twitter_response::<Envelope>("not json")
            .unwrap_err()
            .to_error_response();

        assert_eq!(err.kind, TwitterErrorKind::Parse);
    }

    #[test]
    fn test_error_response_schema() {
        let schema = json!(schemars::schema_for!(TwitterErrorResponse));

        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("reason")));
        assert!(required.contains(&json!("kind")));
        assert!(!required.contains(&json!("status_code")));
        assert!(schema["properties"]["status_code"].is_object());
    }

    #[test]
    fn test_error_kind_serializes_snake_case() {
        let response = TwitterErrorResponse::new(TwitterErrorKind::RateLimit, "slow down");

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "reason": "slow down", "kind": "rate_limit" })
        );
    }
}
