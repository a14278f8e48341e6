use {
    crate::{
        error::{TwitterApiError, TwitterError, TwitterErrorResponse},
        impl_twitter_response_parser,
        twitter_client::TwitterApiParsedResponse,
    },
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    std::fmt,
};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TweetsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Tweet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<TwitterApiError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TweetResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Tweet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<TwitterApiError>>,
}

/// A post as returned by the v2 tweet endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possibly_sensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Attachments>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_history_tweet_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<PublicMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_tweets: Option<Vec<ReferencedTweet>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Attachments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PublicMetrics {
    pub like_count: i64,
    pub reply_count: i64,
    pub retweet_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impression_count: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReferencedTweetType {
    Retweeted,
    Quoted,
    RepliedTo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReferencedTweet {
    pub id: String,
    #[serde(rename = "type")]
    pub ref_type: ReferencedTweetType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_count: Option<i64>,
}

/// Post kinds that can be left out of a user timeline
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ExcludeField {
    Replies,
    Retweets,
}

impl fmt::Display for ExcludeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExcludeField::Replies => write!(f, "replies"),
            ExcludeField::Retweets => write!(f, "retweets"),
        }
    }
}

/// Optional arguments of the timeline and mentions calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineOptions {
    /// `pagination_token` from a previous page's `meta.next_token`
    pub cursor: Option<String>,
    pub exclude: Vec<ExcludeField>,
    pub max_results: Option<u32>,
}

impl TimelineOptions {
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn exclude(mut self, field: ExcludeField) -> Self {
        if !self.exclude.contains(&field) {
            self.exclude.push(field);
        }
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

/// Body of `POST /2/tweets`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PostTweetRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_tweet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReplyInfo {
    pub in_reply_to_tweet_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MediaInfo {
    pub media_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostTweetResponse {
    #[serde(default)]
    pub data: Option<PostedTweet>,
    #[serde(default)]
    pub errors: Option<Vec<TwitterApiError>>,
}

/// The post created by a create, quote or reply call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PostedTweet {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edit_history_tweet_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LikeResponse {
    #[serde(default)]
    pub data: Option<LikeStatus>,
    #[serde(default)]
    pub errors: Option<Vec<TwitterApiError>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LikeStatus {
    pub liked: bool,
}

#[derive(Debug, Deserialize)]
pub struct RetweetResponse {
    #[serde(default)]
    pub data: Option<RetweetStatus>,
    #[serde(default)]
    pub errors: Option<Vec<TwitterApiError>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RetweetStatus {
    pub retweeted: bool,
}

#[derive(Debug, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub data: Option<DeleteStatus>,
    #[serde(default)]
    pub errors: Option<Vec<TwitterApiError>>,
}

/// Returned by the delete endpoints for posts and lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DeleteStatus {
    pub deleted: bool,
}

impl_twitter_response_parser!(TweetResponse, Tweet);
impl_twitter_response_parser!(PostTweetResponse, PostedTweet);
impl_twitter_response_parser!(LikeResponse, LikeStatus);
impl_twitter_response_parser!(RetweetResponse, RetweetStatus);
impl_twitter_response_parser!(DeleteResponse, DeleteStatus);

/// Zero matches come back without `data`, which reads as an empty page.
impl TwitterApiParsedResponse for TweetsResponse {
    type Output = Vec<Tweet>;

    fn parse_twitter_response(self) -> Result<Self::Output, TwitterErrorResponse> {
        match (self.data, self.errors) {
            (Some(data), _) => Ok(data),
            (None, Some(errors)) if !errors.is_empty() => {
                Err(TwitterError::from_api_error(&errors[0]).to_error_response())
            }
            (None, _) => Ok(Vec::new()),
        }
    }
}
