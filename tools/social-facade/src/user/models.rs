use {
    crate::{error::TwitterApiError, impl_twitter_response_parser},
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UserData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<TwitterApiError>>,
}

/// A user account as returned by the v2 user endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_tweet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<UserPublicMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_type: Option<VerifiedType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UserPublicMetrics {
    pub followers_count: i64,
    pub following_count: i64,
    pub listed_count: i64,
    pub tweet_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VerifiedType {
    Blue,
    Business,
    Government,
    None,
}

#[derive(Debug, Deserialize)]
pub struct FollowUserResponse {
    #[serde(default)]
    pub data: Option<FollowStatus>,
    #[serde(default)]
    pub errors: Option<Vec<TwitterApiError>>,
}

/// Outcome of a follow request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FollowStatus {
    /// Whether the target is now followed
    pub following: bool,
    /// True when the target is protected and has to approve the request
    #[serde(default)]
    pub pending_follow: bool,
}

#[derive(Debug, Deserialize)]
pub struct UnfollowUserResponse {
    #[serde(default)]
    pub data: Option<UnfollowStatus>,
    #[serde(default)]
    pub errors: Option<Vec<TwitterApiError>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UnfollowStatus {
    /// False once the target is no longer followed
    pub following: bool,
}

impl_twitter_response_parser!(UserResponse, UserData);
impl_twitter_response_parser!(FollowUserResponse, FollowStatus);
impl_twitter_response_parser!(UnfollowUserResponse, UnfollowStatus);
