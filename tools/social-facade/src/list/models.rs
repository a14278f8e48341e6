use {
    crate::{
        error::{TwitterApiError, TwitterError, TwitterErrorResponse},
        impl_twitter_response_parser,
        tweet::models::Meta,
        twitter_client::TwitterApiParsedResponse,
    },
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ListData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<TwitterApiError>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ListData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<TwitterApiError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListMemberResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ListMemberStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<TwitterApiError>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListMemberStatus {
    pub is_member: bool,
}

/// A list. Create returns only `id` and `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ListData {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

/// Body of `POST /2/lists`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CreateListRequest {
    /// 1 to 25 characters
    #[schemars(length(min = 1, max = 25))]
    pub name: String,
    /// At most 100 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 100))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

impl_twitter_response_parser!(ListResponse, ListData);
impl_twitter_response_parser!(ListMemberResponse, ListMemberStatus);

impl TwitterApiParsedResponse for ListsResponse {
    type Output = Vec<ListData>;

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
