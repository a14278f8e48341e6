//! List management for the authenticated account.

pub mod models;

use {
    crate::{
        error::{TwitterErrorKind, TwitterErrorResponse},
        tweet::models::{DeleteResponse, DeleteStatus},
        twitter_client::{require, require_id, Query, TwitterApiParsedResponse, TwitterClient},
    },
    models::{
        CreateListRequest, ListData, ListMemberResponse, ListMemberStatus, ListResponse,
        ListsResponse,
    },
    serde_json::json,
};

pub(crate) const LIST_FIELDS: &str =
    "created_at,description,follower_count,member_count,owner_id,private";

const MAX_LIST_NAME_CHARS: usize = 25;
const MAX_LIST_DESCRIPTION_CHARS: usize = 100;

impl CreateListRequest {
    fn validate(&self) -> Result<(), TwitterErrorResponse> {
        require("name", &self.name)?;

        if self.name.chars().count() > MAX_LIST_NAME_CHARS {
            return Err(TwitterErrorResponse::new(
                TwitterErrorKind::Validation,
                format!("name must be at most {MAX_LIST_NAME_CHARS} characters"),
            ));
        }

        if let Some(description) = &self.description {
            if description.chars().count() > MAX_LIST_DESCRIPTION_CHARS {
                return Err(TwitterErrorResponse::new(
                    TwitterErrorKind::Validation,
                    format!("description must be at most {MAX_LIST_DESCRIPTION_CHARS} characters"),
                ));
            }
        }

        Ok(())
    }
}

impl TwitterClient {
    /// `POST /2/lists`
    pub async fn create_list(
        &self,
        request: &CreateListRequest,
    ) -> Result<ListData, TwitterErrorResponse> {
        request.validate()?;

        self.post::<ListResponse, _>("2/lists", request)
            .await?
            .parse_twitter_response()
    }

    /// `GET /2/lists/:id`
    pub async fn get_list(&self, list_id: &str) -> Result<ListData, TwitterErrorResponse> {
        require_id("list_id", list_id)?;

        let query = Query::from([("list.fields", LIST_FIELDS.to_string())]);

        self.get::<ListResponse>(&format!("2/lists/{list_id}"), query)
            .await?
            .parse_twitter_response()
    }

    /// `DELETE /2/lists/:id`
    pub async fn delete_list(&self, list_id: &str) -> Result<DeleteStatus, TwitterErrorResponse> {
        require_id("list_id", list_id)?;

        self.delete::<DeleteResponse>(&format!("2/lists/{list_id}"))
            .await?
            .parse_twitter_response()
    }

    /// `POST /2/lists/:id/members`
    pub async fn add_list_member(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> Result<ListMemberStatus, TwitterErrorResponse> {
        require_id("list_id", list_id)?;
        require_id("user_id", user_id)?;

        self.post::<ListMemberResponse, _>(
            &format!("2/lists/{list_id}/members"),
            &json!({ "user_id": user_id }),
        )
        .await?
        .parse_twitter_response()
    }

    /// `DELETE /2/lists/:id/members/:user_id`
    pub async fn remove_list_member(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> Result<ListMemberStatus, TwitterErrorResponse> {
        require_id("list_id", list_id)?;
        require_id("user_id", user_id)?;

        self.delete::<ListMemberResponse>(&format!("2/lists/{list_id}/members/{user_id}"))
            .await?
            .parse_twitter_response()
    }

    /// `GET /2/users/:me/owned_lists`
    pub async fn get_owned_lists(&self) -> Result<Vec<ListData>, TwitterErrorResponse> {
        let me = self.authenticated_user_id().await?;

        let query = Query::from([("list.fields", LIST_FIELDS.to_string())]);

        self.get::<ListsResponse>(&format!("2/users/{me}/owned_lists"), query)
            .await?
            .parse_twitter_response()
    }
}
