//! User lookup and follow graph operations.

pub mod models;

use {
    crate::{
        error::TwitterErrorResponse,
        twitter_client::{
            require_id, require_username, Query, TwitterApiParsedResponse, TwitterClient,
        },
    },
    models::{
        FollowStatus, FollowUserResponse, UnfollowStatus, UnfollowUserResponse, UserData,
        UserResponse,
    },
    serde_json::json,
};

pub(crate) const USER_FIELDS: &str =
    "created_at,description,location,pinned_tweet_id,profile_image_url,protected,public_metrics,url,verified,verified_type";

impl TwitterClient {
    /// `GET /2/users/by/username/:username`
    pub async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<UserData, TwitterErrorResponse> {
        let username = username.trim_start_matches('@');
        require_username(username)?;

        let query = Query::from([("user.fields", USER_FIELDS.to_string())]);

        self.get::<UserResponse>(&format!("2/users/by/username/{username}"), query)
            .await?
            .parse_twitter_response()
    }

    /// `POST /2/users/:me/following`
    pub async fn follow_user(
        &self,
        target_user_id: &str,
    ) -> Result<FollowStatus, TwitterErrorResponse> {
        require_id("target_user_id", target_user_id)?;
        let me = self.authenticated_user_id().await?;

        self.post::<FollowUserResponse, _>(
            &format!("2/users/{me}/following"),
            &json!({ "target_user_id": target_user_id }),
        )
        .await?
        .parse_twitter_response()
    }

    /// `DELETE /2/users/:me/following/:target`
    pub async fn unfollow_user(
        &self,
        target_user_id: &str,
    ) -> Result<UnfollowStatus, TwitterErrorResponse> {
        require_id("target_user_id", target_user_id)?;
        let me = self.authenticated_user_id().await?;

        self.delete::<UnfollowUserResponse>(&format!("2/users/{me}/following/{target_user_id}"))
            .await?
            .parse_twitter_response()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::error::TwitterErrorKind,
        mockito::{Matcher, Server},
    };

    #[tokio::test]
    async fn test_get_user_by_username_successful() {
        let mut server = Server::new_async().await;
        let client = TwitterClient::for_tests(&server.url());

        let mock = server
            .mock("GET", "/2/users/by/username/rustlang")
            .match_query(Matcher::UrlEncoded("user.fields".into(), USER_FIELDS.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "data": {
                        "id": "165262228",
                        "name": "Rust Language",
                        "username": "rustlang",
                        "verified": false,
                        "public_metrics": {
                            "followers_count": 150000,
                            "following_count": 10,
                            "listed_count": 2000,
                            "tweet_count": 3000
                        }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let user = client.get_user_by_username("@rustlang").await.unwrap();

        assert_eq!(user.id, "165262228");
        assert_eq!(user.username, "rustlang");
        assert_eq!(user.public_metrics.unwrap().followers_count, 150000);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_user_by_username_not_found() {
        let mut server = Server::new_async().await;
        let client = TwitterClient::for_tests(&server.url());

        let mock = server
            .mock("GET", "/2/users/by/username/nobody_here")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "errors": [{
                        "value": "nobody_here",
                        "detail": "Could not find user with username: [nobody_here].",
                        "title": "Not Found Error",
                        "resource_type": "user",
                        "parameter": "username",
                        "resource_id": "nobody_here",
                        "type": "https://api.twitter.com/2/problems/resource-not-found"
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client.get_user_by_username("nobody_here").await.unwrap_err();

        assert_eq!(err.kind, TwitterErrorKind::NotFound);
        assert!(err.reason.contains("Could not find user"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_user_by_username_rejects_blank() {
        let client = TwitterClient::for_tests("http://127.0.0.1:1");

        let err = client.get_user_by_username("@").await.unwrap_err();

        assert_eq!(err.kind, TwitterErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_follow_user_pending() {
        let mut server = Server::new_async().await;
        let client = TwitterClient::for_tests_as(&server.url(), "100");

        let mock = server
            .mock("POST", "/2/users/100/following")
            .match_body(Matcher::Json(json!({ "target_user_id": "200" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "data": { "following": false, "pending_follow": true } }).to_string())
            .create_async()
            .await;

        let status = client.follow_user("200").await.unwrap();

        assert_eq!(
            status,
            FollowStatus {
                following: false,
                pending_follow: true
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_follow_user_resolves_me_first() {
        let mut server = Server::new_async().await;
        let client = TwitterClient::for_tests(&server.url());

        let me = server
            .mock("GET", "/2/users/me")
            .with_status(200)
            .with_body(json!({ "data": { "id": "100", "name": "Me", "username": "me" } }).to_string())
            .create_async()
            .await;
        let follow = server
            .mock("POST", "/2/users/100/following")
            .with_status(200)
            .with_body(json!({ "data": { "following": true, "pending_follow": false } }).to_string())
            .create_async()
            .await;

        assert!(client.follow_user("200").await.unwrap().following);

        me.assert_async().await;
        follow.assert_async().await;
    }

    #[tokio::test]
    async fn test_follow_user_forbidden() {
        let mut server = Server::new_async().await;
        let client = TwitterClient::for_tests_as(&server.url(), "100");

        let mock = server
            .mock("POST", "/2/users/100/following")
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "title": "Forbidden",
                    "type": "about:blank",
                    "status": 403,
                    "detail": "Forbidden"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client.follow_user("200").await.unwrap_err();

        assert_eq!(err.kind, TwitterErrorKind::Forbidden);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unfollow_user_successful() {
        let mut server = Server::new_async().await;
        let client = TwitterClient::for_tests_as(&server.url(), "100");

        let mock = server
            .mock("DELETE", "/2/users/100/following/200")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "data": { "following": false } }).to_string())
            .create_async()
            .await;

        let status = client.unfollow_user("200").await.unwrap();

        assert!(!status.following);
        mock.assert_async().await;
    }
}
