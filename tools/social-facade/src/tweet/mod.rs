//! Post reading, publishing and engagement.

pub mod models;

use {
    crate::{
        error::TwitterErrorResponse,
        twitter_client::{require, require_id, Query, TwitterApiParsedResponse, TwitterClient},
    },
    models::{
        DeleteResponse, DeleteStatus, LikeResponse, LikeStatus, PostTweetRequest,
        PostTweetResponse, PostedTweet, RetweetResponse, RetweetStatus, TimelineOptions, Tweet,
        TweetResponse, TweetsResponse,
    },
    serde_json::json,
};

pub(crate) const TWEET_FIELDS: &str = "attachments,author_id,conversation_id,created_at,in_reply_to_user_id,lang,possibly_sensitive,public_metrics,referenced_tweets";

fn timeline_query(options: &TimelineOptions, with_exclude: bool) -> Query<'static> {
    let mut query = Query::from([("tweet.fields", TWEET_FIELDS.to_string())]);

    if let Some(cursor) = &options.cursor {
        query.insert("pagination_token", cursor.clone());
    }
    if let Some(max_results) = options.max_results {
        query.insert("max_results", max_results.to_string());
    }
    if with_exclude && !options.exclude.is_empty() {
        let exclude = options
            .exclude
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        query.insert("exclude", exclude);
    }

    query
}

impl TwitterClient {
    /// `GET /2/users/:id/tweets`
    pub async fn get_user_tweets(
        &self,
        user_id: &str,
        options: &TimelineOptions,
    ) -> Result<Vec<Tweet>, TwitterErrorResponse> {
        require_id("user_id", user_id)?;

        self.get::<TweetsResponse>(
            &format!("2/users/{user_id}/tweets"),
            timeline_query(options, true),
        )
        .await?
        .parse_twitter_response()
    }

    /// `GET /2/users/:id/mentions`. The exclude set does not apply here.
    pub async fn get_mentioned_tweets(
        &self,
        user_id: &str,
        options: &TimelineOptions,
    ) -> Result<Vec<Tweet>, TwitterErrorResponse> {
        require_id("user_id", user_id)?;

        self.get::<TweetsResponse>(
            &format!("2/users/{user_id}/mentions"),
            timeline_query(options, false),
        )
        .await?
        .parse_twitter_response()
    }

    /// `GET /2/tweets/:id`
    pub async fn get_tweet(&self, tweet_id: &str) -> Result<Tweet, TwitterErrorResponse> {
        require_id("tweet_id", tweet_id)?;

        let query = Query::from([("tweet.fields", TWEET_FIELDS.to_string())]);

        self.get::<TweetResponse>(&format!("2/tweets/{tweet_id}"), query)
            .await?
            .parse_twitter_response()
    }

    /// `GET /2/tweets/search/recent`
    pub async fn search_recent_tweets(
        &self,
        search_query: &str,
        max_results: u32,
    ) -> Result<Vec<Tweet>, TwitterErrorResponse> {
        require("query", search_query)?;

        let query = Query::from([
            ("query", search_query.to_string()),
            ("max_results", max_results.to_string()),
            ("tweet.fields", TWEET_FIELDS.to_string()),
        ]);

        self.get::<TweetsResponse>("2/tweets/search/recent", query)
            .await?
            .parse_twitter_response()
    }

    /// `POST /2/tweets`
    pub async fn post_tweet(
        &self,
        request: &PostTweetRequest,
    ) -> Result<PostedTweet, TwitterErrorResponse> {
        if request.media.is_none() {
            require("text", &request.text)?;
        }

        self.post::<PostTweetResponse, _>("2/tweets", request)
            .await?
            .parse_twitter_response()
    }

    /// `DELETE /2/tweets/:id`
    pub async fn delete_tweet(&self, tweet_id: &str) -> Result<DeleteStatus, TwitterErrorResponse> {
        require_id("tweet_id", tweet_id)?;

        self.delete::<DeleteResponse>(&format!("2/tweets/{tweet_id}"))
            .await?
            .parse_twitter_response()
    }

    /// `POST /2/users/:me/likes`
    pub async fn like_tweet(&self, tweet_id: &str) -> Result<LikeStatus, TwitterErrorResponse> {
        require_id("tweet_id", tweet_id)?;
        let me = self.authenticated_user_id().await?;

        self.post::<LikeResponse, _>(
            &format!("2/users/{me}/likes"),
            &json!({ "tweet_id": tweet_id }),
        )
        .await?
        .parse_twitter_response()
    }

    /// `DELETE /2/users/:me/likes/:id`
    pub async fn unlike_tweet(&self, tweet_id: &str) -> Result<LikeStatus, TwitterErrorResponse> {
        require_id("tweet_id", tweet_id)?;
        let me = self.authenticated_user_id().await?;

        self.delete::<LikeResponse>(&format!("2/users/{me}/likes/{tweet_id}"))
            .await?
            .parse_twitter_response()
    }

    /// `POST /2/users/:me/retweets`
    pub async fn retweet_tweet(
        &self,
        tweet_id: &str,
    ) -> Result<RetweetStatus, TwitterErrorResponse> {
        require_id("tweet_id", tweet_id)?;
        let me = self.authenticated_user_id().await?;

        self.post::<RetweetResponse, _>(
            &format!("2/users/{me}/retweets"),
            &json!({ "tweet_id": tweet_id }),
        )
        .await?
        .parse_twitter_response()
    }

    /// `DELETE /2/users/:me/retweets/:id`
    pub async fn undo_retweet_tweet(
        &self,
        tweet_id: &str,
    ) -> Result<RetweetStatus, TwitterErrorResponse> {
        require_id("tweet_id", tweet_id)?;
        let me = self.authenticated_user_id().await?;

        self.delete::<RetweetResponse>(&format!("2/users/{me}/retweets/{tweet_id}"))
            .await?
            .parse_twitter_response()
    }
}
