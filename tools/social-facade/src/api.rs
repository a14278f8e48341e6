//! The remote operations the facade depends on.
//!
//! [`TwitterClient`] is the production implementation. Anything else implementing
//! [`TwitterApi`] can stand in for it, which is how the facade is tested without HTTP.

use {
    crate::{
        error::TwitterErrorResponse,
        list::models::{CreateListRequest, ListData, ListMemberStatus},
        media::{data_uri::DecodedMedia, models::MediaUploadData},
        tweet::models::{
            DeleteStatus, LikeStatus, PostTweetRequest, PostedTweet, RetweetStatus,
            TimelineOptions, Tweet,
        },
        twitter_client::TwitterClient,
        user::models::{FollowStatus, UnfollowStatus, UserData},
    },
    serde_json::Value,
    std::future::Future,
};

/// Shorthand for the result of every remote operation.
pub type ApiResult<T> = Result<T, TwitterErrorResponse>;

/// One method per remote call. Implementations make exactly one logical request per
/// call and report failures as [`TwitterErrorResponse`].
pub trait TwitterApi: Send + Sync + 'static {
    fn user_tweets(
        &self,
        user_id: &str,
        options: &TimelineOptions,
    ) -> impl Future<Output = ApiResult<Vec<Tweet>>> + Send;

    fn mentions(
        &self,
        user_id: &str,
        options: &TimelineOptions,
    ) -> impl Future<Output = ApiResult<Vec<Tweet>>> + Send;

    fn get_tweet(&self, tweet_id: &str) -> impl Future<Output = ApiResult<Tweet>> + Send;

    fn search_recent(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl Future<Output = ApiResult<Vec<Tweet>>> + Send;

    fn post_tweet(
        &self,
        request: &PostTweetRequest,
    ) -> impl Future<Output = ApiResult<PostedTweet>> + Send;

    fn delete_tweet(&self, tweet_id: &str) -> impl Future<Output = ApiResult<DeleteStatus>> + Send;

    fn upload_media(
        &self,
        media: &DecodedMedia,
    ) -> impl Future<Output = ApiResult<MediaUploadData>> + Send;

    fn like(&self, tweet_id: &str) -> impl Future<Output = ApiResult<LikeStatus>> + Send;

    fn unlike(&self, tweet_id: &str) -> impl Future<Output = ApiResult<LikeStatus>> + Send;

    fn retweet(&self, tweet_id: &str) -> impl Future<Output = ApiResult<RetweetStatus>> + Send;

    fn undo_retweet(&self, tweet_id: &str) -> impl Future<Output = ApiResult<RetweetStatus>> + Send;

    fn me(&self) -> impl Future<Output = ApiResult<UserData>> + Send;

    fn user_by_username(&self, username: &str) -> impl Future<Output = ApiResult<UserData>> + Send;

    fn follow(&self, target_user_id: &str) -> impl Future<Output = ApiResult<FollowStatus>> + Send;

    fn unfollow(
        &self,
        target_user_id: &str,
    ) -> impl Future<Output = ApiResult<UnfollowStatus>> + Send;

    fn available_trends(&self) -> impl Future<Output = ApiResult<Value>> + Send;

    fn create_list(
        &self,
        request: &CreateListRequest,
    ) -> impl Future<Output = ApiResult<ListData>> + Send;

    fn get_list(&self, list_id: &str) -> impl Future<Output = ApiResult<ListData>> + Send;

    fn delete_list(&self, list_id: &str) -> impl Future<Output = ApiResult<DeleteStatus>> + Send;

    fn add_list_member(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> impl Future<Output = ApiResult<ListMemberStatus>> + Send;

    fn remove_list_member(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> impl Future<Output = ApiResult<ListMemberStatus>> + Send;

    fn owned_lists(&self) -> impl Future<Output = ApiResult<Vec<ListData>>> + Send;
}

impl TwitterApi for TwitterClient {
    async fn user_tweets(&self, user_id: &str, options: &TimelineOptions) -> ApiResult<Vec<Tweet>> {
        self.get_user_tweets(user_id, options).await
    }

    async fn mentions(&self, user_id: &str, options: &TimelineOptions) -> ApiResult<Vec<Tweet>> {
        self.get_mentioned_tweets(user_id, options).await
    }

    async fn get_tweet(&self, tweet_id: &str) -> ApiResult<Tweet> {
        TwitterClient::get_tweet(self, tweet_id).await
    }

    async fn search_recent(&self, query: &str, max_results: u32) -> ApiResult<Vec<Tweet>> {
        self.search_recent_tweets(query, max_results).await
    }

    async fn post_tweet(&self, request: &PostTweetRequest) -> ApiResult<PostedTweet> {
        TwitterClient::post_tweet(self, request).await
    }

    async fn delete_tweet(&self, tweet_id: &str) -> ApiResult<DeleteStatus> {
        TwitterClient::delete_tweet(self, tweet_id).await
    }

    async fn upload_media(&self, media: &DecodedMedia) -> ApiResult<MediaUploadData> {
        TwitterClient::upload_media(self, media).await
    }

    async fn like(&self, tweet_id: &str) -> ApiResult<LikeStatus> {
        self.like_tweet(tweet_id).await
    }

    async fn unlike(&self, tweet_id: &str) -> ApiResult<LikeStatus> {
        self.unlike_tweet(tweet_id).await
    }

    async fn retweet(&self, tweet_id: &str) -> ApiResult<RetweetStatus> {
        self.retweet_tweet(tweet_id).await
    }

    async fn undo_retweet(&self, tweet_id: &str) -> ApiResult<RetweetStatus> {
        self.undo_retweet_tweet(tweet_id).await
    }

    async fn me(&self) -> ApiResult<UserData> {
        TwitterClient::me(self).await
    }

    async fn user_by_username(&self, username: &str) -> ApiResult<UserData> {
        self.get_user_by_username(username).await
    }

    async fn follow(&self, target_user_id: &str) -> ApiResult<FollowStatus> {
        self.follow_user(target_user_id).await
    }

    async fn unfollow(&self, target_user_id: &str) -> ApiResult<UnfollowStatus> {
        self.unfollow_user(target_user_id).await
    }

    async fn available_trends(&self) -> ApiResult<Value> {
        self.get_available_trends().await
    }

    async fn create_list(&self, request: &CreateListRequest) -> ApiResult<ListData> {
        TwitterClient::create_list(self, request).await
    }

    async fn get_list(&self, list_id: &str) -> ApiResult<ListData> {
        TwitterClient::get_list(self, list_id).await
    }

    async fn delete_list(&self, list_id: &str) -> ApiResult<DeleteStatus> {
        TwitterClient::delete_list(self, list_id).await
    }

    async fn add_list_member(&self, list_id: &str, user_id: &str) -> ApiResult<ListMemberStatus> {
        TwitterClient::add_list_member(self, list_id, user_id).await
    }

    async fn remove_list_member(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> ApiResult<ListMemberStatus> {
        TwitterClient::remove_list_member(self, list_id, user_id).await
    }

    async fn owned_lists(&self) -> ApiResult<Vec<ListData>> {
        self.get_owned_lists().await
    }
}
