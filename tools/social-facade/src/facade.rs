//! # Social facade
//!
//! [`SocialFacade`] is the single entry point for callers. Each method marshals its
//! arguments, performs one logical call through a [`TwitterApi`] and hands back the
//! payload or the failure the API reported, unchanged.
//!
//! The facade owns its client through an [`Arc`]. Cloning the facade shares the client.

use {
    crate::{
        api::{ApiResult, TwitterApi},
        auth::TwitterConfig,
        list::models::{CreateListRequest, ListData, ListMemberStatus},
        media::data_uri::decode_image,
        trends::WORLDWIDE_WOEID,
        tweet::models::{
            DeleteStatus, LikeStatus, MediaInfo, PostTweetRequest, PostedTweet, ReplyInfo,
            RetweetStatus, TimelineOptions, Tweet,
        },
        twitter_client::{TwitterClient, TwitterClientError},
        user::models::{FollowStatus, UnfollowStatus, UserData},
    },
    log::debug,
    serde_json::Value,
    std::sync::Arc,
};

/// Result count used by [`SocialFacade::search`] when none is given
pub const DEFAULT_SEARCH_RESULTS: u32 = 10;

/// Region used by [`SocialFacade::trending_topics`] when none is given
pub const DEFAULT_TRENDS_REGION: u64 = WORLDWIDE_WOEID;

/// Single entry point for every X API operation. Clones share one client.
pub struct SocialFacade<A: TwitterApi = TwitterClient> {
    api: Arc<A>,
}

impl<A: TwitterApi> Clone for SocialFacade<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl SocialFacade<TwitterClient> {
    /// Builds the facade and its client from `TWITTER_*` environment variables.
    ///
    /// Fails with the name of the first missing credential.
    pub fn from_env() -> Result<Self, TwitterClientError> {
        Ok(Self::new(TwitterClient::from_env()?))
    }

    pub fn from_config(config: TwitterConfig) -> Result<Self, TwitterClientError> {
        Ok(Self::new(TwitterClient::new(config)?))
    }
}

impl<A: TwitterApi> SocialFacade<A> {
    pub fn new(api: A) -> Self {
        Self { api: Arc::new(api) }
    }

    /// Wraps a client that is already shared elsewhere.
    pub fn from_shared(api: Arc<A>) -> Self {
        Self { api }
    }

    /// The client every call goes through.
    pub fn client(&self) -> &Arc<A> {
        &self.api
    }

    /// Recent posts of `user_id`.
    pub async fn user_tweets(
        &self,
        user_id: &str,
        options: TimelineOptions,
    ) -> ApiResult<Vec<Tweet>> {
        self.api.user_tweets(user_id, &options).await
    }

    pub async fn get_tweet(&self, tweet_id: &str) -> ApiResult<Tweet> {
        self.api.get_tweet(tweet_id).await
    }

    /// Posts mentioning `user_id`. The exclude set of `options` is ignored.
    pub async fn mentions(&self, user_id: &str, options: TimelineOptions) -> ApiResult<Vec<Tweet>> {
        self.api.mentions(user_id, &options).await
    }

    pub async fn quote(&self, tweet_id: &str, text: &str) -> ApiResult<PostedTweet> {
        let request = PostTweetRequest {
            text: text.to_string(),
            quote_tweet_id: Some(tweet_id.to_string()),
            ..Default::default()
        };

        self.api.post_tweet(&request).await
    }

    pub async fn reply(&self, tweet_id: &str, text: &str) -> ApiResult<PostedTweet> {
        let request = PostTweetRequest {
            text: text.to_string(),
            reply: Some(ReplyInfo {
                in_reply_to_tweet_id: tweet_id.to_string(),
            }),
            ..Default::default()
        };

        self.api.post_tweet(&request).await
    }

    /// Publishes `text`, optionally with one image.
    ///
    /// `image` is a base64 data URI or bare base64. It is decoded and uploaded first, and
    /// a decode failure stops before any request is made.
    pub async fn create_post(&self, text: &str, image: Option<&str>) -> ApiResult<PostedTweet> {
        let media = match image {
            Some(image) => {
                let decoded = decode_image(image)?;
                debug!(
                    "uploading {} byte {} attachment",
                    decoded.bytes.len(),
                    decoded.media_type
                );

                let uploaded = self.api.upload_media(&decoded).await?;
                Some(MediaInfo {
                    media_ids: vec![uploaded.id],
                })
            }
            None => None,
        };

        let request = PostTweetRequest {
            text: text.to_string(),
            media,
            ..Default::default()
        };

        self.api.post_tweet(&request).await
    }

    pub async fn like(&self, tweet_id: &str) -> ApiResult<LikeStatus> {
        self.api.like(tweet_id).await
    }

    pub async fn follow(&self, target_user_id: &str) -> ApiResult<FollowStatus> {
        self.api.follow(target_user_id).await
    }

    pub async fn unfollow(&self, target_user_id: &str) -> ApiResult<UnfollowStatus> {
        self.api.unfollow(target_user_id).await
    }

    pub async fn user_by_username(&self, username: &str) -> ApiResult<UserData> {
        self.api.user_by_username(username).await
    }

    /// Recent posts matching `query`, [`DEFAULT_SEARCH_RESULTS`] of them unless told otherwise.
    pub async fn search(&self, query: &str, max_results: Option<u32>) -> ApiResult<Vec<Tweet>> {
        self.api
            .search_recent(query, max_results.unwrap_or(DEFAULT_SEARCH_RESULTS))
            .await
    }

    /// Trend locations. The region is accepted but the worldwide list is what the API
    /// is asked for.
    pub async fn trending_topics(&self, region: Option<u64>) -> ApiResult<Value> {
        let region = region.unwrap_or(DEFAULT_TRENDS_REGION);
        debug!("trending topics requested for region {region}, fetching available trends");

        self.api.available_trends().await
    }

    pub async fn create_list(
        &self,
        name: &str,
        description: Option<&str>,
        private: Option<bool>,
    ) -> ApiResult<ListData> {
        let request = CreateListRequest {
            name: name.to_string(),
            description: description.map(str::to_string),
            private,
        };

        self.api.create_list(&request).await
    }

    pub async fn add_list_member(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> ApiResult<ListMemberStatus> {
        self.api.add_list_member(list_id, user_id).await
    }

    pub async fn remove_list_member(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> ApiResult<ListMemberStatus> {
        self.api.remove_list_member(list_id, user_id).await
    }

    /// Lists owned by the authenticated account.
    pub async fn owned_lists(&self) -> ApiResult<Vec<ListData>> {
        self.api.owned_lists().await
    }

    /// The authenticated account.
    pub async fn me(&self) -> ApiResult<UserData> {
        self.api.me().await
    }

    pub async fn delete_tweet(&self, tweet_id: &str) -> ApiResult<DeleteStatus> {
        self.api.delete_tweet(tweet_id).await
    }

    pub async fn unlike(&self, tweet_id: &str) -> ApiResult<LikeStatus> {
        self.api.unlike(tweet_id).await
    }

    pub async fn retweet(&self, tweet_id: &str) -> ApiResult<RetweetStatus> {
        self.api.retweet(tweet_id).await
    }

    pub async fn undo_retweet(&self, tweet_id: &str) -> ApiResult<RetweetStatus> {
        self.api.undo_retweet(tweet_id).await
    }

    pub async fn get_list(&self, list_id: &str) -> ApiResult<ListData> {
        self.api.get_list(list_id).await
    }

    pub async fn delete_list(&self, list_id: &str) -> ApiResult<DeleteStatus> {
        self.api.delete_list(list_id).await
    }
}
