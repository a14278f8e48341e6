//! # `social-facade`
//!
//! Convenience operations over the X/Twitter API behind a single facade.
#![doc = include_str!("../README.md")]

pub mod api;
pub mod auth;
pub mod error;
pub mod facade;
pub mod list;
pub mod media;
pub mod trends;
pub mod tweet;
pub mod twitter_client;
pub mod user;

pub use {
    api::{ApiResult, TwitterApi},
    auth::{ConfigError, TwitterAuth, TwitterConfig},
    error::{TwitterErrorKind, TwitterErrorResponse},
    facade::{SocialFacade, DEFAULT_SEARCH_RESULTS, DEFAULT_TRENDS_REGION},
    list::models::{ListData, ListMemberStatus},
    media::data_uri::{decode_image, DecodedMedia},
    tweet::models::{
        DeleteStatus, ExcludeField, LikeStatus, PostedTweet, RetweetStatus, TimelineOptions, Tweet,
    },
    twitter_client::{TwitterClient, TwitterClientError},
    user::models::{FollowStatus, UnfollowStatus, UserData},
};
