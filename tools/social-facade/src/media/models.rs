use {
    crate::{error::TwitterApiError, impl_twitter_response_parser},
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Image types accepted for post attachments
#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum MediaType {
    #[serde(rename = "image/jpeg")]
    ImageJpeg,
    #[serde(rename = "image/png")]
    ImagePng,
    #[serde(rename = "image/gif")]
    ImageGif,
    #[serde(rename = "image/webp")]
    ImageWebp,
}

impl MediaType {
    /// Maps a declared MIME type to an upload type. Unknown or missing types are JPEG.
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => MediaType::ImagePng,
            "image/gif" => MediaType::ImageGif,
            "image/webp" => MediaType::ImageWebp,
            _ => MediaType::ImageJpeg,
        }
    }

    /// Animated GIFs go through their own processing pipeline.
    pub fn category(&self) -> MediaCategory {
        match self {
            MediaType::ImageGif => MediaCategory::TweetGif,
            _ => MediaCategory::TweetImage,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::ImageJpeg => write!(f, "image/jpeg"),
            MediaType::ImagePng => write!(f, "image/png"),
            MediaType::ImageGif => write!(f, "image/gif"),
            MediaType::ImageWebp => write!(f, "image/webp"),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
    TweetImage,
    TweetGif,
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaCategory::TweetImage => write!(f, "tweet_image"),
            MediaCategory::TweetGif => write!(f, "tweet_gif"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct MediaUploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MediaUploadData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<TwitterApiError>>,
}

/// APPEND answers with an empty 2xx body
#[derive(Debug, Deserialize)]
pub struct EmptyResponse {}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct MediaUploadData {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_after_secs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_info: Option<ProcessingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct ProcessingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_after_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<i64>,
    pub state: ProcessingState,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingState {
    Succeeded,
    InProgress,
    Pending,
    Failed,
}

impl_twitter_response_parser!(MediaUploadResponse, MediaUploadData);
