//! Chunked media upload through `/2/media/upload`.

pub mod data_uri;
pub mod models;

use {
    crate::{
        error::{TwitterErrorKind, TwitterErrorResponse},
        twitter_client::{Query, TwitterApiParsedResponse, TwitterClient},
    },
    data_uri::DecodedMedia,
    log::debug,
    models::{EmptyResponse, MediaUploadData, MediaUploadResponse, ProcessingState},
    reqwest::multipart::{Form, Part},
    std::time::Duration,
};

pub const MEDIA_UPLOAD_ENDPOINT: &str = "2/media/upload";

/// Largest APPEND segment the API accepts
pub const MAX_CHUNK_SIZE: usize = 5 * 1024 * 1024;
const MAX_SEGMENTS: usize = 999;
const MAX_STATUS_CHECKS: u32 = 20;
const DEFAULT_CHECK_AFTER_SECS: u64 = 2;

impl TwitterClient {
    /// Uploads `media` with INIT, APPEND and FINALIZE and returns the finalized media.
    ///
    /// When FINALIZE reports asynchronous processing the STATUS endpoint is polled until
    /// it settles.
    pub async fn upload_media(
        &self,
        media: &DecodedMedia,
    ) -> Result<MediaUploadData, TwitterErrorResponse> {
        let total_bytes = media.bytes.len();
        let segments = total_bytes.div_ceil(MAX_CHUNK_SIZE);
        if segments == 0 || segments > MAX_SEGMENTS {
            return Err(TwitterErrorResponse::new(
                TwitterErrorKind::Validation,
                format!(
                    "Media of {total_bytes} bytes needs {segments} segments, allowed range is 1 to {MAX_SEGMENTS}"
                ),
            ));
        }

        let media_id = self.init_upload(media).await?.id;
        debug!("media {} initialized, {} segment(s)", media_id, segments);

        for (segment_index, chunk) in media.bytes.chunks(MAX_CHUNK_SIZE).enumerate() {
            self.append_chunk(&media_id, chunk, segment_index).await?;
        }

        let finalized = self.finalize_upload(&media_id).await?;

        match finalized.processing_info.as_ref().map(|info| info.state) {
            None | Some(ProcessingState::Succeeded) => Ok(finalized),
            Some(ProcessingState::Failed) => Err(processing_failed(&media_id)),
            Some(_) => self.wait_for_processing(&finalized).await,
        }
    }

    async fn init_upload(
        &self,
        media: &DecodedMedia,
    ) -> Result<MediaUploadData, TwitterErrorResponse> {
        let form = Form::new()
            .text("command", "INIT")
            .text("total_bytes", media.bytes.len().to_string())
            .text("media_type", media.media_type.to_string())
            .text("media_category", media.media_type.category().to_string());

        self.post_form::<MediaUploadResponse>(MEDIA_UPLOAD_ENDPOINT, form)
            .await?
            .parse_twitter_response()
    }

    async fn append_chunk(
        &self,
        media_id: &str,
        chunk: &[u8],
        segment_index: usize,
    ) -> Result<(), TwitterErrorResponse> {
        let part = Part::bytes(chunk.to_vec()).file_name("media.bin");

        let form = Form::new()
            .text("command", "APPEND")
            .text("media_id", media_id.to_string())
            .text("segment_index", segment_index.to_string())
            .part("media", part);

        self.post_form::<EmptyResponse>(MEDIA_UPLOAD_ENDPOINT, form)
            .await
            .map(|_| ())
    }

    async fn finalize_upload(
        &self,
        media_id: &str,
    ) -> Result<MediaUploadData, TwitterErrorResponse> {
        let form = Form::new()
            .text("command", "FINALIZE")
            .text("media_id", media_id.to_string());

        self.post_form::<MediaUploadResponse>(MEDIA_UPLOAD_ENDPOINT, form)
            .await?
            .parse_twitter_response()
    }

    async fn wait_for_processing(
        &self,
        finalized: &MediaUploadData,
    ) -> Result<MediaUploadData, TwitterErrorResponse> {
        let mut wait = finalized
            .processing_info
            .as_ref()
            .and_then(|info| info.check_after_secs)
            .unwrap_or(DEFAULT_CHECK_AFTER_SECS);

        for _ in 0..MAX_STATUS_CHECKS {
            tokio::time::sleep(Duration::from_secs(wait)).await;

            let query = Query::from([
                ("command", "STATUS".to_string()),
                ("media_id", finalized.id.clone()),
            ]);
            let status = self
                .get::<MediaUploadResponse>(MEDIA_UPLOAD_ENDPOINT, query)
                .await?
                .parse_twitter_response()?;

            let Some(info) = &status.processing_info else {
                return Ok(status);
            };

            match info.state {
                ProcessingState::Succeeded => return Ok(status),
                ProcessingState::Failed => return Err(processing_failed(&status.id)),
                ProcessingState::InProgress | ProcessingState::Pending => {
                    wait = info.check_after_secs.unwrap_or(DEFAULT_CHECK_AFTER_SECS);
                }
            }
        }

        Err(TwitterErrorResponse::new(
            TwitterErrorKind::Timeout,
            format!("Media {} processing did not finish", finalized.id),
        ))
    }
}

fn processing_failed(media_id: &str) -> TwitterErrorResponse {
    TwitterErrorResponse::new(
        TwitterErrorKind::Api,
        format!("Media {media_id} processing failed"),
    )
}
