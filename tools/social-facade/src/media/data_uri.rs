//! `data:[<mediatype>][;param]*[;base64],<data>` parsing for image arguments.

use {
    super::models::MediaType,
    crate::error::{TwitterErrorKind, TwitterErrorResponse},
    base64::{engine::general_purpose::STANDARD, Engine as _},
};

/// A decoded image ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMedia {
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

/// Splits a data URI into its declared media type and payload.
///
/// Returns `None` when `input` is not a data URI. The media type is `""` when the URI
/// does not declare one.
pub fn split_data_uri(input: &str) -> Option<(&str, &str)> {
    let rest = input.trim_start();
    if !rest.get(..5)?.eq_ignore_ascii_case("data:") {
        return None;
    }

    let (header, payload) = rest[5..].split_once(',')?;
    let media_type = header.split(';').next().unwrap_or_default().trim();

    Some((media_type, payload))
}

/// Decodes an image given either as a data URI or as bare base64.
///
/// The declared media type picks PNG, GIF or WebP. Everything else, bare base64
/// included, uploads as JPEG.
pub fn decode_image(input: &str) -> Result<DecodedMedia, TwitterErrorResponse> {
    let (media_type, payload) = match split_data_uri(input) {
        Some((declared, payload)) => (MediaType::from_mime(declared), payload),
        None => (MediaType::ImageJpeg, input),
    };

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(TwitterErrorResponse::new(
            TwitterErrorKind::Validation,
            "Image data is empty",
        ));
    }

    let bytes = STANDARD.decode(compact.as_bytes()).map_err(|e| {
        TwitterErrorResponse::new(
            TwitterErrorKind::Validation,
            format!("Failed to decode media data: {e}"),
        )
    })?;

    Ok(DecodedMedia { media_type, bytes })
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    // "hello" in base64
    const PAYLOAD: &str = "aGVsbG8=";

    #[rstest(
        uri,
        expected,
        case("data:image/png;base64,aGVsbG8=", MediaType::ImagePng),
        case("data:image/gif;base64,aGVsbG8=", MediaType::ImageGif),
        case("data:image/webp;base64,aGVsbG8=", MediaType::ImageWebp),
        case("data:image/jpeg;base64,aGVsbG8=", MediaType::ImageJpeg),
        case("DATA:IMAGE/PNG;base64,aGVsbG8=", MediaType::ImagePng),
        case("data:image/svg+xml;base64,aGVsbG8=", MediaType::ImageJpeg),
        case("data:;base64,aGVsbG8=", MediaType::ImageJpeg),
        case("data:image/png;name=x.png;base64,aGVsbG8=", MediaType::ImagePng),
        case("aGVsbG8=", MediaType::ImageJpeg)
    )]
    fn test_media_type_selection(uri: &str, expected: MediaType) {
        let decoded = decode_image(uri).unwrap();

        assert_eq!(decoded.media_type, expected);
        assert_eq!(decoded.bytes, b"hello");
    }

    #[test]
    fn test_declared_type_not_sniffed_from_payload() {
        // The payload mentions png, the declared type does not.
        let decoded = decode_image("data:image/jpeg;base64,aW1hZ2UvcG5n").unwrap();

        assert_eq!(decoded.media_type, MediaType::ImageJpeg);
        assert_eq!(decoded.bytes, b"image/png");
    }

    #[test]
    fn test_payload_whitespace_is_ignored() {
        let decoded = decode_image("data:image/png;base64,aGVs\nbG8=").unwrap();

        assert_eq!(decoded.bytes, b"hello");
    }

    #[test]
    fn test_invalid_base64_is_validation_error() {
        let err = decode_image("data:image/png;base64,@@not-base64@@").unwrap_err();

        assert_eq!(err.kind, TwitterErrorKind::Validation);
        assert!(err.reason.contains("Failed to decode media data"));
    }

    #[test]
    fn test_empty_payload_is_validation_error() {
        assert_eq!(
            decode_image("data:image/png;base64,").unwrap_err().kind,
            TwitterErrorKind::Validation
        );
    }

    #[test]
    fn test_split_data_uri() {
        assert_eq!(
            split_data_uri(&format!("data:image/gif;base64,{PAYLOAD}")),
            Some(("image/gif", PAYLOAD))
        );
        assert_eq!(split_data_uri(PAYLOAD), None);
        assert_eq!(split_data_uri("data:image/png"), None);
    }
}
