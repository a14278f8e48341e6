//! Trending topics, still served by the v1.1 API.

use {
    crate::{
        error::TwitterErrorResponse,
        twitter_client::{Query, TwitterClient},
    },
    serde_json::Value,
};

pub const AVAILABLE_TRENDS_ENDPOINT: &str = "1.1/trends/available.json";

/// WOEID of the worldwide trend location
pub const WORLDWIDE_WOEID: u64 = 1;

impl TwitterClient {
    /// `GET /1.1/trends/available.json`
    ///
    /// Locations with trend data, as returned by the API.
    pub async fn get_available_trends(&self) -> Result<Value, TwitterErrorResponse> {
        self.get::<Value>(AVAILABLE_TRENDS_ENDPOINT, Query::new()).await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::error::TwitterErrorKind,
        mockito::Server,
        serde_json::json,
    };

    #[tokio::test]
    async fn test_get_available_trends() {
        let mut server = Server::new_async().await;
        let client = TwitterClient::for_tests(&server.url());

        let body = json!([
            { "name": "Worldwide", "woeid": 1, "countryCode": null },
            { "name": "Berlin", "woeid": 638242, "countryCode": "DE" }
        ]);

        let mock = server
            .mock("GET", "/1.1/trends/available.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let trends = client.get_available_trends().await.unwrap();

        assert_eq!(trends, body);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_available_trends_forbidden_tier() {
        let mut server = Server::new_async().await;
        let client = TwitterClient::for_tests(&server.url());

        let mock = server
            .mock("GET", "/1.1/trends/available.json")
            .with_status(403)
            .with_body(
                json!({
                    "errors": [{
                        "message": "You currently have access to a subset of X API V2 endpoints",
                        "code": 453
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client.get_available_trends().await.unwrap_err();

        assert!(err.reason.contains("subset of X API"));
        assert_eq!(err.kind, TwitterErrorKind::Forbidden);
        assert_eq!(err.status_code, Some(403));
        mock.assert_async().await;
    }
}
