use std::time::Duration;

use super::{FetchError, ImageFetcher};
use crate::app::config::NetworkConfig;

/// Fetches images over HTTP(S) with a shared connection pool
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &NetworkConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        log::debug!("Fetching image: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&NetworkConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_bytes() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/seed/abc-0/600/800"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
            .mount(&mock_server)
            .await;

        let url = format!("{}/seed/abc-0/600/800", mock_server.uri());
        let bytes = fetcher().fetch(&url).await.unwrap();

        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
    }

    #[tokio::test]
    async fn test_fetch_sends_configured_user_agent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "deck-tests/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1]))
            .mount(&mock_server)
            .await;

        let config = NetworkConfig {
            user_agent: "deck-tests/1.0".to_string(),
            ..NetworkConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();

        assert!(fetcher.fetch(&mock_server.uri()).await.is_ok());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = fetcher().fetch(&mock_server.uri()).await;

        match result {
            Err(FetchError::Status(status)) => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        // Port 9 (discard) on localhost is almost never listening
        let result = fetcher().fetch("http://127.0.0.1:9/image").await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
