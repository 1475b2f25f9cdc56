//! Mood data source
//!
//! `MoodSource` is the seam between the renderer and wherever the counts come
//! from; `MoodDataClient` is the HTTP implementation against `/mood-data`.

use async_trait::async_trait;
use reqwest::Client;

use super::distribution::MoodDistribution;
use super::error::{MoodError, MoodResult};
use crate::config::PageConfig;

/// Something that can produce the current mood distribution
#[async_trait]
pub trait MoodSource: Send + Sync {
    /// Fetch a fresh distribution. Called once per page load.
    async fn fetch_mood_data(&self) -> MoodResult<MoodDistribution>;
}

/// HTTP client for the mood data endpoint
///
/// Issues a single GET with no parameters or extra headers. There are no
/// retries; the request waits indefinitely unless a timeout is configured.
pub struct MoodDataClient {
    client: Client,
    url: String,
}

impl MoodDataClient {
    /// Create a client for `config.base_url` + `config.mood_data_path`
    pub fn new(config: &PageConfig) -> MoodResult<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(std::time::Duration::from_millis(ms));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            url: config.mood_data_url(),
        })
    }

    /// Full endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MoodSource for MoodDataClient {
    async fn fetch_mood_data(&self) -> MoodResult<MoodDistribution> {
        tracing::debug!(url = %self.url, "Fetching mood data");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                MoodError::Timeout
            } else if e.is_connect() {
                MoodError::Unavailable
            } else {
                MoodError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(MoodError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.bytes().await?;
        let distribution = MoodDistribution::from_json(&body)?;

        tracing::debug!(categories = distribution.len(), "Mood data received");
        Ok(distribution)
    }
}

/// A fixed distribution, for pages rendered without a live endpoint
#[async_trait]
impl MoodSource for MoodDistribution {
    async fn fetch_mood_data(&self) -> MoodResult<MoodDistribution> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    /// Serve `router` on an ephemeral port, returning its base URL
    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> MoodDataClient {
        let config = PageConfig {
            base_url,
            ..PageConfig::default()
        };
        MoodDataClient::new(&config).unwrap()
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client = client_for("http://localhost:5000/".to_string());
        assert_eq!(client.url(), "http://localhost:5000/mood-data");
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let router = Router::new().route(
            "/mood-data",
            get(|| async { Json(json!({"happy": 12, "sad": 3})) }),
        );
        let client = client_for(spawn_server(router).await);

        let dist = client.fetch_mood_data().await.unwrap();
        assert_eq!(dist.labels(), vec!["happy", "sad"]);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let router = Router::new().route(
            "/mood-data",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "db locked") }),
        );
        let client = client_for(spawn_server(router).await);

        match client.fetch_mood_data().await.unwrap_err() {
            MoodError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "db locked");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_missing_route() {
        let client = client_for(spawn_server(Router::new()).await);
        let err = client.fetch_mood_data().await.unwrap_err();
        assert!(matches!(err, MoodError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let router = Router::new().route("/mood-data", get(|| async { "<html>login</html>" }));
        let client = client_for(spawn_server(router).await);

        let err = client.fetch_mood_data().await.unwrap_err();
        assert!(matches!(err, MoodError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));
        let err = client.fetch_mood_data().await.unwrap_err();
        assert!(matches!(err, MoodError::Unavailable));
    }

    #[tokio::test]
    async fn test_static_source() {
        let dist = MoodDistribution::from_counts([("calm", 4)]);
        assert_eq!(dist.fetch_mood_data().await.unwrap(), dist);
    }
}
