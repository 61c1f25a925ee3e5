use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{fallback, Prediction, PredictionSource, Surface};

/// Why a remote prediction attempt failed. Never surfaced to callers;
/// `predict` logs the reason and answers from the fallback model instead.
#[derive(Debug, Error)]
enum ApiError {
    /// Connection failure, timeout, or an unparsable body.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Response body of `GET /predict`. The API does not echo a source tag;
/// we add it after parsing.
#[derive(Debug, Deserialize)]
struct ApiPrediction {
    player1_win_prob: f64,
    player2_win_prob: f64,
    favorite: super::Favorite,
}

/// Client for the remote tennis prediction API.
#[derive(Clone)]
pub struct PredictionClient {
    http: Client,
    api_url: String,
    predict_timeout: Duration,
    probe_timeout: Duration,
}

impl PredictionClient {
    pub fn new(api_url: &str, predict_timeout: Duration, probe_timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(PredictionClient {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            predict_timeout,
            probe_timeout,
        })
    }

    /// Predict the outcome of `rank1` vs `rank2` on the given surface.
    ///
    /// Single attempt against the remote model; any failure (non-success
    /// status, network error, timeout, bad body) folds into the closed-form
    /// fallback. Always returns a prediction.
    pub async fn predict(&self, rank1: u32, rank2: u32, surface: Surface) -> Prediction {
        match self.predict_remote(rank1, rank2, surface).await {
            Ok(prediction) => prediction,
            Err(err) => {
                debug!("Remote prediction unavailable ({}), using fallback model", err);
                fallback::fallback_prediction(rank1, rank2)
            }
        }
    }

    async fn predict_remote(
        &self,
        rank1: u32,
        rank2: u32,
        surface: Surface,
    ) -> Result<Prediction, ApiError> {
        let url = format!("{}/predict", self.api_url);
        debug!("Requesting prediction: {} ({} vs {})", url, rank1, rank2);

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("player1_rank", rank1.to_string()),
                ("player2_rank", rank2.to_string()),
                ("surface", surface.as_str().to_string()),
            ])
            .timeout(self.predict_timeout)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }

        let api: ApiPrediction = resp.json().await?;
        Ok(Prediction {
            player1_win_prob: api.player1_win_prob,
            player2_win_prob: api.player2_win_prob,
            favorite: api.favorite,
            source: PredictionSource::MlApi,
        })
    }

    /// Probe the API root. True only on a success status; every failure
    /// reads as unreachable. Feeds the UI status indicator, nothing else.
    pub async fn check_connection(&self) -> bool {
        let url = format!("{}/", self.api_url);
        match self
            .http
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(err) => {
                debug!("Connectivity probe failed: {}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::Favorite;
    use approx::assert_relative_eq;

    fn unreachable_client() -> PredictionClient {
        // Nothing listens on port 9 (discard); connection is refused fast.
        PredictionClient::new(
            "http://127.0.0.1:9",
            Duration::from_secs(5),
            Duration::from_secs(3),
        )
        .unwrap()
    }

    #[test]
    fn api_body_parses_without_source() {
        let body = r#"{"player1_win_prob":0.72,"player2_win_prob":0.28,"favorite":"Player 1"}"#;
        let api: ApiPrediction = serde_json::from_str(body).unwrap();
        assert_relative_eq!(api.player1_win_prob, 0.72, epsilon = 1e-12);
        assert_eq!(api.favorite, Favorite::Player1);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = PredictionClient::new(
            "http://example.invalid/",
            Duration::from_secs(5),
            Duration::from_secs(3),
        )
        .unwrap();
        assert_eq!(client.api_url, "http://example.invalid");
    }

    #[tokio::test]
    async fn unreachable_api_falls_back() {
        let client = unreachable_client();
        let p = client.predict(1, 30, Surface::Hard).await;
        assert_eq!(p.source, PredictionSource::Fallback);
        assert_eq!(p.favorite, Favorite::Player1);
        assert_relative_eq!(p.player1_win_prob + p.player2_win_prob, 1.0, epsilon = 1e-12);
    }

    #[tokio::test]
    async fn probe_is_false_for_unreachable_host() {
        let client = unreachable_client();
        assert!(!client.check_connection().await);
    }
}
