use async_trait::async_trait;
use chart_data_core::record::{HistoryPayload, RawPriceRecord};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::SourceError;
use crate::source::{Analysis, AnalysisSource, ChartSource, Headline, NewsSource};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// JSON HTTP backend serving chart history, news, and analysis per symbol.
///
/// Endpoints: `{base}/chart/{symbol}`, `{base}/news/{symbol}`,
/// `{base}/analysis/{symbol}`.
pub struct HttpApiSource {
    client: Client,
    base_url: String,
}

impl HttpApiSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create from the `CHART_API_URL` environment variable, falling back
    /// to the built-in default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CHART_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}/{path}", self.base_url);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status,
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("failed to parse response: {e}")))
    }
}

impl Default for HttpApiSource {
    fn default() -> Self {
        Self::from_env()
    }
}

#[async_trait]
impl ChartSource for HttpApiSource {
    fn name(&self) -> &str {
        "http-api"
    }

    async fn fetch_history(&self, symbol: &str) -> Result<Vec<RawPriceRecord>, SourceError> {
        let payload: HistoryPayload = self.get_json(&format!("chart/{symbol}")).await?;
        Ok(payload.into_records())
    }
}

#[async_trait]
impl NewsSource for HttpApiSource {
    async fn fetch_headlines(&self, symbol: &str) -> Result<Vec<Headline>, SourceError> {
        self.get_json(&format!("news/{symbol}")).await
    }
}

#[async_trait]
impl AnalysisSource for HttpApiSource {
    async fn fetch_analysis(&self, symbol: &str) -> Result<Analysis, SourceError> {
        self.get_json(&format!("analysis/{symbol}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_history_bare_array() {
        let json = r#"[
            {"date": "04-Jan-24", "open": "99", "high": "101", "low": "98", "close": "100.5"},
            {"date": "05-Jan-24", "open": "100", "high": "110", "low": "95", "close": "105"}
        ]"#;

        let payload: HistoryPayload = serde_json::from_str(json).unwrap();
        let records = payload.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].date, "05-Jan-24");
    }

    #[test]
    fn parse_history_envelope() {
        let json = r#"{
            "data": [
                {"date": "05-Jan-24", "open": "100", "high": "110", "low": "95", "close": "105"}
            ]
        }"#;

        let payload: HistoryPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_records().len(), 1);
    }

    #[test]
    fn parse_headlines() {
        let json = r#"[
            {"title": "Shares rally on earnings beat", "url": "https://example.com/a",
             "source": "Newswire", "published_at": "2024-01-05T13:30:00Z"},
            {"title": "Analyst upgrades stock"}
        ]"#;

        let headlines: Vec<Headline> = serde_json::from_str(json).unwrap();
        assert_eq!(headlines.len(), 2);
        assert_eq!(headlines[0].source.as_deref(), Some("Newswire"));
        assert!(headlines[1].url.is_none());
    }

    #[test]
    fn parse_analysis() {
        let json = r#"{
            "action": "BUY",
            "confidence": 0.72,
            "trend": "bullish",
            "reasoning": "Higher lows with expanding volume."
        }"#;

        let analysis: Analysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.action, "BUY");
        assert!(analysis.confidence > 0.7);
        assert_eq!(analysis.trend, "bullish");
    }

    #[test]
    fn from_env_falls_back_to_default() {
        // CHART_API_URL is unset in the test environment.
        if std::env::var("CHART_API_URL").is_err() {
            let source = HttpApiSource::from_env();
            assert_eq!(source.base_url, DEFAULT_API_URL);
        }
    }
}
