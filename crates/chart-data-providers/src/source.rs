use async_trait::async_trait;
use chart_data_core::record::RawPriceRecord;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::SourceError;

/// Trait for fetching a symbol's daily price history from an external source.
#[async_trait]
pub trait ChartSource: Send + Sync {
    /// Source name (for logging/display).
    fn name(&self) -> &str;

    /// Fetch daily price records for a symbol.
    /// Records come back in source order; normalization handles sorting.
    async fn fetch_history(&self, symbol: &str) -> Result<Vec<RawPriceRecord>, SourceError>;
}

/// One news headline for a symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct Headline {
    pub title: String,
    pub url: Option<String>,
    pub source: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// AI-generated trading commentary for a symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct Analysis {
    pub action: String,
    pub confidence: f64,
    pub trend: String,
    pub reasoning: String,
}

/// Trait for fetching news headlines. Failures here are non-fatal to chart
/// rendering; callers log and degrade to an empty list.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_headlines(&self, symbol: &str) -> Result<Vec<Headline>, SourceError>;
}

/// Trait for fetching AI trading analysis. Same degradation policy as news.
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    async fn fetch_analysis(&self, symbol: &str) -> Result<Analysis, SourceError>;
}
