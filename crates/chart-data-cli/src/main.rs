use std::sync::Arc;

use anyhow::Result;
use chart_data_fetch::{ChartFetcher, FetchStatus};
use chart_data_providers::http::HttpApiSource;
use chart_data_providers::source::{AnalysisSource, NewsSource};
use clap::{Parser, Subcommand};
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "chart-data",
    about = "Fetch and display candlestick chart data, news, and AI analysis"
)]
struct Cli {
    /// Base URL of the data API (default: $CHART_API_URL or the built-in default)
    #[arg(long)]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a symbol's price history and print the candlestick series
    Chart {
        /// Ticker symbol
        #[arg(short, long)]
        symbol: String,
    },

    /// Print news headlines for a symbol
    News {
        #[arg(short, long)]
        symbol: String,
    },

    /// Print AI trading commentary for a symbol
    Analysis {
        #[arg(short, long)]
        symbol: String,
    },
}

fn create_source(api_url: Option<&str>) -> HttpApiSource {
    match api_url {
        Some(url) => HttpApiSource::new(url),
        None => HttpApiSource::from_env(),
    }
}

async fn cmd_chart(source: Arc<HttpApiSource>, symbol: &str) -> Result<()> {
    let fetcher = ChartFetcher::new(source);
    fetcher.fetch(symbol).await;

    let state = fetcher.state();
    match state.status {
        FetchStatus::Success => {
            if state.data.is_empty() {
                println!("{symbol}: no data");
                return Ok(());
            }

            println!(
                "{:<12} {:>10} {:>10} {:>10} {:>10}",
                "date", "open", "high", "low", "close"
            );
            for point in &state.data {
                println!(
                    "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                    point.label,
                    point.open(),
                    point.high(),
                    point.low(),
                    point.close()
                );
            }
            Ok(())
        }
        _ => {
            let message = state.error.unwrap_or_else(|| "fetch failed".to_string());
            anyhow::bail!("{symbol}: {message}")
        }
    }
}

/// News is auxiliary: failure degrades to an empty listing, never an error.
async fn cmd_news(source: &HttpApiSource, symbol: &str) -> Result<()> {
    match source.fetch_headlines(symbol).await {
        Ok(headlines) if headlines.is_empty() => println!("{symbol}: no headlines"),
        Ok(headlines) => {
            for headline in &headlines {
                match (&headline.source, &headline.url) {
                    (Some(from), Some(url)) => println!("{} ({from}) {url}", headline.title),
                    (Some(from), None) => println!("{} ({from})", headline.title),
                    (None, Some(url)) => println!("{} {url}", headline.title),
                    (None, None) => println!("{}", headline.title),
                }
            }
        }
        Err(e) => warn!("{symbol}: news unavailable: {e}"),
    }
    Ok(())
}

/// Same degradation policy as news.
async fn cmd_analysis(source: &HttpApiSource, symbol: &str) -> Result<()> {
    match source.fetch_analysis(symbol).await {
        Ok(analysis) => {
            println!("action:     {}", analysis.action);
            println!("confidence: {:.0}%", analysis.confidence * 100.0);
            println!("trend:      {}", analysis.trend);
            println!("reasoning:  {}", analysis.reasoning);
        }
        Err(e) => warn!("{symbol}: analysis unavailable: {e}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    let source = create_source(cli.api_url.as_deref());

    match &cli.command {
        Commands::Chart { symbol } => {
            cmd_chart(Arc::new(source), &symbol.to_uppercase()).await?;
        }
        Commands::News { symbol } => {
            cmd_news(&source, &symbol.to_uppercase()).await?;
        }
        Commands::Analysis { symbol } => {
            cmd_analysis(&source, &symbol.to_uppercase()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_chart_args() {
        let cli = Cli::try_parse_from(["chart-data", "chart", "-s", "AAPL"]).unwrap();
        assert!(cli.api_url.is_none());
        assert_eq!(cli.log_level, "info");
        match cli.command {
            Commands::Chart { symbol } => assert_eq!(symbol, "AAPL"),
            _ => panic!("expected Chart command"),
        }
    }

    #[test]
    fn parse_chart_with_api_url() {
        let cli = Cli::try_parse_from([
            "chart-data",
            "--api-url",
            "http://localhost:9999/api",
            "chart",
            "--symbol",
            "msft",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9999/api"));
        match cli.command {
            Commands::Chart { symbol } => assert_eq!(symbol, "msft"),
            _ => panic!("expected Chart command"),
        }
    }

    #[test]
    fn parse_news_args() {
        let cli = Cli::try_parse_from(["chart-data", "news", "-s", "AAPL"]).unwrap();
        match cli.command {
            Commands::News { symbol } => assert_eq!(symbol, "AAPL"),
            _ => panic!("expected News command"),
        }
    }

    #[test]
    fn parse_analysis_args() {
        let cli = Cli::try_parse_from(["chart-data", "analysis", "-s", "AAPL"]).unwrap();
        match cli.command {
            Commands::Analysis { symbol } => assert_eq!(symbol, "AAPL"),
            _ => panic!("expected Analysis command"),
        }
    }

    #[test]
    fn symbol_is_required() {
        assert!(Cli::try_parse_from(["chart-data", "chart"]).is_err());
    }
}
