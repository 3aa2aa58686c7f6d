pub mod fetcher;
pub mod state;

pub use fetcher::ChartFetcher;
pub use state::{FetchState, FetchStatus};
