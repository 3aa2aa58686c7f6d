use chart_data_core::candle::CandlePoint;

/// Request lifecycle phase for a symbol's chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Snapshot of the most recent fetch for a symbol.
///
/// `Failed` is only reached once the retry bound is exhausted or the payload
/// itself is malformed; `Success` always carries `error: None`.
#[derive(Debug, Clone)]
pub struct FetchState {
    pub symbol: String,
    pub status: FetchStatus,
    pub data: Vec<CandlePoint>,
    pub error: Option<String>,
    /// Zero-based retry counter: 0 on the initial attempt.
    pub attempt: u32,
}

impl FetchState {
    pub fn idle() -> Self {
        Self {
            symbol: String::new(),
            status: FetchStatus::Idle,
            data: Vec::new(),
            error: None,
            attempt: 0,
        }
    }

    /// Entering an attempt clears prior data and error.
    pub(crate) fn loading(symbol: &str, attempt: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            status: FetchStatus::Loading,
            data: Vec::new(),
            error: None,
            attempt,
        }
    }

    pub(crate) fn success(symbol: &str, data: Vec<CandlePoint>, attempt: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            status: FetchStatus::Success,
            data,
            error: None,
            attempt,
        }
    }

    pub(crate) fn failed(symbol: &str, error: String, attempt: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            status: FetchStatus::Failed,
            data: Vec::new(),
            error: Some(error),
            attempt,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }
}
