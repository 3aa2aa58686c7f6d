use serde::Deserialize;

/// One trading day's prices as received from the data source.
/// All fields are strings on the wire; parsing happens in `normalize`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPriceRecord {
    /// Display date, `DD-Mon-YYYY` or `DD-Mon-YY` (e.g. `"05-Jan-24"`).
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

/// The chart endpoint returns either a bare record array or an envelope
/// with the array under `data`. Both decode through this enum.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    Envelope { data: Vec<RawPriceRecord> },
    Bare(Vec<RawPriceRecord>),
}

impl HistoryPayload {
    pub fn into_records(self) -> Vec<RawPriceRecord> {
        match self {
            HistoryPayload::Envelope { data } => data,
            HistoryPayload::Bare(records) => records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD_JSON: &str =
        r#"{"date": "05-Jan-24", "open": "100", "high": "110", "low": "95", "close": "105"}"#;

    #[test]
    fn decode_bare_array() {
        let json = format!("[{RECORD_JSON}]");
        let payload: HistoryPayload = serde_json::from_str(&json).unwrap();
        let records = payload.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "05-Jan-24");
        assert_eq!(records[0].close, "105");
    }

    #[test]
    fn decode_envelope() {
        let json = format!(r#"{{"data": [{RECORD_JSON}]}}"#);
        let payload: HistoryPayload = serde_json::from_str(&json).unwrap();
        let records = payload.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].open, "100");
    }

    #[test]
    fn decode_empty_envelope() {
        let payload: HistoryPayload = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(payload.into_records().is_empty());
    }
}
