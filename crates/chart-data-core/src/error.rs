use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartDataError {
    #[error("invalid date '{raw}': expected DD-Mon-YYYY")]
    InvalidDate { raw: String },

    #[error("invalid {field} price '{raw}' for {date}")]
    InvalidPrice {
        field: &'static str,
        raw: String,
        date: String,
    },
}
