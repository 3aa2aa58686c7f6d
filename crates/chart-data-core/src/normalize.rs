use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::candle::CandlePoint;
use crate::error::ChartDataError;
use crate::record::RawPriceRecord;

/// Canonical month abbreviation and month number, or `None` if the text
/// is not an English month abbreviation.
fn month(abbr: &str) -> Option<(&'static str, u32)> {
    match abbr.to_ascii_lowercase().as_str() {
        "jan" => Some(("Jan", 1)),
        "feb" => Some(("Feb", 2)),
        "mar" => Some(("Mar", 3)),
        "apr" => Some(("Apr", 4)),
        "may" => Some(("May", 5)),
        "jun" => Some(("Jun", 6)),
        "jul" => Some(("Jul", 7)),
        "aug" => Some(("Aug", 8)),
        "sep" => Some(("Sep", 9)),
        "oct" => Some(("Oct", 10)),
        "nov" => Some(("Nov", 11)),
        "dec" => Some(("Dec", 12)),
        _ => None,
    }
}

/// Parse a `DD-Mon-YYYY` or `DD-Mon-YY` date into its trading day and the
/// canonical month abbreviation. Two-digit years are 2000-based.
fn parse_trade_date(raw: &str) -> Result<(NaiveDate, &'static str), ChartDataError> {
    let invalid = || ChartDataError::InvalidDate {
        raw: raw.to_string(),
    };

    let mut parts = raw.split('-');
    let (day, mon, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(d), Some(m), Some(y), None) => (d, m, y),
        _ => return Err(invalid()),
    };

    let day: u32 = day.parse().map_err(|_| invalid())?;
    let (abbr, month) = month(mon).ok_or_else(|| invalid())?;
    let mut year: i32 = year.parse().map_err(|_| invalid())?;
    if year < 100 {
        year += 2000;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid())?;
    Ok((date, abbr))
}

fn parse_price(
    field: &'static str,
    raw: &str,
    date: &str,
) -> Result<f64, ChartDataError> {
    let value: f64 = raw.trim().parse().map_err(|_| ChartDataError::InvalidPrice {
        field,
        raw: raw.to_string(),
        date: date.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ChartDataError::InvalidPrice {
            field,
            raw: raw.to_string(),
            date: date.to_string(),
        });
    }
    Ok(value)
}

/// Transform raw daily records into a display-ready candlestick series,
/// sorted ascending by trading day.
///
/// Pure: identical input yields identical output. Empty input yields an
/// empty series. Any malformed date or price fails the whole batch with
/// an error naming the offending field.
pub fn normalize(records: &[RawPriceRecord]) -> Result<Vec<CandlePoint>, ChartDataError> {
    let mut points = Vec::with_capacity(records.len());

    for record in records {
        let (date, abbr) = parse_trade_date(&record.date)?;

        let ohlc = [
            parse_price("open", &record.open, &record.date)?,
            parse_price("high", &record.high, &record.date)?,
            parse_price("low", &record.low, &record.date)?,
            parse_price("close", &record.close, &record.date)?,
        ];

        let timestamp: DateTime<Utc> = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let label = format!("{:02} {} {:02}", date.day(), abbr, date.year() % 100);

        points.push(CandlePoint {
            label,
            ohlc,
            timestamp,
        });
    }

    points.sort_by_key(|p| p.timestamp);
    Ok(points)
}
