//! CSV snapshot decoding, for hand-made or exported snapshots.
//!
//! Columns are found by header name. An empty `sector` field is a null sector.

use crate::domain::error::DashboardError;
use crate::domain::series::{PricePoint, PriceSeries};
use crate::domain::ticker::TickerRecord;
use chrono::NaiveDate;

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, String> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| format!("missing column '{name}'"))
}

fn reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(bytes)
}

pub fn decode_lookup(bytes: &[u8]) -> Result<Vec<TickerRecord>, DashboardError> {
    let malformed = |reason: String| DashboardError::LookupMalformed { reason };

    let mut rdr = reader(bytes);
    let headers = rdr
        .headers()
        .map_err(|e| malformed(format!("CSV header error: {e}")))?
        .clone();
    let ticker_idx = column_index(&headers, "ticker").map_err(malformed)?;
    let counter_idx = column_index(&headers, "counter_id").map_err(malformed)?;
    let sector_idx = column_index(&headers, "sector").map_err(malformed)?;

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| malformed(format!("CSV parse error: {e}")))?;
        let field = |idx: usize| record.get(idx).filter(|v| !v.is_empty());

        let ticker = field(ticker_idx)
            .ok_or_else(|| malformed(format!("null ticker at row {row}")))?;
        let counter_id = field(counter_idx)
            .ok_or_else(|| malformed(format!("null counter_id at row {row}")))?;
        records.push(TickerRecord::new(ticker, counter_id, field(sector_idx)));
    }
    Ok(records)
}

/// Accepts `YYYY-MM-DD` optionally followed by a time part.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let day = value.split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Whole, non-negative volumes; `1200.0` is accepted as 1200.
fn parse_volume(value: &str) -> Option<u64> {
    value.parse::<u64>().ok().or_else(|| {
        let v: f64 = value.parse().ok()?;
        (v.is_finite() && v >= 0.0 && v.fract() == 0.0).then_some(v as u64)
    })
}

pub fn decode_series(ticker: &str, bytes: &[u8]) -> Result<PriceSeries, DashboardError> {
    let malformed = |reason: String| DashboardError::SeriesMalformed {
        ticker: ticker.to_string(),
        reason,
    };

    let mut rdr = reader(bytes);
    let headers = rdr
        .headers()
        .map_err(|e| malformed(format!("CSV header error: {e}")))?
        .clone();
    let date_idx = column_index(&headers, "Date").map_err(malformed)?;
    let close_idx = column_index(&headers, "Close").map_err(malformed)?;
    let volume_idx = column_index(&headers, "Volume").map_err(malformed)?;

    let mut points = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| malformed(format!("CSV parse error: {e}")))?;

        let date = record
            .get(date_idx)
            .and_then(parse_date)
            .ok_or_else(|| malformed(format!("invalid Date at row {row}")))?;
        let close = record
            .get(close_idx)
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or_else(|| malformed(format!("invalid Close at row {row}")))?;
        let volume = record
            .get(volume_idx)
            .and_then(parse_volume)
            .ok_or_else(|| malformed(format!("invalid Volume at row {row}")))?;

        points.push(PricePoint {
            date,
            close,
            volume,
        });
    }

    Ok(PriceSeries::new(ticker, points))
}
