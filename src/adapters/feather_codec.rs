//! Feather (Arrow IPC) snapshot decoding via polars.

use crate::domain::error::DashboardError;
use crate::domain::series::{PricePoint, PriceSeries};
use crate::domain::ticker::TickerRecord;
use chrono::NaiveDate;
use polars::prelude::*;
use std::io::Cursor;

fn read_frame(bytes: &[u8]) -> PolarsResult<DataFrame> {
    IpcReader::new(Cursor::new(bytes.to_vec())).finish()
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, String> {
    let column = df
        .column(name)
        .map_err(|_| format!("missing column '{name}'"))?
        .cast(&DataType::String)
        .map_err(|e| format!("column '{name}': {e}"))?;
    let values = column.str().map_err(|e| format!("column '{name}': {e}"))?;
    Ok(values.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Whole, non-negative volumes. Fractional, negative or out-of-range values
/// come back as `None` rather than being truncated.
fn volume_values(df: &DataFrame) -> Result<Vec<Option<u64>>, String> {
    let invalid = |e: PolarsError| format!("column 'Volume': {e}");
    let column = df
        .column("Volume")
        .map_err(|_| "missing column 'Volume'".to_string())?;

    if column.dtype().is_float() {
        let values = column.cast(&DataType::Float64).map_err(invalid)?;
        let values = values.f64().map_err(invalid)?;
        Ok(values
            .into_iter()
            .map(|v| {
                v.filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v < u64::MAX as f64)
                    .map(|v| v as u64)
            })
            .collect())
    } else {
        let values = column.strict_cast(&DataType::Int64).map_err(invalid)?;
        let values = values.i64().map_err(invalid)?;
        Ok(values
            .into_iter()
            .map(|v| v.and_then(|v| u64::try_from(v).ok()))
            .collect())
    }
}

/// Decode the lookup snapshot. Null sectors become the sentinel.
pub fn decode_lookup(bytes: &[u8]) -> Result<Vec<TickerRecord>, DashboardError> {
    let malformed = |reason: String| DashboardError::LookupMalformed { reason };

    let df = read_frame(bytes).map_err(|e| malformed(format!("not a feather file: {e}")))?;
    let tickers = string_values(&df, "ticker").map_err(malformed)?;
    let counters = string_values(&df, "counter_id").map_err(malformed)?;
    let sectors = string_values(&df, "sector").map_err(malformed)?;

    tickers
        .into_iter()
        .zip(counters)
        .zip(sectors)
        .enumerate()
        .map(|(row, ((ticker, counter_id), sector))| -> Result<TickerRecord, DashboardError> {
            let ticker = ticker.ok_or_else(|| malformed(format!("null ticker at row {row}")))?;
            let counter_id =
                counter_id.ok_or_else(|| malformed(format!("null counter_id at row {row}")))?;
            Ok(TickerRecord::new(ticker, counter_id, sector.as_deref()))
        })
        .collect()
}

/// Decode one ticker's snapshot. `Date` may be a date or a timestamp column.
pub fn decode_series(ticker: &str, bytes: &[u8]) -> Result<PriceSeries, DashboardError> {
    let malformed = |reason: String| DashboardError::SeriesMalformed {
        ticker: ticker.to_string(),
        reason,
    };

    let df = read_frame(bytes).map_err(|e| malformed(format!("not a feather file: {e}")))?;
    let column = |name: &str, dtype: DataType| -> Result<Column, String> {
        df.column(name)
            .map_err(|_| format!("missing column '{name}'"))?
            .cast(&dtype)
            .map_err(|e| format!("column '{name}': {e}"))
    };

    // Date -> days since epoch, which sidesteps the source time unit.
    let dates = column("Date", DataType::Date)
        .and_then(|c| c.cast(&DataType::Int32).map_err(|e| format!("column 'Date': {e}")))
        .map_err(malformed)?;
    let closes = column("Close", DataType::Float64).map_err(malformed)?;
    let volumes = volume_values(&df).map_err(malformed)?;

    let dates = dates.i32().map_err(|e| malformed(e.to_string()))?;
    let closes = closes.f64().map_err(|e| malformed(e.to_string()))?;

    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
        .ok_or_else(|| malformed("epoch out of range".into()))?;

    let mut points = Vec::with_capacity(df.height());
    for (row, ((date, close), volume)) in dates
        .into_iter()
        .zip(closes.into_iter())
        .zip(volumes)
        .enumerate()
    {
        let days = date.ok_or_else(|| malformed(format!("null Date at row {row}")))?;
        let close = close.ok_or_else(|| malformed(format!("null Close at row {row}")))?;
        let volume = volume.ok_or_else(|| malformed(format!("invalid Volume at row {row}")))?;
        points.push(PricePoint {
            date: epoch + chrono::Duration::days(i64::from(days)),
            close,
            volume,
        });
    }

    Ok(PriceSeries::new(ticker, points))
}
