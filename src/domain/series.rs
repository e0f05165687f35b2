//! Per-ticker price/volume time series.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Points are sorted by date so the latest record is the last one.
    pub fn new(ticker: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self {
            ticker: ticker.into(),
            points,
        }
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Closing price as displayed: shortest exact decimal, always with a
/// fractional part (`1.0`, `0.095`). Never rounded.
pub fn format_close(close: f64) -> String {
    format!("{close:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_keeps_fractional_part() {
        assert_eq!(format_close(1.0), "1.0");
        assert_eq!(format_close(1.23), "1.23");
        assert_eq!(format_close(0.095), "0.095");
    }

    fn point(d: u32, close: f64, volume: u64) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(2020, 3, d).unwrap(),
            close,
            volume,
        }
    }

    #[test]
    fn latest_is_chronologically_last() {
        let series = PriceSeries::new(
            "APER",
            vec![point(3, 1.2, 300), point(1, 1.0, 100), point(2, 1.1, 200)],
        );
        let latest = series.latest().unwrap();
        assert_eq!(latest.volume, 300);
        assert_eq!(series.points[0].volume, 100);
    }

    #[test]
    fn empty_series_has_no_latest() {
        let series = PriceSeries::new("APER", vec![]);
        assert!(series.latest().is_none());
        assert!(series.is_empty());
    }
}
