//! Ticker records and sector choices.

use serde::Serialize;
use std::fmt;

/// Sector assigned to tickers whose lookup row has no sector.
pub const UNSPECIFIED_SECTOR: &str = "Unspecified";

/// Synthetic sector choice spanning every sector.
pub const ALL_SECTORS: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerRecord {
    pub ticker: String,
    pub counter_id: String,
    pub sector: String,
}

impl TickerRecord {
    /// Build a record, substituting the sentinel for a missing sector.
    pub fn new(ticker: impl Into<String>, counter_id: impl Into<String>, sector: Option<&str>) -> Self {
        Self {
            ticker: ticker.into(),
            counter_id: counter_id.into(),
            sector: sector.unwrap_or(UNSPECIFIED_SECTOR).to_string(),
        }
    }

    /// Dropdown label: "ticker counter_id".
    pub fn label(&self) -> String {
        format!("{} {}", self.ticker, self.counter_id)
    }
}

/// A sector dropdown value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectorFilter {
    All,
    Named(String),
}

impl SectorFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL_SECTORS {
            SectorFilter::All
        } else {
            SectorFilter::Named(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectorFilter::All => ALL_SECTORS,
            SectorFilter::Named(name) => name,
        }
    }
}

impl fmt::Display for SectorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sector_becomes_unspecified() {
        let rec = TickerRecord::new("AAX", "5238", None);
        assert_eq!(rec.sector, UNSPECIFIED_SECTOR);
    }

    #[test]
    fn label_joins_ticker_and_counter() {
        let rec = TickerRecord::new("APER", "0209", Some("Pharmaceuticals"));
        assert_eq!(rec.label(), "APER 0209");
    }

    #[test]
    fn parse_recognises_all() {
        assert_eq!(SectorFilter::parse("All"), SectorFilter::All);
        assert_eq!(
            SectorFilter::parse("Energy"),
            SectorFilter::Named("Energy".into())
        );
        assert_eq!(SectorFilter::All.to_string(), "All");
    }
}
