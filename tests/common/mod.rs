#![allow(dead_code)]

use chrono::NaiveDate;
use sectorboard::domain::error::DashboardError;
use sectorboard::domain::lookup::LookupTable;
pub use sectorboard::domain::series::{PricePoint, PriceSeries};
pub use sectorboard::domain::ticker::TickerRecord;
use sectorboard::ports::data_port::DataPort;
use std::collections::HashMap;
use std::path::Path;

pub struct MockDataPort {
    pub records: Vec<TickerRecord>,
    pub series: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            series: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_ticker(mut self, ticker: &str, counter_id: &str, sector: Option<&str>) -> Self {
        self.records.push(TickerRecord::new(ticker, counter_id, sector));
        self
    }

    pub fn with_series(mut self, ticker: &str, points: Vec<PricePoint>) -> Self {
        self.series.insert(ticker.to_string(), points);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_lookup(&self) -> Result<Vec<TickerRecord>, DashboardError> {
        Ok(self.records.clone())
    }

    fn fetch_series(&self, ticker: &str) -> Result<PriceSeries, DashboardError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(DashboardError::Storage {
                reason: reason.clone(),
            });
        }
        self.series
            .get(ticker)
            .map(|points| PriceSeries::new(ticker, points.clone()))
            .ok_or_else(|| DashboardError::TickerNotFound {
                ticker: ticker.to_string(),
            })
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn point(d: &str, close: f64, volume: u64) -> PricePoint {
    PricePoint {
        date: date(d),
        close,
        volume,
    }
}

/// Two pharmaceutical tickers (latest volumes 1000 and 3000), one technology
/// ticker (4000) and one ticker without a sector whose latest volume is 0.
/// Rows are deliberately out of date order.
pub fn sample_port() -> MockDataPort {
    MockDataPort::new()
        .with_ticker("APER", "0209", Some("Pharmaceuticals"))
        .with_ticker("GREATEC", "0208", Some("Technology"))
        .with_ticker("DUOPHARMA", "7148", Some("Pharmaceuticals"))
        .with_ticker("AAX", "5238", None)
        .with_series(
            "APER",
            vec![
                point("2024-01-04", 1.23, 1000),
                point("2024-01-02", 1.20, 5000),
                point("2024-01-03", 1.21, 7000),
            ],
        )
        .with_series(
            "DUOPHARMA",
            vec![point("2024-01-03", 1.10, 800), point("2024-01-04", 1.12, 3000)],
        )
        .with_series("GREATEC", vec![point("2024-01-04", 5.60, 4000)])
        .with_series("AAX", vec![point("2024-01-04", 0.09, 0)])
}

pub fn sample_lookup(port: &MockDataPort) -> LookupTable {
    LookupTable::load(port).unwrap()
}

/// The same data as [`sample_port`], written as CSV snapshots under `root`
/// using the default key layout.
pub fn write_csv_snapshot(root: &Path) {
    std::fs::write(
        root.join("lookup.csv"),
        "ticker,counter_id,sector\n\
         APER,0209,Pharmaceuticals\n\
         GREATEC,0208,Technology\n\
         DUOPHARMA,7148,Pharmaceuticals\n\
         AAX,5238,\n",
    )
    .unwrap();

    let series = [
        (
            "APER",
            "Date,Close,Volume\n2024-01-04,1.23,1000\n2024-01-02,1.20,5000\n2024-01-03,1.21,7000\n",
        ),
        ("DUOPHARMA", "Date,Close,Volume\n2024-01-03,1.10,800\n2024-01-04,1.12,3000\n"),
        ("GREATEC", "Date,Close,Volume\n2024-01-04,5.60,4000\n"),
        ("AAX", "Date,Close,Volume\n2024-01-04,0.09,0\n"),
    ];
    for (ticker, body) in series {
        let dir = root.join(ticker);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("data.csv"), body).unwrap();
    }
}
