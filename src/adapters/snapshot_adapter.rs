//! `DataPort` over an object store holding lookup and per-ticker snapshots.

use crate::adapters::{csv_codec, feather_codec};
use crate::domain::error::DashboardError;
use crate::domain::series::PriceSeries;
use crate::domain::ticker::TickerRecord;
use crate::ports::data_port::DataPort;
use crate::ports::object_store_port::ObjectStorePort;
use std::str::FromStr;

/// Placeholder substituted with the ticker symbol in series keys.
pub const TICKER_PLACEHOLDER: &str = "{ticker}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Feather,
    Csv,
}

impl FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feather" | "ipc" | "arrow" => Ok(SnapshotFormat::Feather),
            "csv" => Ok(SnapshotFormat::Csv),
            other => Err(format!("unknown snapshot format {other:?} (expected feather or csv)")),
        }
    }
}

impl SnapshotFormat {
    fn decode_lookup(self, bytes: &[u8]) -> Result<Vec<TickerRecord>, DashboardError> {
        match self {
            SnapshotFormat::Feather => feather_codec::decode_lookup(bytes),
            SnapshotFormat::Csv => csv_codec::decode_lookup(bytes),
        }
    }

    fn decode_series(self, ticker: &str, bytes: &[u8]) -> Result<PriceSeries, DashboardError> {
        match self {
            SnapshotFormat::Feather => feather_codec::decode_series(ticker, bytes),
            SnapshotFormat::Csv => csv_codec::decode_series(ticker, bytes),
        }
    }
}

pub struct SnapshotAdapter {
    store: Box<dyn ObjectStorePort + Send + Sync>,
    format: SnapshotFormat,
    lookup_key: String,
    series_key: String,
}

impl SnapshotAdapter {
    pub fn new(
        store: Box<dyn ObjectStorePort + Send + Sync>,
        format: SnapshotFormat,
        lookup_key: impl Into<String>,
        series_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            format,
            lookup_key: lookup_key.into(),
            series_key: series_key.into(),
        }
    }

    pub fn series_key_for(&self, ticker: &str) -> String {
        self.series_key.replace(TICKER_PLACEHOLDER, ticker)
    }

    pub fn describe(&self) -> String {
        self.store.describe()
    }
}

impl DataPort for SnapshotAdapter {
    fn load_lookup(&self) -> Result<Vec<TickerRecord>, DashboardError> {
        let bytes = self
            .store
            .get_object(&self.lookup_key)
            .map_err(|e| DashboardError::LookupUnavailable {
                reason: format!("{} from {}: {e}", self.lookup_key, self.store.describe()),
            })?;
        self.format.decode_lookup(&bytes)
    }

    fn fetch_series(&self, ticker: &str) -> Result<PriceSeries, DashboardError> {
        let key = self.series_key_for(ticker);
        tracing::debug!(ticker, key = %key, "fetching series");
        let bytes = self.store.get_object(&key).map_err(|e| match e {
            DashboardError::ObjectNotFound { .. } => DashboardError::TickerNotFound {
                ticker: ticker.to_string(),
            },
            other => other,
        })?;
        self.format.decode_series(ticker, &bytes)
    }
}
