//! Data access port trait.

use crate::domain::error::DashboardError;
use crate::domain::series::PriceSeries;
use crate::domain::ticker::TickerRecord;

/// Read-only access to the lookup snapshot and per-ticker snapshots.
pub trait DataPort {
    /// Every lookup row, null sectors already replaced by the sentinel.
    fn load_lookup(&self) -> Result<Vec<TickerRecord>, DashboardError>;

    /// Full series for one ticker. Missing data is `TickerNotFound`.
    fn fetch_series(&self, ticker: &str) -> Result<PriceSeries, DashboardError>;
}
