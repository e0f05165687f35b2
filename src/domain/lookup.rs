//! In-memory lookup table of every known ticker.
//!
//! Loaded once at startup and never mutated afterwards, so it is shared
//! across requests behind an `Arc` without locking.

use crate::domain::error::DashboardError;
use crate::domain::ticker::{TickerRecord, ALL_SECTORS};
use crate::ports::data_port::DataPort;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LookupTable {
    records: Vec<TickerRecord>,
    sectors: Vec<String>,
}

impl LookupTable {
    /// Validate records and index their sectors in first-appearance order.
    pub fn from_records(records: Vec<TickerRecord>) -> Result<Self, DashboardError> {
        if records.is_empty() {
            return Err(DashboardError::LookupMalformed {
                reason: "lookup table has no rows".into(),
            });
        }

        let mut seen = HashSet::new();
        let mut sectors = Vec::new();
        for rec in &records {
            if rec.ticker.trim().is_empty() {
                return Err(DashboardError::LookupMalformed {
                    reason: "empty ticker symbol".into(),
                });
            }
            if !seen.insert(rec.ticker.as_str()) {
                return Err(DashboardError::LookupMalformed {
                    reason: format!("duplicate ticker {}", rec.ticker),
                });
            }
            if !sectors.contains(&rec.sector) {
                sectors.push(rec.sector.clone());
            }
        }

        Ok(Self { records, sectors })
    }

    /// Fetch and validate the lookup table. Any failure is a startup failure.
    pub fn load(data_port: &dyn DataPort) -> Result<Self, DashboardError> {
        let records = data_port.load_lookup().map_err(|e| match e {
            DashboardError::LookupMalformed { .. } | DashboardError::LookupUnavailable { .. } => e,
            other => DashboardError::LookupUnavailable {
                reason: other.to_string(),
            },
        })?;
        let table = Self::from_records(records)?;
        tracing::info!(
            tickers = table.len(),
            sectors = table.sectors.len(),
            "lookup table loaded"
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TickerRecord] {
        &self.records
    }

    /// Distinct sector names, first-appearance order.
    pub fn sectors(&self) -> &[String] {
        &self.sectors
    }

    /// Sector dropdown entries: every real sector followed by "All".
    pub fn sector_options(&self) -> Vec<String> {
        let mut options = self.sectors.clone();
        options.push(ALL_SECTORS.to_string());
        options
    }

    pub fn has_sector(&self, sector: &str) -> bool {
        self.sectors.iter().any(|s| s == sector)
    }

    pub fn tickers_in(&self, sector: &str) -> Vec<&TickerRecord> {
        self.records.iter().filter(|r| r.sector == sector).collect()
    }

    pub fn get(&self, ticker: &str) -> Option<&TickerRecord> {
        self.records.iter().find(|r| r.ticker == ticker)
    }
}
