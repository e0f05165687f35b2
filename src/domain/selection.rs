//! Sector → ticker options → ticker → outputs.
//!
//! Each stage is a pure function of the stages before it. Option sets depend
//! only on the sector; the selected ticker depends only on the option set and
//! the requested value; outputs depend on both choices. Selection state lives
//! in the caller (one request, one CLI invocation), never in shared globals.

use crate::domain::aggregator::volume_for_sector;
use crate::domain::chart::Figure;
use crate::domain::contribution::Contribution;
use crate::domain::error::DashboardError;
use crate::domain::lookup::LookupTable;
use crate::domain::series::PriceSeries;
use crate::domain::ticker::SectorFilter;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerOption {
    pub label: String,
    pub value: String,
}

/// Resolved sector and ticker, plus the options the ticker was chosen from.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    #[serde(serialize_with = "serialize_sector")]
    pub sector: SectorFilter,
    pub ticker: String,
    pub options: Vec<TickerOption>,
}

fn serialize_sector<S: serde::Serializer>(sector: &SectorFilter, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(sector.as_str())
}

/// Sector used when the request names none.
pub fn default_sector(lookup: &LookupTable, preferred: &str) -> SectorFilter {
    match SectorFilter::parse(preferred) {
        SectorFilter::Named(name) if !lookup.has_sector(&name) => lookup
            .sectors()
            .first()
            .map(|s| SectorFilter::Named(s.clone()))
            .unwrap_or(SectorFilter::All),
        other => other,
    }
}

/// Ticker options for a sector choice. `All` groups every sector's tickers
/// sector by sector, each group in lookup order.
pub fn ticker_options(
    lookup: &LookupTable,
    sector: &SectorFilter,
) -> Result<Vec<TickerOption>, DashboardError> {
    let sectors: Vec<&str> = match sector {
        SectorFilter::All => lookup.sectors().iter().map(String::as_str).collect(),
        SectorFilter::Named(name) if lookup.has_sector(name) => vec![name.as_str()],
        SectorFilter::Named(name) => {
            return Err(DashboardError::SectorNotFound {
                sector: name.clone(),
            });
        }
    };

    Ok(sectors
        .into_iter()
        .flat_map(|s| lookup.tickers_in(s))
        .map(|rec| TickerOption {
            label: rec.label(),
            value: rec.ticker.clone(),
        })
        .collect())
}

/// Keep `requested` if it is one of `options`, otherwise fall back to the
/// first option.
pub fn resolve_ticker<'a>(options: &'a [TickerOption], requested: Option<&str>) -> Option<&'a TickerOption> {
    requested
        .and_then(|t| options.iter().find(|o| o.value == t))
        .or_else(|| options.first())
}

/// Resolve the full selection for one interaction.
///
/// A requested ticker the lookup table has never heard of is reported as
/// `TickerNotFound` rather than silently replaced.
pub fn select(
    lookup: &LookupTable,
    sector: Option<&str>,
    ticker: Option<&str>,
    preferred_sector: &str,
) -> Result<Selection, DashboardError> {
    let sector = match sector.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => SectorFilter::parse(s),
        None => default_sector(lookup, preferred_sector),
    };
    let requested = ticker.map(str::trim).filter(|t| !t.is_empty());
    if let Some(t) = requested {
        if lookup.get(t).is_none() {
            return Err(DashboardError::TickerNotFound {
                ticker: t.to_string(),
            });
        }
    }

    let options = ticker_options(lookup, &sector)?;
    let ticker = resolve_ticker(&options, requested)
        .map(|o| o.value.clone())
        .ok_or_else(|| DashboardError::SectorNotFound {
            sector: sector.to_string(),
        })?;

    Ok(Selection {
        sector,
        ticker,
        options,
    })
}

/// Everything the dashboard displays for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub latest_date: NaiveDate,
    pub latest_close: f64,
    pub latest_volume: u64,
    pub sector_volume: u64,
    pub contribution: Contribution,
    pub figure: Figure,
}

/// Fetch the selected series and derive the statistics and figure.
pub fn compute_view(
    data_port: &dyn DataPort,
    lookup: &LookupTable,
    selection: Selection,
    currency: &str,
) -> Result<DashboardView, DashboardError> {
    let series: PriceSeries = data_port.fetch_series(&selection.ticker)?;
    let latest = series
        .latest()
        .cloned()
        .ok_or_else(|| DashboardError::EmptySeries {
            ticker: selection.ticker.clone(),
        })?;

    let sector_volume = volume_for_sector(data_port, lookup, &selection.sector)?;
    let contribution = Contribution::compute(latest.volume, sector_volume);
    tracing::debug!(
        ticker = %selection.ticker,
        sector = %selection.sector,
        latest_volume = latest.volume,
        sector_volume,
        "view computed"
    );

    Ok(DashboardView {
        latest_date: latest.date,
        latest_close: latest.close,
        latest_volume: latest.volume,
        sector_volume,
        contribution,
        figure: Figure::price_volume(&series, currency),
        selection,
    })
}
