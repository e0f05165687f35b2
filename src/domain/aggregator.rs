//! Sector-wide traded volume.
//!
//! Every call re-fetches the member series; there is no caching and no
//! partial-failure policy, so one failed fetch fails the whole aggregate.

use crate::domain::error::DashboardError;
use crate::domain::lookup::LookupTable;
use crate::domain::ticker::SectorFilter;
use crate::ports::data_port::DataPort;

/// Volume of the chronologically last record for `ticker`.
pub fn latest_volume(data_port: &dyn DataPort, ticker: &str) -> Result<u64, DashboardError> {
    let series = data_port.fetch_series(ticker)?;
    series
        .latest()
        .map(|p| p.volume)
        .ok_or_else(|| DashboardError::EmptySeries {
            ticker: ticker.to_string(),
        })
}

fn add_volume(total: u64, volume: u64, sector: &str) -> Result<u64, DashboardError> {
    total
        .checked_add(volume)
        .ok_or_else(|| DashboardError::VolumeOverflow {
            sector: sector.to_string(),
        })
}

/// Sum of latest volumes over one named sector. Unknown sectors sum to 0.
pub fn volume_for_named_sector(
    data_port: &dyn DataPort,
    lookup: &LookupTable,
    sector: &str,
) -> Result<u64, DashboardError> {
    let total = lookup.tickers_in(sector).iter().try_fold(0u64, |total, rec| {
        add_volume(total, latest_volume(data_port, &rec.ticker)?, sector)
    })?;
    tracing::debug!(sector, total, "sector volume computed");
    Ok(total)
}

/// Sector volume for a dropdown choice; `All` sums every real sector.
pub fn volume_for_sector(
    data_port: &dyn DataPort,
    lookup: &LookupTable,
    sector: &SectorFilter,
) -> Result<u64, DashboardError> {
    match sector {
        SectorFilter::Named(name) => volume_for_named_sector(data_port, lookup, name),
        SectorFilter::All => lookup.sectors().iter().try_fold(0u64, |total, s| {
            add_volume(
                total,
                volume_for_named_sector(data_port, lookup, s)?,
                sector.as_str(),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::{PricePoint, PriceSeries};
    use crate::domain::ticker::TickerRecord;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    struct FixedPort {
        latest: HashMap<&'static str, u64>,
    }

    impl DataPort for FixedPort {
        fn load_lookup(&self) -> Result<Vec<TickerRecord>, DashboardError> {
            Ok(vec![])
        }

        fn fetch_series(&self, ticker: &str) -> Result<PriceSeries, DashboardError> {
            let volume = self
                .latest
                .get(ticker)
                .copied()
                .ok_or_else(|| DashboardError::TickerNotFound {
                    ticker: ticker.to_string(),
                })?;
            let day = |d| NaiveDate::from_ymd_opt(2021, 6, d).unwrap();
            Ok(PriceSeries::new(
                ticker,
                vec![
                    PricePoint { date: day(1), close: 1.0, volume: 999_999 },
                    PricePoint { date: day(2), close: 1.1, volume },
                ],
            ))
        }
    }

    fn lookup() -> LookupTable {
        LookupTable::from_records(vec![
            TickerRecord::new("APER", "0209", Some("Pharmaceuticals")),
            TickerRecord::new("DUOPHARMA", "7148", Some("Pharmaceuticals")),
            TickerRecord::new("AAX", "5238", None),
        ])
        .unwrap()
    }

    fn port() -> FixedPort {
        FixedPort {
            latest: HashMap::from([("APER", 1000), ("DUOPHARMA", 2500), ("AAX", 40)]),
        }
    }

    #[test]
    fn sums_latest_volume_of_members() {
        let total = volume_for_named_sector(&port(), &lookup(), "Pharmaceuticals").unwrap();
        assert_eq!(total, 3500);
    }

    #[test]
    fn all_sums_every_sector_including_unspecified() {
        let total = volume_for_sector(&port(), &lookup(), &SectorFilter::All).unwrap();
        assert_eq!(total, 3540);
    }

    #[test]
    fn sector_without_tickers_is_zero() {
        let total = volume_for_named_sector(&port(), &lookup(), "Plantation").unwrap();
        assert_eq!(total, 0);
    }

    fn huge_port() -> (FixedPort, LookupTable) {
        let huge = i64::MAX as u64;
        let port = FixedPort {
            latest: HashMap::from([("A", huge), ("B", huge), ("C", huge), ("D", huge)]),
        };
        let lookup = LookupTable::from_records(vec![
            TickerRecord::new("A", "0001", Some("S")),
            TickerRecord::new("B", "0002", Some("S")),
            TickerRecord::new("C", "0003", Some("S")),
            TickerRecord::new("D", "0004", Some("T")),
        ])
        .unwrap();
        (port, lookup)
    }

    #[test]
    fn sector_overflow_is_an_error() {
        let (port, lookup) = huge_port();
        let err = volume_for_named_sector(&port, &lookup, "S").unwrap_err();
        assert!(matches!(err, DashboardError::VolumeOverflow { sector } if sector == "S"));
    }

    #[test]
    fn all_overflow_is_an_error() {
        let (mut port, lookup) = huge_port();
        port.latest.insert("C", 0);
        // S alone fits, S + T does not
        assert!(volume_for_named_sector(&port, &lookup, "S").is_ok());
        let err = volume_for_sector(&port, &lookup, &SectorFilter::All).unwrap_err();
        assert!(matches!(err, DashboardError::VolumeOverflow { sector } if sector == "All"));
    }

    #[test]
    fn one_failed_fetch_fails_the_aggregate() {
        let mut p = port();
        p.latest.remove("DUOPHARMA");
        let err = volume_for_named_sector(&p, &lookup(), "Pharmaceuticals").unwrap_err();
        assert!(matches!(err, DashboardError::TickerNotFound { ticker } if ticker == "DUOPHARMA"));
    }
}
