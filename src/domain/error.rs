//! Domain error types.

/// Top-level error type for sectorboard.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("storage error: {reason}")]
    Storage { reason: String },

    #[error("object not found: {key}")]
    ObjectNotFound { key: String },

    #[error("lookup table unavailable: {reason}")]
    LookupUnavailable { reason: String },

    #[error("malformed lookup table: {reason}")]
    LookupMalformed { reason: String },

    #[error("no time series found for ticker {ticker}")]
    TickerNotFound { ticker: String },

    #[error("malformed time series for {ticker}: {reason}")]
    SeriesMalformed { ticker: String, reason: String },

    #[error("time series for {ticker} has no rows")]
    EmptySeries { ticker: String },

    #[error("unknown sector: {sector}")]
    SectorNotFound { sector: String },

    #[error("traded volume for {sector} overflows")]
    VolumeOverflow { sector: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Errors that must keep the process from serving traffic.
    pub fn is_startup_failure(&self) -> bool {
        matches!(
            self,
            DashboardError::LookupUnavailable { .. } | DashboardError::LookupMalformed { .. }
        )
    }
}

impl From<&DashboardError> for std::process::ExitCode {
    fn from(err: &DashboardError) -> Self {
        let code: u8 = match err {
            DashboardError::Io(_) => 1,
            DashboardError::ConfigParse { .. }
            | DashboardError::ConfigMissing { .. }
            | DashboardError::ConfigInvalid { .. } => 2,
            DashboardError::Storage { .. } | DashboardError::ObjectNotFound { .. } => 3,
            DashboardError::LookupUnavailable { .. } | DashboardError::LookupMalformed { .. } => 4,
            DashboardError::TickerNotFound { .. }
            | DashboardError::SeriesMalformed { .. }
            | DashboardError::EmptySeries { .. }
            | DashboardError::SectorNotFound { .. }
            | DashboardError::VolumeOverflow { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
