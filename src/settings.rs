//! Typed settings read from the INI config.

use crate::adapters::local_store_adapter::LocalStoreAdapter;
use crate::adapters::snapshot_adapter::{SnapshotAdapter, SnapshotFormat, TICKER_PLACEHOLDER};
use crate::domain::error::DashboardError;
use crate::ports::config_port::ConfigPort;
use crate::ports::object_store_port::ObjectStorePort;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TITLE: &str = "Malaysian Stocks by Sector";
pub const DEFAULT_SECTOR: &str = "Pharmaceuticals";
pub const DEFAULT_CURRENCY: &str = "RM";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8050";

#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Local { path: PathBuf },
    Http {
        base_url: String,
        bearer_token: Option<String>,
        timeout: Duration,
    },
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub format: SnapshotFormat,
    pub lookup_key: String,
    pub series_key: String,
}

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub title: String,
    pub default_sector: String,
    pub currency: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            default_sector: DEFAULT_SECTOR.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub ansi: bool,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub storage: StorageSettings,
    pub dashboard: DashboardSettings,
    pub listen: SocketAddr,
    pub logging: LoggingSettings,
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> DashboardError {
    DashboardError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason: reason.into(),
    }
}

impl StorageSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DashboardError> {
        let format: SnapshotFormat = config
            .get_or("storage", "format", "feather")
            .parse()
            .map_err(|reason: String| invalid("storage", "format", reason))?;
        let extension = match format {
            SnapshotFormat::Feather => "feather",
            SnapshotFormat::Csv => "csv",
        };

        let backend = match config.get_or("storage", "backend", "local").to_lowercase().as_str() {
            "local" => StorageBackend::Local {
                path: PathBuf::from(config.require("storage", "path")?),
            },
            "http" | "s3" => {
                let base_url = config.require("storage", "base_url")?;
                if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                    return Err(invalid("storage", "base_url", "must start with http:// or https://"));
                }
                let timeout_secs = config.get_int("storage", "timeout_secs", 30);
                if timeout_secs <= 0 {
                    return Err(invalid("storage", "timeout_secs", "must be positive"));
                }
                StorageBackend::Http {
                    base_url,
                    bearer_token: config.get_trimmed("storage", "bearer_token"),
                    timeout: Duration::from_secs(timeout_secs as u64),
                }
            }
            other => {
                return Err(invalid(
                    "storage",
                    "backend",
                    format!("unknown backend {other:?} (expected local or http)"),
                ));
            }
        };

        let lookup_key = config.get_or("storage", "lookup_key", &format!("lookup.{extension}"));
        let series_key = config.get_or(
            "storage",
            "series_key",
            &format!("{TICKER_PLACEHOLDER}/data.{extension}"),
        );
        if !series_key.contains(TICKER_PLACEHOLDER) {
            return Err(invalid(
                "storage",
                "series_key",
                format!("must contain {TICKER_PLACEHOLDER}"),
            ));
        }

        Ok(Self {
            backend,
            format,
            lookup_key,
            series_key,
        })
    }

    fn object_store(&self) -> Result<Box<dyn ObjectStorePort + Send + Sync>, DashboardError> {
        match &self.backend {
            StorageBackend::Local { path } => Ok(Box::new(LocalStoreAdapter::new(path.clone()))),
            #[cfg(feature = "remote")]
            StorageBackend::Http {
                base_url,
                bearer_token,
                timeout,
            } => Ok(Box::new(
                crate::adapters::http_store_adapter::HttpStoreAdapter::new(
                    base_url,
                    bearer_token.clone(),
                    *timeout,
                )?,
            )),
            #[cfg(not(feature = "remote"))]
            StorageBackend::Http { .. } => Err(invalid(
                "storage",
                "backend",
                "remote feature is required for the http backend",
            )),
        }
    }

    /// Build the data port for these settings.
    pub fn data_port(&self) -> Result<SnapshotAdapter, DashboardError> {
        Ok(SnapshotAdapter::new(
            self.object_store()?,
            self.format,
            self.lookup_key.clone(),
            self.series_key.clone(),
        ))
    }
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DashboardError> {
        let storage = StorageSettings::from_config(config)?;

        let dashboard = DashboardSettings {
            title: config.get_or("dashboard", "title", DEFAULT_TITLE),
            default_sector: config.get_or("dashboard", "default_sector", DEFAULT_SECTOR),
            currency: config.get_or("dashboard", "currency", DEFAULT_CURRENCY),
        };

        let listen = config
            .get_or("web", "listen", DEFAULT_LISTEN)
            .parse()
            .map_err(|_| invalid("web", "listen", "expected host:port"))?;

        let logging = LoggingSettings {
            level: config.get_or("logging", "level", "info"),
            ansi: config.get_bool("logging", "ansi", true),
        };

        Ok(Self {
            storage,
            dashboard,
            listen,
            logging,
        })
    }
}
