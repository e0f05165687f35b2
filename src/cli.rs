//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::DashboardError;
use crate::domain::lookup::LookupTable;
use crate::domain::selection::{DashboardView, compute_view, default_sector, select, ticker_options};
use crate::domain::series::format_close;
use crate::domain::ticker::SectorFilter;
use crate::ports::data_port::DataPort;
use crate::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "sectorboard", about = "Sector and ticker volume dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web dashboard
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List sectors and how many tickers each holds
    Sectors {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the ticker options for a sector
    Tickers {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        sector: Option<String>,
    },
    /// Print the dashboard statistics for a selection
    Stats {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        sector: Option<String>,
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Check the config and that the lookup table loads
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let output = match cli.command {
        Command::Serve { config } => return run_serve(&config),
        Command::Sectors { config } => sectors_report(&config),
        Command::Tickers { config, sector } => tickers_report(&config, sector.as_deref()),
        Command::Stats {
            config,
            sector,
            ticker,
        } => stats_report(&config, sector.as_deref(), ticker.as_deref()),
        Command::Validate { config } => validate_report(&config),
    };

    match output {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, DashboardError> {
    FileConfigAdapter::from_file(path).map_err(|e| DashboardError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Everything a command needs once startup has succeeded.
pub struct Startup {
    pub settings: Settings,
    pub data_port: Arc<dyn DataPort + Send + Sync>,
    pub lookup: LookupTable,
}

/// Load settings, install logging, and load the lookup table. A lookup
/// failure here is fatal for every command.
pub fn bootstrap(config_path: &Path) -> Result<Startup, DashboardError> {
    let config = load_config(config_path)?;
    let settings = Settings::from_config(&config)?;
    crate::logging::init(&settings.logging);

    let adapter = settings.storage.data_port()?;
    tracing::info!(
        store = %adapter.describe(),
        lookup = %settings.storage.lookup_key,
        "loading lookup table"
    );
    let lookup = LookupTable::load(&adapter).inspect_err(|e| {
        tracing::error!(error = %e, "startup failed");
    })?;

    Ok(Startup {
        settings,
        data_port: Arc::new(adapter),
        lookup,
    })
}

pub fn render_sectors(lookup: &LookupTable) -> String {
    let mut out = String::new();
    for sector in lookup.sectors() {
        let _ = writeln!(out, "{}\t{}", sector, lookup.tickers_in(sector).len());
    }
    let _ = writeln!(out, "{}\t{}", SectorFilter::All, lookup.len());
    out
}

pub fn render_tickers(lookup: &LookupTable, sector: &SectorFilter) -> Result<String, DashboardError> {
    let options = ticker_options(lookup, sector)?;
    let mut out = String::new();
    for (i, opt) in options.iter().enumerate() {
        let marker = if i == 0 { "*" } else { " " };
        let _ = writeln!(out, "{marker} {}", opt.label);
    }
    Ok(out)
}

pub fn render_stats(view: &DashboardView, currency: &str) -> String {
    let close_label = format!("Last Closing Price ({currency})");
    let rows = [
        ("Sector", view.selection.sector.to_string()),
        ("Ticker", view.selection.ticker.clone()),
        ("Latest record", view.latest_date.format("%Y-%m-%d").to_string()),
        (close_label.as_str(), format_close(view.latest_close)),
        ("Last Traded Volume", view.latest_volume.to_string()),
        ("Sector Traded Volume", view.sector_volume.to_string()),
        ("% Contribution to Sector Volume", view.contribution.to_string()),
    ];
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + 1;
    let mut out = String::new();
    for (key, value) in rows {
        let _ = writeln!(out, "{:<width$} {}", format!("{key}:"), value, width = width);
    }
    out
}

pub fn sectors_report(config_path: &Path) -> Result<String, DashboardError> {
    let rt = bootstrap(config_path)?;
    Ok(render_sectors(&rt.lookup))
}

pub fn tickers_report(config_path: &Path, sector: Option<&str>) -> Result<String, DashboardError> {
    let rt = bootstrap(config_path)?;
    let sector = match sector {
        Some(s) => SectorFilter::parse(s),
        None => default_sector(&rt.lookup, &rt.settings.dashboard.default_sector),
    };
    render_tickers(&rt.lookup, &sector)
}

pub fn stats_report(
    config_path: &Path,
    sector: Option<&str>,
    ticker: Option<&str>,
) -> Result<String, DashboardError> {
    let rt = bootstrap(config_path)?;
    let dashboard = &rt.settings.dashboard;
    let selection = select(&rt.lookup, sector, ticker, &dashboard.default_sector)?;
    let view = compute_view(&*rt.data_port, &rt.lookup, selection, &dashboard.currency)?;
    Ok(render_stats(&view, &dashboard.currency))
}

pub fn validate_report(config_path: &Path) -> Result<String, DashboardError> {
    let rt = bootstrap(config_path)?;
    Ok(format!(
        "configuration is valid: {} tickers in {} sectors\n",
        rt.lookup.len(),
        rt.lookup.sectors().len()
    ))
}

fn run_serve(config_path: &Path) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, serve};

        let rt = match bootstrap(config_path) {
            Ok(rt) => rt,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let listen = rt.settings.listen;
        let state = AppState {
            data_port: rt.data_port,
            lookup: Arc::new(rt.lookup),
            dashboard: rt.settings.dashboard,
        };

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(r) => r,
            Err(e) => {
                eprintln!("error: failed to start runtime: {e}");
                return ExitCode::from(1);
            }
        };

        match runtime.block_on(serve(state, listen)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                (&e).into()
            }
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}
