//! HTML templates using Askama.

use askama::Template;

use crate::domain::error::DashboardError;
use crate::domain::selection::{DashboardView, Selection, TickerOption};
use crate::domain::series::format_close;

/// Display-ready state of the ticker selector, statistics and chart.
///
/// `error` is empty on success; otherwise the statistic fields and
/// `figure_json` are empty and the panel shows the error instead.
#[derive(Debug, Clone)]
pub struct PanelView {
    pub sector: String,
    pub ticker: String,
    pub options: Vec<TickerOption>,
    pub currency: String,
    pub as_of: String,
    pub last_close: String,
    pub last_volume: String,
    pub sector_volume: String,
    pub contribution: String,
    pub figure_json: String,
    pub error: String,
}

impl PanelView {
    fn empty(selection: Selection, currency: &str) -> Self {
        Self {
            sector: selection.sector.to_string(),
            ticker: selection.ticker,
            options: selection.options,
            currency: currency.to_string(),
            as_of: String::new(),
            last_close: String::new(),
            last_volume: String::new(),
            sector_volume: String::new(),
            contribution: String::new(),
            figure_json: String::new(),
            error: String::new(),
        }
    }

    pub fn from_view(view: DashboardView, currency: &str) -> Result<Self, serde_json::Error> {
        let figure_json = view.figure.to_json()?;
        Ok(Self {
            as_of: view.latest_date.format("%Y-%m-%d").to_string(),
            last_close: format_close(view.latest_close),
            last_volume: view.latest_volume.to_string(),
            sector_volume: view.sector_volume.to_string(),
            contribution: view.contribution.to_string(),
            figure_json,
            ..Self::empty(view.selection, currency)
        })
    }

    pub fn failed(selection: Selection, currency: &str, err: &DashboardError) -> Self {
        Self {
            error: err.to_string(),
            ..Self::empty(selection, currency)
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub title: &'a str,
    pub sectors: &'a [String],
    pub panel: &'a PanelView,
}

#[derive(Template)]
#[template(path = "panel.html")]
pub struct PanelTemplate<'a> {
    pub panel: &'a PanelView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub status: u16,
}

#[derive(Template)]
#[template(path = "error_fragment.html")]
pub struct ErrorFragmentTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
